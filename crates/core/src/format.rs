//! Output formats for query results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Shape in which query results are returned to the caller.
///
/// The format is part of the cache fingerprint: the same query rendered in
/// two formats occupies two cache entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Standard SPARQL JSON results, passed through.
    #[default]
    Json,
    /// Bindings flattened to `{variable: value}` objects.
    Simplified,
    /// Column definitions plus positional rows.
    Tabular,
}

impl ResultFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFormat::Json => "json",
            ResultFormat::Simplified => "simplified",
            ResultFormat::Tabular => "tabular",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ResultFormat::Json),
            "simplified" => Ok(ResultFormat::Simplified),
            "tabular" => Ok(ResultFormat::Tabular),
            other => Err(Error::InvalidInput(format!("unsupported format: {other}"))),
        }
    }
}
