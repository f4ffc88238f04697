//! Export module for BuzzPay
//!
//! - CSV: one row per request (spreadsheet-compatible)
//! - JSON: machine-readable export of every request
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_requests_csv;
pub use json::{export_requests_json, RequestExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_requests_yaml;

use std::fmt;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "Unknown export format '{}'. Use csv, json or yaml",
                other
            )),
        }
    }
}
