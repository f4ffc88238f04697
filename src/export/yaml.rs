//! YAML export of every payment request

use std::io::Write;

use crate::error::{BuzzPayError, BuzzPayResult};
use crate::export::json::RequestExport;
use crate::storage::Storage;

/// Export every request to YAML, with a short header comment
pub fn export_requests_yaml<W: Write>(storage: &Storage, writer: &mut W) -> BuzzPayResult<()> {
    let export = RequestExport::from_storage(storage)?;
    let io_err = |e: std::io::Error| BuzzPayError::Export(e.to_string());

    writeln!(writer, "# BuzzPay payment request export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BuzzPayError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuzzPayPaths, Settings};
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &Settings::default()).unwrap();

        let mut output = Vec::new();
        export_requests_yaml(&storage, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("# BuzzPay payment request export"));

        let parsed: RequestExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.request_count, 0);
        assert!(parsed.requests.is_empty());
    }
}
