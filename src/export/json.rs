//! JSON export of every payment request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::PaymentRequest;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of BuzzPay that wrote the export
    pub app_version: String,

    pub request_count: usize,

    /// Newest first
    pub requests: Vec<PaymentRequest>,
}

impl RequestExport {
    pub fn new(requests: Vec<PaymentRequest>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            request_count: requests.len(),
            requests,
        }
    }

    pub fn from_storage(storage: &Storage) -> BuzzPayResult<Self> {
        Ok(Self::new(storage.store().list()?))
    }
}

/// Export every request to JSON
pub fn export_requests_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> BuzzPayResult<()> {
    let export = RequestExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BuzzPayError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuzzPayPaths, Settings};
    use crate::models::{Money, NewPaymentRequest, RequestStatus};
    use tempfile::TempDir;

    #[test]
    fn test_json_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &Settings::default()).unwrap();
        storage
            .store()
            .create(&NewPaymentRequest {
                amount: Money::from_cents(2550),
                description: "Dinner".into(),
                recipient: "Bob".into(),
                sender: "Al".into(),
                sender_phone: "15551234567".into(),
                recipient_phone: "15557654321".into(),
                status: RequestStatus::Pending,
            })
            .unwrap();

        let mut output = Vec::new();
        export_requests_json(&storage, &mut output, true).unwrap();

        let parsed: RequestExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.request_count, 1);
        assert_eq!(parsed.requests[0].amount.cents(), 2550);
    }
}
