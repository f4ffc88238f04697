//! CSV export, one row per payment request

use std::io::Write;

use crate::error::{BuzzPayError, BuzzPayResult};
use crate::storage::Storage;

const HEADER: [&str; 12] = [
    "id",
    "created_at",
    "status",
    "amount",
    "sender",
    "sender_phone",
    "recipient",
    "recipient_phone",
    "description",
    "payment_method",
    "payment_date",
    "note",
];

/// Export every request to CSV
pub fn export_requests_csv<W: Write>(storage: &Storage, writer: W) -> BuzzPayResult<()> {
    let requests = storage.store().list()?;
    let export_err = |e: ::csv::Error| BuzzPayError::Export(e.to_string());

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(export_err)?;

    for request in &requests {
        csv_writer
            .write_record([
                request.id.to_string(),
                request.created_at.to_rfc3339(),
                request.status.to_string().to_lowercase(),
                format!("{:.2}", request.amount.as_units()),
                request.sender.clone(),
                request.sender_phone.clone(),
                request.recipient.clone(),
                request.recipient_phone.clone(),
                request.description.clone(),
                request
                    .payment_method
                    .as_ref()
                    .map(|m| m.id().to_string())
                    .unwrap_or_default(),
                request
                    .payment_date
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_default(),
                request.note.clone().unwrap_or_default(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| BuzzPayError::Export(e.to_string()))?;
    Ok(())
}
