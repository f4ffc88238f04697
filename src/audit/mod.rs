//! Audit trail for payment request changes
//!
//! Every create and update made through the request service is appended to
//! `audit.log` as one JSON object per line, with before/after snapshots and
//! a short field-level diff.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
