//! Storage layer for BuzzPay
//!
//! Payment requests live in a [`RecordStore`]: either a local JSON file or
//! the hosted data API. [`Storage`] picks the backend from settings and pairs
//! it with the audit logger.

pub mod file_io;
pub mod local;
pub mod rest;

pub use file_io::{read_json, write_json_atomic};
pub use local::JsonFileStore;
pub use rest::RestStore;

use tracing::debug;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::{BuzzPayPaths, Settings, StoreBackend};
use crate::error::BuzzPayResult;
use crate::models::{NewPaymentRequest, PaymentRequest, RequestId, RequestUpdate};

/// The external persistence collaborator for payment requests
pub trait RecordStore {
    /// Insert a new request; the store assigns `id` and `created_at`
    fn create(&self, new: &NewPaymentRequest) -> BuzzPayResult<PaymentRequest>;

    /// Fetch one request (`NotFound` if missing)
    fn get(&self, id: &RequestId) -> BuzzPayResult<PaymentRequest>;

    /// Apply a partial update and return the stored row (`NotFound` if missing)
    fn update(&self, id: &RequestId, update: &RequestUpdate) -> BuzzPayResult<PaymentRequest>;

    /// All requests, newest first
    fn list(&self) -> BuzzPayResult<Vec<PaymentRequest>>;
}

/// Main storage coordinator
pub struct Storage {
    store: Box<dyn RecordStore>,
    audit: AuditLogger,
}

impl Storage {
    /// Open the backend selected in `settings`
    pub fn open(paths: &BuzzPayPaths, settings: &Settings) -> BuzzPayResult<Self> {
        settings.validate()?;
        paths.ensure_directories()?;

        let store: Box<dyn RecordStore> = match settings.store.backend {
            StoreBackend::Local => {
                debug!(path = %paths.requests_file().display(), "using local store");
                Box::new(JsonFileStore::open(paths.requests_file())?)
            }
            StoreBackend::Remote => {
                let rest = RestStore::from_settings(&settings.store)?;
                debug!(endpoint = rest.endpoint(), "using remote store");
                Box::new(rest)
            }
        };

        Ok(Self::with_store(store, AuditLogger::new(paths.audit_log())))
    }

    /// Build around an existing store (tests, alternative backends)
    pub fn with_store(store: Box<dyn RecordStore>, audit: AuditLogger) -> Self {
        Self { store, audit }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create in the audit log
    pub fn log_create(&self, request: &PaymentRequest) -> BuzzPayResult<()> {
        let entry = AuditEntry::create(
            EntityType::PaymentRequest,
            request.id.as_str(),
            Some(audit_label(request)),
            request,
        );
        self.audit.log(&entry)
    }

    /// Record an update with a before/after diff
    pub fn log_update(&self, before: &PaymentRequest, after: &PaymentRequest) -> BuzzPayResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(
            EntityType::PaymentRequest,
            after.id.as_str(),
            Some(audit_label(after)),
            before,
            after,
            diff,
        );
        self.audit.log(&entry)
    }
}

fn audit_label(request: &PaymentRequest) -> String {
    format!("{} -> {}", request.sender, request.recipient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Money, RequestStatus};
    use tempfile::TempDir;

    fn new_request() -> NewPaymentRequest {
        NewPaymentRequest {
            amount: Money::from_cents(2550),
            description: "Dinner".into(),
            recipient: "Bob".into(),
            sender: "Al".into(),
            sender_phone: "15551234567".into(),
            recipient_phone: "15557654321".into(),
            status: RequestStatus::Pending,
        }
    }

    #[test]
    fn test_open_local_backend() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &Settings::default()).unwrap();

        let created = storage.store().create(&new_request()).unwrap();
        assert!(paths.requests_file().exists());
        assert_eq!(storage.store().list().unwrap()[0].id, created.id);
    }

    #[test]
    fn test_open_remote_without_url_fails() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();
        settings.store.backend = StoreBackend::Remote;

        assert!(Storage::open(&paths, &settings).is_err());
    }

    #[test]
    fn test_audit_create_and_update() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &Settings::default()).unwrap();

        let before = storage.store().create(&new_request()).unwrap();
        storage.log_create(&before).unwrap();

        let after = storage
            .store()
            .update(&before.id, &RequestUpdate::status(RequestStatus::Cancelled))
            .unwrap();
        storage.log_update(&before, &after).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("status: \"pending\" -> \"cancelled\"")
        );
        assert_eq!(entries[1].entity_name.as_deref(), Some("Al -> Bob"));
    }
}
