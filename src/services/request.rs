//! Payment request service
//!
//! Creation, lookup and the status lifecycle of payment requests:
//! `pending -> processing -> paid`, with `cancelled` reachable from either
//! open state. Every mutation is written to the audit log.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::{
    NewPaymentRequest, PaymentMethod, PaymentRequest, RequestId, RequestStatus, RequestUpdate,
};
use crate::storage::Storage;
use crate::wizard::{assemble_request, Clock, WizardController};

/// Service for payment request management
pub struct RequestService<'a> {
    storage: &'a Storage,
}

impl<'a> RequestService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new request
    pub fn create(&self, mut new: NewPaymentRequest) -> BuzzPayResult<PaymentRequest> {
        new.status = RequestStatus::Pending;
        new.validate()
            .map_err(|e| BuzzPayError::Validation(e.to_string()))?;

        let request = self.storage.store().create(&new)?;
        // Stored from here on; an audit problem is not a failed create.
        if let Err(e) = self.storage.log_create(&request) {
            warn!(id = %request.id, error = %e, "failed to audit created request");
        }

        info!(id = %request.id, amount = %request.amount, "created payment request");
        Ok(request)
    }

    /// Submit a completed creation wizard
    pub fn submit<C: Clock>(&self, wizard: &WizardController<C>) -> BuzzPayResult<PaymentRequest> {
        wizard.submit(|form| self.create(assemble_request(form)?))
    }

    pub fn get(&self, id: &RequestId) -> BuzzPayResult<PaymentRequest> {
        self.storage.store().get(id)
    }

    /// Find a request by full id or by a unique id prefix
    pub fn find(&self, identifier: &str) -> BuzzPayResult<PaymentRequest> {
        let id: RequestId = identifier
            .parse()
            .map_err(|e| BuzzPayError::InvalidArgument(format!("{}", e)))?;

        match self.get(&id) {
            Err(e) if e.is_not_found() => {}
            other => return other,
        }

        let mut matches: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|r| r.id.as_str().starts_with(id.as_str()))
            .collect();

        match matches.len() {
            0 => Err(BuzzPayError::request_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(BuzzPayError::InvalidArgument(format!(
                "'{}' matches {} requests; use more of the id",
                identifier, n
            ))),
        }
    }

    /// All requests, newest first
    pub fn list(&self) -> BuzzPayResult<Vec<PaymentRequest>> {
        self.storage.store().list()
    }

    /// The recipient picked a payment method
    pub fn begin_payment(
        &self,
        id: &RequestId,
        method: PaymentMethod,
    ) -> BuzzPayResult<PaymentRequest> {
        let before = self.get(id)?;
        if before.status.is_final() {
            return Err(BuzzPayError::Validation(format!(
                "Request is already {}",
                before.status.to_string().to_lowercase()
            )));
        }

        self.apply(
            &before,
            RequestUpdate {
                status: Some(RequestStatus::Processing),
                payment_method: Some(method),
                ..RequestUpdate::default()
            },
        )
    }

    /// Record the payment as done
    pub fn complete_payment(&self, id: &RequestId) -> BuzzPayResult<PaymentRequest> {
        let before = self.get(id)?;
        if before.status != RequestStatus::Processing {
            return Err(BuzzPayError::Validation(format!(
                "Only processing requests can be completed (status is {})",
                before.status.to_string().to_lowercase()
            )));
        }

        let paid = self.apply(
            &before,
            RequestUpdate {
                status: Some(RequestStatus::Paid),
                payment_date: Some(Utc::now()),
                ..RequestUpdate::default()
            },
        )?;
        info!(id = %paid.id, "payment completed");
        Ok(paid)
    }

    /// Choose a method and complete the payment in one go
    pub fn pay(&self, id: &RequestId, method: PaymentMethod) -> BuzzPayResult<PaymentRequest> {
        self.begin_payment(id, method)?;
        self.complete_payment(id)
    }

    pub fn cancel(&self, id: &RequestId) -> BuzzPayResult<PaymentRequest> {
        let before = self.get(id)?;
        if before.status.is_final() {
            return Err(BuzzPayError::Validation(format!(
                "Request is already {}",
                before.status.to_string().to_lowercase()
            )));
        }

        self.apply(&before, RequestUpdate::status(RequestStatus::Cancelled))
    }

    /// Set or clear (empty text) the note on a request
    pub fn add_note(&self, id: &RequestId, note: &str) -> BuzzPayResult<PaymentRequest> {
        let before = self.get(id)?;
        if before.status == RequestStatus::Cancelled {
            return Err(BuzzPayError::Validation(
                "Cannot add a note to a cancelled request".into(),
            ));
        }

        self.apply(&before, RequestUpdate::note(note.trim()))
    }

    fn apply(&self, before: &PaymentRequest, update: RequestUpdate) -> BuzzPayResult<PaymentRequest> {
        let after = self.storage.store().update(&before.id, &update)?;
        if let Err(e) = self.storage.log_update(before, &after) {
            warn!(id = %after.id, error = %e, "failed to audit request update");
        }
        info!(id = %after.id, status = %after.status, "updated payment request");
        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::config::{BuzzPayPaths, Settings};
    use crate::models::Money;
    use crate::storage::JsonFileStore;
    use crate::wizard::{request_wizard, ManualClock};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

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
    fn test_create_forces_pending_and_audits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);

        let mut new = new_request();
        new.status = RequestStatus::Paid;
        let request = service.create(new).unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);

        let mut new = new_request();
        new.amount = Money::zero();
        assert!(service.create(new).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_submit_wizard() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);

        let mut wizard = request_wizard(&Settings::default().wizard, ManualClock::new()).unwrap();
        for (i, value) in ["Al", "5551234567", "Bob", "5557654321", "25.50"]
            .iter()
            .enumerate()
        {
            wizard.set_field_value(i, *value).unwrap();
        }

        // Description not hidden yet: incomplete
        assert!(service.submit(&wizard).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());

        wizard.settle();
        let request = service.submit(&wizard).unwrap();
        assert_eq!(request.description, "");
        assert_eq!(request.amount.to_string(), "$25.50");
        assert_eq!(service.get(&request.id).unwrap(), request);
    }

    #[test]
    fn test_payment_lifecycle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);
        let request = service.create(new_request()).unwrap();

        let processing = service.begin_payment(&request.id, PaymentMethod::Card).unwrap();
        assert_eq!(processing.status, RequestStatus::Processing);
        assert_eq!(processing.payment_method, Some(PaymentMethod::Card));
        assert!(processing.payment_date.is_none());

        // Switching method while processing is allowed
        let processing = service.begin_payment(&request.id, PaymentMethod::Bank).unwrap();
        assert_eq!(processing.payment_method, Some(PaymentMethod::Bank));

        let paid = service.complete_payment(&request.id).unwrap();
        assert!(paid.is_paid());
        assert!(paid.payment_date.is_some());

        assert!(service
            .begin_payment(&request.id, PaymentMethod::Card)
            .unwrap_err()
            .is_validation());
        assert!(service.cancel(&request.id).unwrap_err().is_validation());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[3]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("status: \"processing\" -> \"paid\""));
    }

    #[test]
    fn test_complete_requires_processing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);
        let request = service.create(new_request()).unwrap();

        assert!(service
            .complete_payment(&request.id)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_audit_failure_does_not_fail_stored_changes() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("requests.json")).unwrap();
        // A directory cannot be opened for appending
        let audit = AuditLogger::new(temp_dir.path().to_path_buf());
        let storage = Storage::with_store(Box::new(store), audit);
        let service = RequestService::new(&storage);

        let request = service.create(new_request()).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);

        let cancelled = service.cancel(&request.id).unwrap();
        assert_eq!(cancelled.status, RequestStatus::Cancelled);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_pay_in_one_step() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);
        let request = service.create(new_request()).unwrap();

        let paid = service.pay(&request.id, PaymentMethod::Mobile).unwrap();
        assert_eq!(paid.status, RequestStatus::Paid);
        assert_eq!(paid.payment_method, Some(PaymentMethod::Mobile));
    }

    #[test]
    fn test_cancel_and_notes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);
        let request = service.create(new_request()).unwrap();

        let noted = service.add_note(&request.id, " thanks ").unwrap();
        assert_eq!(noted.note.as_deref(), Some("thanks"));
        let cleared = service.add_note(&request.id, "").unwrap();
        assert_eq!(cleared.note, None);

        let cancelled = service.cancel(&request.id).unwrap();
        assert_eq!(cancelled.status, RequestStatus::Cancelled);
        assert!(service.add_note(&request.id, "late").unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RequestService::new(&storage);
        let request = service.create(new_request()).unwrap();

        let found = service.find(request.id.short()).unwrap();
        assert_eq!(found.id, request.id);
        assert!(service.find("zzzzzzzz").unwrap_err().is_not_found());
        assert!(service.get(&RequestId::new("missing")).unwrap_err().is_not_found());
    }
}
