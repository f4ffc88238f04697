//! Recipient phone verification
//!
//! Before payment details are shown, the person opening a request confirms
//! their phone number. Matching the recipient unlocks the payment details;
//! matching the sender sends them to the receipt instead.

use tracing::debug;

use crate::config::WizardSettings;
use crate::error::BuzzPayResult;
use crate::models::{phone, PaymentRequest, RequestId};
use crate::storage::Storage;
use crate::wizard::flows::VERIFY_PHONE;
use crate::wizard::{verification_wizard, Clock, WizardController};

/// Result of comparing the entered phone with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The recipient; payment details are unlocked
    Verified,
    /// The sender; show the receipt
    Sender,
    /// Neither; the field has been cleared
    Mismatch,
}

/// One recipient's verification attempt on one request
pub struct RecipientSession<C: Clock> {
    request: PaymentRequest,
    wizard: WizardController<C>,
    verified: bool,
}

impl<C: Clock> RecipientSession<C> {
    pub fn new(request: PaymentRequest, settings: &WizardSettings, clock: C) -> BuzzPayResult<Self> {
        Ok(Self {
            request,
            wizard: verification_wizard(settings, clock)?,
            verified: false,
        })
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn wizard(&self) -> &WizardController<C> {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut WizardController<C> {
        &mut self.wizard
    }

    /// Type into the phone field
    pub fn set_phone(&mut self, value: impl Into<String>) -> BuzzPayResult<()> {
        self.wizard.set_field_value(0, value)
    }

    /// Whether the payment details may be shown
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Compare the entered phone with the request
    ///
    /// Fails with a validation error while the phone step is incomplete.
    pub fn verify(&mut self) -> BuzzPayResult<VerificationOutcome> {
        let entered = self
            .wizard
            .submit(|form| Ok(form.get(VERIFY_PHONE).to_string()))?;

        let outcome = if phone::matches(&self.request.recipient_phone, &entered) {
            self.verified = true;
            VerificationOutcome::Verified
        } else if phone::matches(&self.request.sender_phone, &entered) {
            VerificationOutcome::Sender
        } else {
            self.wizard.set_field_value(0, "")?;
            VerificationOutcome::Mismatch
        };

        debug!(id = %self.request.id, ?outcome, "verified phone");
        Ok(outcome)
    }
}

/// Opens verification sessions against stored requests
pub struct VerificationService<'a> {
    storage: &'a Storage,
}

impl<'a> VerificationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn open_session<C: Clock>(
        &self,
        id: &RequestId,
        settings: &WizardSettings,
        clock: C,
    ) -> BuzzPayResult<RecipientSession<C>> {
        let request = self.storage.store().get(id)?;
        RecipientSession::new(request, settings, clock)
    }
}
