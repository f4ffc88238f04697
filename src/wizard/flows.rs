//! The two wizards BuzzPay runs
//!
//! Request creation (six steps, sender first) and recipient verification
//! (one phone step with a longer debounce).

use crate::config::WizardSettings;
use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::{Money, NewPaymentRequest, PhoneNumber, RequestStatus};

use super::clock::Clock;
use super::controller::WizardController;
use super::form::FormData;
use super::step::{Rule, StepDef};

pub const SENDER: &str = "sender";
pub const SENDER_PHONE: &str = "sender_phone";
pub const RECIPIENT: &str = "recipient";
pub const RECIPIENT_PHONE: &str = "recipient_phone";
pub const AMOUNT: &str = "amount";
pub const DESCRIPTION: &str = "description";
pub const VERIFY_PHONE: &str = "phone";

/// Steps of the request creation wizard, in order
pub fn request_steps(settings: &WizardSettings) -> Vec<StepDef> {
    let delay = settings.step_delay();
    vec![
        StepDef::new(SENDER, "Your Name", Rule::MinChars(2), delay)
            .with_placeholder("Enter your name"),
        StepDef::new(SENDER_PHONE, "Your Phone Number", Rule::Phone, delay)
            .with_placeholder("+1 555 123 4567"),
        StepDef::new(RECIPIENT, "Recipient Name", Rule::MinChars(2), delay)
            .with_placeholder("Who should pay?"),
        StepDef::new(RECIPIENT_PHONE, "Recipient Phone Number", Rule::Phone, delay)
            .with_placeholder("+1 555 765 4321"),
        StepDef::new(AMOUNT, "Amount", Rule::PositiveAmount, delay).with_placeholder("0.00"),
        StepDef::new(DESCRIPTION, "Description", Rule::NonEmpty, delay)
            .with_placeholder("What's it for?")
            .hide_when_idle(settings.hide_idle_description),
    ]
}

/// The single step of the recipient verification wizard
pub fn verification_steps(settings: &WizardSettings) -> Vec<StepDef> {
    vec![
        StepDef::new(VERIFY_PHONE, "Your Phone Number", Rule::Phone, settings.verify_delay())
            .with_placeholder("Enter your phone number"),
    ]
}

pub fn request_wizard<C: Clock>(
    settings: &WizardSettings,
    clock: C,
) -> BuzzPayResult<WizardController<C>> {
    WizardController::new(request_steps(settings), settings.idle_timeout(), clock)
}

pub fn verification_wizard<C: Clock>(
    settings: &WizardSettings,
    clock: C,
) -> BuzzPayResult<WizardController<C>> {
    WizardController::new(verification_steps(settings), settings.idle_timeout(), clock)
}

/// Build the insert payload from a completed creation form
///
/// Names and description are trimmed, phones normalized and the amount
/// parsed. A hidden (blank) description becomes an empty string.
pub fn assemble_request(form: &FormData) -> BuzzPayResult<NewPaymentRequest> {
    let phone = |key: &str, label: &str| {
        PhoneNumber::parse(form.get(key))
            .map(PhoneNumber::into_digits)
            .map_err(|e| BuzzPayError::Validation(format!("{}: {}", label, e)))
    };

    let amount = Money::parse(form.get(AMOUNT))
        .map_err(|e| BuzzPayError::Validation(format!("Amount: {}", e)))?;

    Ok(NewPaymentRequest {
        amount,
        description: form.get(DESCRIPTION).trim().to_string(),
        recipient: form.get(RECIPIENT).trim().to_string(),
        sender: form.get(SENDER).trim().to_string(),
        sender_phone: phone(SENDER_PHONE, "Your Phone Number")?,
        recipient_phone: phone(RECIPIENT_PHONE, "Recipient Phone Number")?,
        status: RequestStatus::Pending,
    })
}
