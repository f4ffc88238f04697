//! Payment request model
//!
//! One canonical schema for the record the external store holds. Optional
//! fields are explicit `Option`s so every backend agrees on the shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::RequestId;
use super::money::Money;
use super::payment::PaymentMethod;

/// Lifecycle status of a payment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created, waiting for the recipient
    #[default]
    Pending,
    /// The recipient picked a payment method
    Processing,
    /// Payment recorded
    Paid,
    /// Withdrawn by the sender
    Cancelled,
}

impl RequestStatus {
    /// Paid and cancelled requests accept no further payment changes
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Processing => write!(f, "Processing"),
            Self::Paid => write!(f, "Paid"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A payment request as stored by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Identifier assigned by the store
    pub id: RequestId,

    /// Requested amount
    pub amount: Money,

    /// What the money is for (empty when the sender skipped it)
    #[serde(default)]
    pub description: String,

    /// Recipient display name
    pub recipient: String,

    /// Sender display name
    pub sender: String,

    /// Sender phone, normalized digits
    pub sender_phone: String,

    /// Recipient phone, normalized digits
    #[serde(default)]
    pub recipient_phone: String,

    /// Current status
    pub status: RequestStatus,

    /// Set by the store on insert
    pub created_at: DateTime<Utc>,

    /// Set when the recipient chooses a method
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,

    /// Set when the payment completes
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,

    /// Free-text note, editable after the fact
    #[serde(default)]
    pub note: Option<String>,
}

impl PaymentRequest {
    /// Build the stored record from an insert payload
    pub fn from_new(id: RequestId, new: NewPaymentRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: new.amount,
            description: new.description,
            recipient: new.recipient,
            sender: new.sender,
            sender_phone: new.sender_phone,
            recipient_phone: new.recipient_phone,
            status: new.status,
            created_at,
            payment_method: None,
            payment_date: None,
            note: None,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &RequestUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(method) = &update.payment_method {
            self.payment_method = Some(method.clone());
        }
        if let Some(date) = update.payment_date {
            self.payment_date = Some(date);
        }
        if let Some(note) = &update.note {
            self.note = note.clone();
        }
    }

    /// Whether the request has been paid
    pub fn is_paid(&self) -> bool {
        self.status == RequestStatus::Paid
    }
}

/// Insert payload for a new payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentRequest {
    pub amount: Money,
    pub description: String,
    pub recipient: String,
    pub sender: String,
    pub sender_phone: String,
    pub recipient_phone: String,
    pub status: RequestStatus,
}

impl NewPaymentRequest {
    /// Validate the insert payload
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if !self.amount.is_positive() {
            return Err(RequestValidationError::NonPositiveAmount(self.amount));
        }
        if self.sender.trim().chars().count() < 2 {
            return Err(RequestValidationError::NameTooShort("sender"));
        }
        if self.recipient.trim().chars().count() < 2 {
            return Err(RequestValidationError::NameTooShort("recipient"));
        }
        if self.sender_phone.is_empty() {
            return Err(RequestValidationError::MissingPhone("sender"));
        }
        if self.recipient_phone.is_empty() {
            return Err(RequestValidationError::MissingPhone("recipient"));
        }
        if self.status != RequestStatus::Pending {
            return Err(RequestValidationError::NotPending(self.status));
        }
        Ok(())
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,

    /// `Some(None)` clears the note and is sent as `null`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub note: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent field
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl RequestUpdate {
    /// Update only the status
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Update only the note; blank text clears it
    pub fn note(note: impl Into<String>) -> Self {
        let note = note.into();
        let note = if note.trim().is_empty() { None } else { Some(note) };
        Self {
            note: Some(note),
            ..Self::default()
        }
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.payment_method.is_none()
            && self.payment_date.is_none()
            && self.note.is_none()
    }
}

/// Validation errors for new payment requests
#[derive(Debug, Clone, PartialEq)]
pub enum RequestValidationError {
    NonPositiveAmount(Money),
    NameTooShort(&'static str),
    MissingPhone(&'static str),
    NotPending(RequestStatus),
}

impl fmt::Display for RequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive (got {})", amount)
            }
            Self::NameTooShort(who) => {
                write!(f, "The {} name needs at least 2 characters", who)
            }
            Self::MissingPhone(who) => write!(f, "The {} phone number is required", who),
            Self::NotPending(status) => {
                write!(f, "New requests must start as Pending, not {}", status)
            }
        }
    }
}

impl std::error::Error for RequestValidationError {}
