//! Core data models for BuzzPay
//!
//! The payment request record, money, phone numbers and payment methods.

pub mod ids;
pub mod money;
pub mod payment;
pub mod phone;
pub mod request;

pub use ids::RequestId;
pub use money::Money;
pub use payment::PaymentMethod;
pub use phone::PhoneNumber;
pub use request::{NewPaymentRequest, PaymentRequest, RequestStatus, RequestUpdate};
