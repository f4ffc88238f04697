//! Service layer for BuzzPay
//!
//! Business logic on top of the storage layer: the request lifecycle,
//! recipient verification and sharing.

pub mod request;
pub mod share;
pub mod verification;

pub use request::RequestService;
pub use share::{
    share_link, Clipboard, ShareOutcome, ShareService, ShareTarget, SystemClipboard,
    SystemShareTarget,
};
pub use verification::{RecipientSession, VerificationOutcome, VerificationService};
