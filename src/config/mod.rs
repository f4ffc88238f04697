//! Configuration module for BuzzPay
//!
//! - Platform path resolution
//! - User settings persistence and environment overrides

pub mod paths;
pub mod settings;

pub use paths::BuzzPayPaths;
pub use settings::{Settings, StoreBackend, StoreSettings, WizardSettings};
