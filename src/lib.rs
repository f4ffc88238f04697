//! BuzzPay - peer-to-peer payment requests from the terminal
//!
//! A sender fills in a short guided wizard (who they are, who should pay,
//! how much and what for). The request is stored, and a share message with
//! a link goes out over WhatsApp. The recipient confirms their phone number
//! before the payment details unlock, pays, and both sides get a receipt.
//!
//! # Architecture
//!
//! - `wizard`: the step-by-step form controller with debounced auto-advance
//! - `models`: payment requests, money, phone numbers
//! - `storage`: record store backends (local JSON file or a hosted REST API)
//! - `services`: request lifecycle, recipient verification, sharing
//! - `audit`: append-only audit log of every change
//! - `config`: paths and settings
//! - `cli`, `tui`, `display`, `export`: the user-facing surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use buzzpay::config::{BuzzPayPaths, Settings};
//! use buzzpay::storage::Storage;
//!
//! let paths = BuzzPayPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::{BuzzPayError, BuzzPayResult};
