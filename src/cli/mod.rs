//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod export;
pub mod request;

pub use export::{handle_export_command, ExportArgs};
pub use request::{handle_request_command, RequestCommands};
