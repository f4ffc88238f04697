//! Terminal User Interface
//!
//! An interactive ratatui front end for the request creation wizard.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
