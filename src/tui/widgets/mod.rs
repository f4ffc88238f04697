//! Reusable widgets for the TUI

pub mod input;
pub mod notification;

pub use input::{TextInput, TextInputWidget};
pub use notification::{Notification, NotificationQueue, NotificationType, NotificationWidget};
