//! Application state for the TUI
//!
//! One creation wizard per session. The text input mirrors the focused
//! step; every edit is pushed into the controller, and ticks let the
//! controller's debounce move the active step forward.

use crate::config::Settings;
use crate::error::BuzzPayResult;
use crate::models::PaymentRequest;
use crate::services::{Clipboard, RequestService, ShareOutcome, ShareService, ShareTarget};
use crate::storage::Storage;
use crate::wizard::{request_wizard, Clock, SystemClock, TransitionKind, WizardController};

use super::widgets::{Notification, NotificationQueue, TextInput};

/// Main application state
pub struct App<'a, C: Clock = SystemClock> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub wizard: WizardController<C>,
    /// Editor for the focused step
    pub input: TextInput,
    /// Step the input is editing; never past the active step
    pub focus: usize,
    pub notifications: NotificationQueue,
    pub status_message: Option<String>,
    /// Set once the request has been created
    pub created: Option<PaymentRequest>,
    pub should_quit: bool,
    share_target: Box<dyn ShareTarget>,
    clipboard: Box<dyn Clipboard>,
}

impl<'a, C: Clock> App<'a, C> {
    pub fn new(
        storage: &'a Storage,
        settings: &'a Settings,
        clock: C,
        share_target: Box<dyn ShareTarget>,
        clipboard: Box<dyn Clipboard>,
    ) -> BuzzPayResult<Self> {
        Ok(Self {
            storage,
            settings,
            wizard: request_wizard(&settings.wizard, clock)?,
            input: TextInput::new(),
            focus: 0,
            notifications: NotificationQueue::new(),
            status_message: None,
            created: None,
            should_quit: false,
            share_target,
            clipboard,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Push the input's text into the focused step
    pub fn commit_input(&mut self) -> BuzzPayResult<()> {
        self.wizard
            .set_field_value(self.focus, self.input.value().to_string())?;
        // An edit can rewind the active step below the focus.
        if self.focus > self.wizard.current_step() {
            self.set_focus(self.wizard.current_step());
        }
        self.status_message = None;
        Ok(())
    }

    /// Let a due transition fire
    pub fn on_tick(&mut self) {
        if let Some(kind) = self.wizard.tick() {
            match kind {
                TransitionKind::Advance => {
                    self.set_focus(self.wizard.current_step());
                }
                TransitionKind::HideIdle => {
                    if self.wizard.is_hidden(self.wizard.current_step()) {
                        self.status_message =
                            Some("Description skipped. Press Enter to create the request.".into());
                    }
                }
            }
        }
        self.notifications.remove_expired();
    }

    pub fn focus_previous(&mut self) {
        if let Some(index) = (0..self.focus).rev().find(|&i| !self.wizard.is_hidden(i)) {
            self.set_focus(index);
        }
    }

    pub fn focus_next(&mut self) {
        if self.focus < self.wizard.current_step() {
            self.set_focus(self.focus + 1);
        }
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = index;
        self.input.set(self.wizard.value(index));
    }

    /// Create the request if the wizard is complete, then share it
    pub fn submit(&mut self) {
        if self.created.is_some() {
            return;
        }

        let service = RequestService::new(self.storage);
        let request = match service.submit(&self.wizard) {
            Ok(request) => request,
            Err(e) => {
                self.notifications.push(Notification::error(e.to_string()));
                return;
            }
        };

        self.notifications.push(Notification::success(format!(
            "Request {} created",
            request.id.short()
        )));
        self.created = Some(request);
        self.share();
    }

    /// Share the created request through WhatsApp or the clipboard
    pub fn share(&mut self) {
        let Some(request) = self.created.as_ref() else {
            return;
        };

        let sharer = ShareService::from_settings(self.settings);
        let notification = match sharer.share(
            request,
            self.share_target.as_ref(),
            self.clipboard.as_mut(),
        ) {
            Ok(ShareOutcome::Opened { .. }) => Notification::info("Opened WhatsApp"),
            Ok(ShareOutcome::Copied { notice }) => Notification::warning(notice),
            Err(e) => Notification::error(e.to_string()),
        };
        self.notifications.push(notification);
    }

    /// The link shown after creation
    pub fn share_link(&self) -> Option<String> {
        let sharer = ShareService::from_settings(self.settings);
        self.created.as_ref().map(|request| sharer.link(request))
    }
}
