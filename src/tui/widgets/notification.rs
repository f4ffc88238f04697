//! Toast notification widget
//!
//! Shows the outcome of a submit or share for a few seconds.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Severity of a toast, which picks its colour and title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Neutral status, e.g. a link was copied
    Info,
    /// A request was created or shared
    Success,
    /// The action worked only partly, e.g. share fell back to the clipboard
    Warning,
    /// Submit or share failed
    Error,
}

impl NotificationType {
    /// Border and title colour
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// Block title with a one-character marker
    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => " i Info ",
            Self::Success => " + Success ",
            Self::Warning => " ! Warning ",
            Self::Error => " x Error ",
        }
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// Text shown in the toast
    pub message: String,
    /// Severity
    pub notification_type: NotificationType,
    /// When the toast started showing; reset when it reaches the front
    pub created_at: Instant,
    /// How long it stays on screen
    pub duration: Duration,
}

impl Notification {
    /// A toast shown for four seconds
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
        }
    }

    /// Informational toast
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    /// Success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    /// Warning toast
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    /// Error toast, kept up a little longer
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error).with_duration(Duration::from_secs(6))
    }

    /// Override how long the toast is shown
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast has been shown for its full duration
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Renders one toast over whatever is underneath
pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    /// Widget for `notification`
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let kind = self.notification.notification_type;

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(kind.color()))
            .title(kind.title())
            .title_style(
                Style::default()
                    .fg(kind.color())
                    .add_modifier(Modifier::BOLD),
            );

        Paragraph::new(self.notification.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Notifications waiting to be shown, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    /// An empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast behind any already waiting
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drop the current notification once it has been shown long enough
    ///
    /// Only the front one is timed; the rest wait their turn.
    pub fn remove_expired(&mut self) {
        if self.notifications.first().is_some_and(|n| n.is_expired()) {
            self.notifications.remove(0);
            if let Some(next) = self.notifications.first_mut() {
                next.created_at = Instant::now();
            }
        }
    }

    /// The toast to draw now, if any
    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Number of queued toasts, including the visible one
    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}
