//! TUI views

pub mod status_bar;
pub mod wizard;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use super::layout::{toast_rect, AppLayout};
use super::widgets::NotificationWidget;
use crate::wizard::Clock;

/// Render the whole screen
pub fn render<C: Clock>(frame: &mut Frame, app: &App<'_, C>) {
    let layout = AppLayout::new(frame.area());

    let header = Paragraph::new("BuzzPay")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout.header);

    if app.created.is_some() {
        wizard::render_created(frame, app, layout.main);
    } else {
        wizard::render(frame, app, layout.main);
    }

    status_bar::render(frame, app, layout.status_bar);

    if let Some(notification) = app.notifications.current() {
        let area = toast_rect(48, 5, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}
