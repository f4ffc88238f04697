//! Status bar view
//!
//! Step progress, the latest status message and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;
use crate::wizard::Clock;

pub fn render<C: Clock>(frame: &mut Frame, app: &App<'_, C>, area: Rect) {
    let mut spans = vec![];

    if app.created.is_some() {
        spans.push(Span::styled(
            " Created ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        let total = app.wizard.steps().len();
        let color = if app.wizard.is_complete() {
            Color::Green
        } else {
            Color::Yellow
        };
        spans.push(Span::styled(
            format!(" Step {}/{} ", app.wizard.current_step() + 1, total),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = if app.created.is_some() {
        " s:Share again  Enter/Esc:Quit "
    } else {
        " ↑↓:Move  Enter:Create  Esc:Quit "
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
