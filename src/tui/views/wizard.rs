//! Wizard body: echoed steps above, the focused input below

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::widgets::TextInputWidget;
use crate::wizard::{Clock, StepMode};

pub fn render<C: Clock>(frame: &mut Frame, app: &App<'_, C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New payment request ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;

    for visible in app.wizard.visible_steps() {
        if y >= bottom {
            break;
        }
        let row = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1);

        if visible.index == app.focus {
            let widget = TextInputWidget::new(&app.input, visible.step.label)
                .placeholder(visible.step.placeholder)
                .valid(visible.valid);
            frame.render_widget(widget, row);
            y += 1;

            if !visible.valid && y < bottom {
                let hint = Line::from(Span::styled(
                    format!("  {}", visible.step.rule.hint()),
                    Style::default().fg(Color::DarkGray),
                ));
                frame.render_widget(
                    Paragraph::new(hint),
                    Rect::new(inner.x + 1, y, row.width, 1),
                );
                y += 1;
            }
        } else {
            let marker = match (visible.mode, visible.valid) {
                (StepMode::Active, _) => Span::styled("> ", Style::default().fg(Color::Cyan)),
                (StepMode::ReadOnly, true) => Span::styled("✓ ", Style::default().fg(Color::Green)),
                (StepMode::ReadOnly, false) => Span::styled("! ", Style::default().fg(Color::Red)),
            };
            let line = Line::from(vec![
                marker,
                Span::styled(
                    format!("{}: ", visible.step.label),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    visible.value.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), row);
            y += 1;
        }
    }

    // The active step is hidden once it idles empty; typing brings it back.
    let current = app.wizard.current_step();
    if app.wizard.is_hidden(current) && app.focus == current && y < bottom {
        let line = Line::from(Span::styled(
            format!(
                "  {} skipped. Type to add one.",
                app.wizard.steps()[current].label
            ),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
        );
    }
}

/// Shown after the request is created
pub fn render_created<C: Clock>(frame: &mut Frame, app: &App<'_, C>, area: Rect) {
    let Some(request) = app.created.as_ref() else {
        return;
    };
    let currency = app.settings.currency_symbol.as_str();

    let mut lines = vec![
        Line::from(Span::styled(
            "Request created",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(format!("Recipient: {}", request.recipient)),
        Line::raw(format!(
            "Amount:    {}",
            request.amount.format_with_symbol(currency)
        )),
    ];
    if !request.description.is_empty() {
        lines.push(Line::raw(format!("For:       {}", request.description)));
    }
    if let Some(link) = app.share_link() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(format!("Link: {}", link)));
    }

    let block = Block::default().borders(Borders::ALL).title(" Done ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
