//! Text input widget
//!
//! A single-line field with a cursor. The cursor counts characters, not
//! bytes, so names with accents edit cleanly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Editable text with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content and put the cursor at the end
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.chars().count();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.content.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.content.chars().count());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }
}

/// Renders a [`TextInput`] with a label, placeholder and validity colour
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    label: &'a str,
    placeholder: &'a str,
    valid: bool,
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput, label: &'a str) -> Self {
        Self {
            input,
            label,
            placeholder: "",
            valid: false,
            focused: true,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = (self.label.chars().count() + 2) as u16;
        let label_line = Line::from(vec![
            Span::styled(self.label, Style::default().fg(Color::Cyan)),
            Span::raw(": "),
        ]);
        buf.set_line(area.x, area.y, &label_line, label_width);

        let input_start = area.x + label_width;
        let content = self.input.value();

        if content.is_empty() {
            buf.set_string(
                input_start,
                area.y,
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            );
        } else {
            let color = if self.valid { Color::Green } else { Color::Red };
            buf.set_string(input_start, area.y, content, Style::default().fg(color));
        }

        if self.focused {
            let cursor_x = input_start + self.input.cursor() as u16;
            if cursor_x < area.x + area.width {
                let cursor_char = content.chars().nth(self.input.cursor()).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    cursor_char.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte() {
        let mut input = TextInput::new();
        input.set("Zoë");
        assert_eq!(input.cursor(), 3);

        input.insert('!');
        assert_eq!(input.value(), "Zoë!");

        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "Zo!");

        input.move_start();
        assert!(input.delete());
        assert_eq!(input.value(), "o!");
        input.move_end();
        assert!(!input.delete());
    }
}
