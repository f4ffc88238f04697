//! Layout definitions for the TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions: header, wizard body, status line
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Steps
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            main: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// Toast area in the top-right corner of `r`
pub fn toast_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_screen() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status_bar.y, 23);
        assert_eq!(layout.main.height, 20);
    }

    #[test]
    fn test_toast_clamped() {
        let area = toast_rect(50, 5, Rect::new(0, 0, 40, 3));
        assert_eq!(area, Rect::new(0, 0, 40, 3));
    }
}
