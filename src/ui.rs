use ratatui::{prelude::*, widgets::*};

use crate::app::state::BackendStatus;

/// Border style for a text field: yellow while typing, cyan when focused
pub fn field_style(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Renders a single-line text input
pub fn render_input<'a>(content: &'a str, title: &'a str, style: Style) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .divider("|")
}

/// Password echo
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

/// Status bar badge for the last health probe
pub fn backend_badge(status: &BackendStatus) -> Span<'static> {
    match status {
        BackendStatus::Unknown => Span::styled(" backend: ? ", Style::default().fg(Color::DarkGray)),
        BackendStatus::Online => Span::styled(" backend: online ", Style::default().fg(Color::Green)),
        BackendStatus::Offline(_) => {
            Span::styled(" backend: offline ", Style::default().fg(Color::Red).bold())
        }
    }
}

/// Terminal column of the cursor inside a bordered input
pub fn cursor_x(area: Rect, text: &str, byte_pos: usize) -> u16 {
    let cols = text[..byte_pos.min(text.len())].chars().count() as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    (area.x + cols + 1).min(max_x)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask("pässword"), "********");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_cursor_x_clamps_to_box() {
        let area = Rect::new(10, 0, 8, 3);
        assert_eq!(cursor_x(area, "abc", 3), 14);
        assert_eq!(cursor_x(area, "abcdefghijkl", 12), 16);
        assert_eq!(cursor_x(area, "ñb", 2), 12);
    }
}
