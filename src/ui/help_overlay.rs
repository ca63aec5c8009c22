//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let area = frame.area();

    // Calculate centered overlay area
    let overlay_width = 54;
    let overlay_height = 18;
    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Search",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        help_line("type / Backspace", "Edit the query"),
        help_line("Enter", "Search (or open trending pick)"),
        help_line("←/→", "Move trending selection"),
        Line::from(""),
        Line::from(Span::styled(
            "Results & Details",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        help_line("↑/k, ↓/j", "Move selection / scroll"),
        help_line("Enter", "Open movie details"),
        help_line("c", "Cast & crew"),
        help_line("Tab", "Switch cast/crew tab"),
        help_line("/", "New search"),
        Line::from(""),
        help_line("F1 or ?", "Toggle this help"),
        help_line("Esc", "Go back / Close"),
        help_line("q", "Quit"),
    ];

    let help = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(help, overlay_area);
}

/// Formats a single keybinding line
fn help_line(keys: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<18}", keys),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}

/// Computes a centered rectangle of the given size within `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(54, 18, area);
        assert_eq!(rect.width, 54);
        assert_eq!(rect.height, 18);
        assert!(rect.x + rect.width <= 100);
        assert!(rect.y + rect.height <= 40);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(54, 18, area);
        assert!(rect.width <= 30);
        assert!(rect.height <= 10);
    }
}
