//! Search screen rendering
//!
//! Renders the main view: the query input box, the "Recommended for you"
//! trending strip, the poster of the highlighted trending movie, and the
//! status line ("No searches made", "No results", API errors).

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::widgets::Poster;

/// Renders the search screen
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // input box
            Constraint::Length(4),  // trending strip
            Constraint::Min(8),     // trending poster
            Constraint::Length(1),  // status line
            Constraint::Length(1),  // key hints
        ])
        .split(frame.area());

    // Input box with a block cursor appended
    let input_line = Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);
    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search Movie ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(input, chunks[0]);

    render_trending_strip(frame, app, chunks[1]);

    // Poster of the highlighted trending movie
    if let Some(movie) = app.trending.get(app.trending_selected) {
        let poster_block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", movie.display_title()));
        let inner = poster_block.inner(chunks[2]);
        frame.render_widget(poster_block, chunks[2]);
        frame.render_widget(
            Poster::new(app.poster_for(movie)).failed(app.poster_failed(movie)),
            inner,
        );
    }

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(status, chunks[3]);

    let hints = Paragraph::new("Enter: search  ←/→: trending  F1: help  Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[4]);
}

/// Renders the horizontal strip of today's trending movies
fn render_trending_strip(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recommended for you ");

    if app.trending.is_empty() {
        let empty = Paragraph::new("Nothing trending right now")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut spans = Vec::new();
    for (i, movie) in app.trending.iter().enumerate() {
        let style = if i == app.trending_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", truncate(movie.display_title(), 18)), style));
        spans.push(Span::raw(" "));
    }

    let strip = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(strip, area);
}

/// Truncates long titles with an ellipsis
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_title_unchanged() {
        assert_eq!(truncate("Alien", 18), "Alien");
    }

    #[test]
    fn test_truncate_long_title_gets_ellipsis() {
        let truncated = truncate("The Lord of the Rings: The Return of the King", 18);
        assert!(truncated.ends_with('…'));
        assert_eq!(truncated.chars().count(), 18);
    }
}
