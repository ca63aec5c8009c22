//! Cast and crew screen rendering
//!
//! Renders the credits for a movie as two tabs: cast (with characters) and
//! crew (with jobs), scrollable with j/k.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, CreditsTab};
use crate::data::CreditEntry;

/// Renders the credits screen
pub fn render(frame: &mut Frame, app: &App, movie_id: u64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Min(3),    // listing
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    match app.credits.get(&movie_id) {
        Some(credits) => {
            let entries = match app.credits_tab {
                CreditsTab::Cast => &credits.cast,
                CreditsTab::Crew => &credits.crew,
            };
            render_entries(frame, app, entries, chunks[1]);
        }
        None => {
            let loading = Paragraph::new("Loading cast & crew...")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[1]);
        }
    }

    let hints = Paragraph::new("Tab: cast/crew  j/k: scroll  Esc: back  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

/// Renders the Cast | Crew tab header
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab_style = |active: bool| {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let tabs = Line::from(vec![
        Span::styled(" Cast ", tab_style(app.credits_tab == CreditsTab::Cast)),
        Span::raw("  "),
        Span::styled(" Crew ", tab_style(app.credits_tab == CreditsTab::Crew)),
    ]);
    frame.render_widget(Paragraph::new(tabs), area);
}

/// Renders the scrolled slice of credit entries
fn render_entries(frame: &mut Frame, app: &App, entries: &[CreditEntry], area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let offset = app.credits_scroll.min(entries.len().saturating_sub(1));

    let items: Vec<ListItem> = entries
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(|entry| {
            let mut spans = vec![Span::styled(
                entry.display_name().to_string(),
                Style::default().fg(Color::White),
            )];
            if let Some(role) = entry.role() {
                spans.push(Span::styled(
                    format!("  as {}", role),
                    Style::default().fg(Color::Gray),
                ));
            }
            if let Some(dept) = entry.known_for_department.as_deref() {
                spans.push(Span::styled(
                    format!("  [{}]", dept),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let count = entries.len();
    let title = format!(" {} entries ", count);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}
