//! Search results screen rendering
//!
//! Renders the paginated result list on the left and the poster of the
//! selected movie on the right. Moving past the end of the list triggers
//! another page fetch; the footer shows the pagination state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::widgets::Poster;

/// Renders the results screen
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // list + poster
            Constraint::Length(1), // pagination footer
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[0]);

    render_result_list(frame, app, columns[0]);

    // Poster of the selected movie
    let poster_block = Block::default().borders(Borders::ALL).title(" Poster ");
    let inner = poster_block.inner(columns[1]);
    frame.render_widget(poster_block, columns[1]);
    if let Some(movie) = app.selected_movie() {
        frame.render_widget(
            Poster::new(app.poster_for(movie)).failed(app.poster_failed(movie)),
            inner,
        );
    }

    let footer_text = if app.is_loading {
        "Loading more...".to_string()
    } else if app.is_finished {
        format!("{} results (end of list)", app.results.len())
    } else {
        format!("{} results (scroll down for more)", app.results.len())
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);

    let hints = Paragraph::new("↑/k ↓/j: move  Enter: details  c: cast & crew  /: new search  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

/// Renders the scrolling movie list with the current selection highlighted
fn render_result_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|movie| {
            let year = movie
                .release_year()
                .map(|y| format!(" ({})", y))
                .unwrap_or_default();
            let rating = movie
                .vote_average
                .map(|v| format!("  ★ {:.1}", v))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(movie.display_title().to_string()),
                Span::styled(year, Style::default().fg(Color::Gray)),
                Span::styled(rating, Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    let title = format!(" Results for \"{}\" ", app.current_query);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}
