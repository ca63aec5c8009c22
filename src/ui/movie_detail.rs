//! Movie detail screen rendering
//!
//! Shows the poster beside the movie's metadata: title, release date,
//! rating, the scrollable overview, and the trailer link once its key has
//! been resolved.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::tmdb::youtube_url;
use crate::ui::widgets::Poster;

/// Renders the movie detail screen
pub fn render(frame: &mut Frame, app: &App, movie_id: u64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // poster + details
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    let Some(movie) = app.movie_by_id(movie_id) else {
        let missing = Paragraph::new("Movie not found")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(missing, chunks[0]);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[0]);

    let poster_block = Block::default().borders(Borders::ALL).title(" Poster ");
    let inner = poster_block.inner(columns[0]);
    frame.render_widget(poster_block, columns[0]);
    frame.render_widget(
        Poster::new(app.poster_for(movie)).failed(app.poster_failed(movie)),
        inner,
    );

    render_details(frame, app, movie_id, columns[1]);

    let hints = Paragraph::new("j/k: scroll overview  c: cast & crew  Esc: back  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[1]);
}

/// Renders the metadata column: title, release, rating, trailer, overview
fn render_details(frame: &mut Frame, app: &App, movie_id: u64, area: Rect) {
    let movie = match app.movie_by_id(movie_id) {
        Some(movie) => movie,
        None => return,
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // title / release / rating / trailer
            Constraint::Min(3),    // overview
        ])
        .split(area);

    let mut header_lines = vec![
        Line::from(Span::styled(
            movie.display_title().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Release Date: {}",
            movie.release_date.as_deref().unwrap_or("No info")
        )),
    ];
    if let (Some(average), Some(count)) = (movie.vote_average, movie.vote_count) {
        header_lines.push(Line::from(vec![
            Span::styled(format!("★ {:.1}", average), Style::default().fg(Color::Yellow)),
            Span::styled(format!("  ({} votes)", count), Style::default().fg(Color::Gray)),
        ]));
    }
    header_lines.push(trailer_line(app, movie_id));

    let header = Paragraph::new(header_lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(header, sections[0]);

    let overview = Paragraph::new(movie.overview.as_deref().unwrap_or("No overview"))
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll_offset, 0))
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
    frame.render_widget(overview, sections[1]);
}

/// The trailer line: a YouTube link once resolved, a note when the movie
/// has none, a spinner text while the key is being fetched
fn trailer_line(app: &App, movie_id: u64) -> Line<'static> {
    match app.trailer_keys.get(&movie_id) {
        Some(Some(key)) => Line::from(vec![
            Span::raw("Trailer: "),
            Span::styled(youtube_url(key), Style::default().fg(Color::Green)),
        ]),
        Some(None) => Line::from(Span::styled(
            "No trailer available",
            Style::default().fg(Color::Gray),
        )),
        None => Line::from(Span::styled(
            "Fetching trailer...",
            Style::default().fg(Color::DarkGray),
        )),
    }
}
