//! Application state management for Reelvault
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and state transitions between the search, results, movie
//! detail, and credits views.

use std::collections::{HashMap, HashSet};

use crossterm::event::{KeyCode, KeyEvent};
use image::DynamicImage;

use crate::cache::{DiskImageCache, TimeUnit};
use crate::cli::StartupConfig;
use crate::data::{poster_cache_id, Credits, Movie, PosterClient, TmdbClient};
use crate::fetcher::{PosterFetcher, PosterMessage};

/// Directory name for the poster cache under the platform cache root
const CACHE_DIR_NAME: &str = "reelvault";

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching trending movies
    Loading,
    /// Search view with input box and trending strip
    Search,
    /// Search results list
    Results,
    /// Detail view for a movie
    MovieDetail(u64),
    /// Cast and crew view for a movie
    CreditsView(u64),
}

/// Which credits listing is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditsTab {
    Cast,
    Crew,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Search input buffer
    pub input: String,
    /// Status line text ("No searches made", errors, ...)
    pub status: String,
    /// Today's trending movies
    pub trending: Vec<Movie>,
    /// Selection in the trending strip
    pub trending_selected: usize,
    /// Search results accumulated across pages
    pub results: Vec<Movie>,
    /// Selection in the results list
    pub selected_index: usize,
    /// Query the current results belong to
    pub current_query: String,
    /// Last fetched result page (1-based)
    pub current_page: u32,
    /// A page fetch is in progress; blocks further pagination
    pub is_loading: bool,
    /// The API returned an empty page; no more pagination for this query
    pub is_finished: bool,
    /// Decoded posters keyed by cache id
    pub posters: HashMap<String, DynamicImage>,
    /// Poster ids that failed to fetch; rendered as placeholders
    pub failed_posters: HashSet<String>,
    /// Credits keyed by movie id
    pub credits: HashMap<u64, Credits>,
    /// Trailer keys by movie id; None means the movie has no trailer
    pub trailer_keys: HashMap<u64, Option<String>>,
    /// Active tab in the credits view
    pub credits_tab: CreditsTab,
    /// Scroll offset in the credits view
    pub credits_scroll: usize,
    /// Scroll offset for the overview in the detail view
    pub detail_scroll_offset: u16,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Search queued for the next tick (from --search or Enter)
    pending_search: Option<String>,
    /// Pagination queued for the next tick
    load_more_requested: bool,
    /// Movies whose trailer key fetch already ran (success or failure)
    trailer_attempted: HashSet<u64>,
    /// Movies whose credits fetch already ran (success or failure)
    credits_attempted: HashSet<u64>,
    /// TMDB API client
    tmdb: TmdbClient,
    /// Background poster pipeline (cache-first, then origin)
    fetcher: PosterFetcher,
}

impl App {
    /// Creates a new App from the startup configuration.
    ///
    /// Builds the poster cache once, here, with a fixed directory name and
    /// the day-based expiration from the CLI; the cache lives for the
    /// process lifetime.
    pub fn new(config: StartupConfig) -> Self {
        let cache = DiskImageCache::new(CACHE_DIR_NAME, TimeUnit::Days, config.cache_days);
        let tmdb = TmdbClient::new(config.api_key.clone());
        let fetcher = PosterFetcher::new(cache, PosterClient::new());
        Self::with_parts(config, tmdb, fetcher)
    }

    /// Creates a new App with custom client and fetcher (for testing)
    pub fn with_parts(config: StartupConfig, tmdb: TmdbClient, fetcher: PosterFetcher) -> Self {
        Self {
            state: AppState::Loading,
            input: String::new(),
            status: "No searches made".to_string(),
            trending: Vec::new(),
            trending_selected: 0,
            results: Vec::new(),
            selected_index: 0,
            current_query: String::new(),
            current_page: 1,
            is_loading: false,
            is_finished: false,
            posters: HashMap::new(),
            failed_posters: HashSet::new(),
            credits: HashMap::new(),
            trailer_keys: HashMap::new(),
            credits_tab: CreditsTab::Cast,
            credits_scroll: 0,
            detail_scroll_offset: 0,
            show_help: false,
            should_quit: false,
            pending_search: config.initial_query,
            load_more_requested: false,
            trailer_attempted: HashSet::new(),
            credits_attempted: HashSet::new(),
            tmdb,
            fetcher,
        }
    }

    /// Returns the currently selected search result, if any
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.results.get(self.selected_index)
    }

    /// Looks a movie up by id across results and trending
    pub fn movie_by_id(&self, movie_id: u64) -> Option<&Movie> {
        self.results
            .iter()
            .chain(self.trending.iter())
            .find(|movie| movie.id == movie_id)
    }

    /// Returns the decoded poster for a movie, if it has been resolved
    pub fn poster_for(&self, movie: &Movie) -> Option<&DynamicImage> {
        let path = movie.poster_path.as_deref()?;
        self.posters.get(&poster_cache_id(path))
    }

    /// Whether a movie's poster fetch has failed
    pub fn poster_failed(&self, movie: &Movie) -> bool {
        movie
            .poster_path
            .as_deref()
            .map(|path| self.failed_posters.contains(&poster_cache_id(path)))
            .unwrap_or(true)
    }

    /// Fetches today's trending movies and leaves the Loading state.
    ///
    /// Called once at startup. Errors land in the status line; the app is
    /// still usable for cached data and later searches.
    pub async fn load_initial_data(&mut self) {
        match self.tmdb.trending().await {
            Ok(movies) => {
                self.request_posters(&movies);
                self.trending = movies;
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
        self.state = AppState::Search;
    }

    /// Runs per-iteration async work: drains resolved posters, then any
    /// queued search, pagination, or lazy detail fetches.
    pub async fn tick(&mut self) {
        while let Some(message) = self.fetcher.try_recv() {
            match message {
                PosterMessage::Loaded { id, image } => {
                    self.posters.insert(id, image);
                }
                PosterMessage::Failed { id } => {
                    self.failed_posters.insert(id);
                }
            }
        }

        if let Some(query) = self.pending_search.take() {
            self.perform_search(query).await;
        }

        if self.load_more_requested {
            self.load_more_requested = false;
            self.load_more().await;
        }

        match self.state {
            AppState::MovieDetail(movie_id) => self.ensure_detail_data(movie_id).await,
            AppState::CreditsView(movie_id) => self.ensure_credits(movie_id).await,
            _ => {}
        }
    }

    /// Fetches page 1 for `query` and transitions to Results on a hit
    async fn perform_search(&mut self, query: String) {
        self.is_finished = false;
        match self.tmdb.search_movies(&query, 1).await {
            Ok(page) => {
                self.request_posters(&page.results);
                self.results = page.results;
                self.current_query = query;
                self.current_page = 1;
                self.selected_index = 0;
                if self.results.is_empty() {
                    self.status = "No results".to_string();
                    self.state = AppState::Search;
                } else {
                    self.state = AppState::Results;
                }
            }
            Err(err) => {
                self.status = err.to_string();
                self.state = AppState::Search;
            }
        }
    }

    /// Fetches the next result page for the current query.
    ///
    /// An empty page latches `is_finished`; no further pagination happens
    /// until a new search resets it.
    async fn load_more(&mut self) {
        if self.is_loading || self.is_finished || self.current_query.is_empty() {
            return;
        }
        self.is_loading = true;

        let next_page = self.current_page + 1;
        match self.tmdb.search_movies(&self.current_query, next_page).await {
            Ok(page) if page.results.is_empty() => {
                self.is_finished = true;
            }
            Ok(page) => {
                self.request_posters(&page.results);
                self.results.extend(page.results);
                self.current_page = next_page;
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }

        self.is_loading = false;
    }

    /// Requests posters for a batch of movies through the background fetcher
    fn request_posters(&mut self, movies: &[Movie]) {
        for movie in movies {
            if let Some(path) = movie.poster_path.as_deref() {
                self.fetcher.request(path);
            }
        }
    }

    /// Lazily resolves the detail view's data: poster, trailer key, and
    /// credits (credits are the usual next screen, so they are warmed
    /// concurrently with the trailer key)
    async fn ensure_detail_data(&mut self, movie_id: u64) {
        if let Some(path) = self
            .movie_by_id(movie_id)
            .and_then(|movie| movie.poster_path.clone())
        {
            let id = poster_cache_id(&path);
            if !self.posters.contains_key(&id) && !self.failed_posters.contains(&id) {
                self.fetcher.request(&path);
            }
        }

        if !self.trailer_attempted.insert(movie_id) {
            return;
        }

        if self.credits_attempted.insert(movie_id) {
            let (trailer, credits) = futures::future::join(
                self.tmdb.trailer_key(movie_id),
                self.tmdb.credits(movie_id),
            )
            .await;
            match trailer {
                Ok(key) => {
                    self.trailer_keys.insert(movie_id, key);
                }
                Err(err) => {
                    self.status = err.to_string();
                }
            }
            match credits {
                Ok(credits) => {
                    self.credits.insert(movie_id, credits);
                }
                Err(err) => {
                    self.status = err.to_string();
                }
            }
        } else {
            match self.tmdb.trailer_key(movie_id).await {
                Ok(key) => {
                    self.trailer_keys.insert(movie_id, key);
                }
                Err(err) => {
                    self.status = err.to_string();
                }
            }
        }
    }

    /// Lazily fetches cast and crew for the credits view
    async fn ensure_credits(&mut self, movie_id: u64) {
        if self.credits_attempted.insert(movie_id) {
            match self.tmdb.credits(movie_id).await {
                Ok(credits) => {
                    self.credits.insert(movie_id, credits);
                }
                Err(err) => {
                    self.status = err.to_string();
                }
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - Search: type to edit, `Enter` submits (or opens the selected
    ///   trending movie when the input is empty), `Left`/`Right` move the
    ///   trending selection, `Esc` quits, `F1` opens help
    /// - Results: `Up`/`k`, `Down`/`j` move selection (moving past the end
    ///   loads the next page), `Enter` opens details, `/` new search,
    ///   `c` credits, `Esc` back, `q` quits, `?` help
    /// - MovieDetail: `j`/`k` scroll overview, `c` credits, `Esc` back
    /// - CreditsView: `Tab` switches cast/crew, `j`/`k` scroll, `Esc` back
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys while shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if key_event.code == KeyCode::F(1) {
            self.show_help = true;
            return;
        }

        match self.state.clone() {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') || key_event.code == KeyCode::Esc {
                    self.should_quit = true;
                }
            }
            AppState::Search => match key_event.code {
                KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Enter => {
                    let query = self.input.trim().to_string();
                    if !query.is_empty() {
                        self.pending_search = Some(query);
                    } else if let Some(movie) = self.trending.get(self.trending_selected) {
                        self.open_detail(movie.id);
                    }
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Left => {
                    self.trending_selected = self.trending_selected.saturating_sub(1);
                }
                KeyCode::Right => {
                    if self.trending_selected + 1 < self.trending.len() {
                        self.trending_selected += 1;
                    }
                }
                KeyCode::Down => {
                    if !self.results.is_empty() {
                        self.state = AppState::Results;
                    }
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                }
                _ => {}
            },
            AppState::Results => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('/') => {
                    self.state = AppState::Search;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    if let Some(movie) = self.selected_movie() {
                        self.open_detail(movie.id);
                    }
                }
                KeyCode::Char('c') => {
                    if let Some(movie) = self.selected_movie() {
                        self.open_credits(movie.id);
                    }
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::MovieDetail(movie_id) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.detail_scroll_offset = 0;
                    self.state = if self.results.is_empty() {
                        AppState::Search
                    } else {
                        AppState::Results
                    };
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.detail_scroll_offset = self.detail_scroll_offset.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
                }
                KeyCode::Char('c') => {
                    self.open_credits(movie_id);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::CreditsView(movie_id) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.state = AppState::MovieDetail(movie_id);
                }
                KeyCode::Tab | KeyCode::Char('t') => {
                    self.credits_tab = match self.credits_tab {
                        CreditsTab::Cast => CreditsTab::Crew,
                        CreditsTab::Crew => CreditsTab::Cast,
                    };
                    self.credits_scroll = 0;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.credits_scroll = self.credits_scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.credits_scroll = self.credits_scroll.saturating_sub(1);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    fn open_detail(&mut self, movie_id: u64) {
        self.detail_scroll_offset = 0;
        self.state = AppState::MovieDetail(movie_id);
    }

    fn open_credits(&mut self, movie_id: u64) {
        self.credits_tab = CreditsTab::Cast;
        self.credits_scroll = 0;
        self.state = AppState::CreditsView(movie_id);
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves the selection down; moving past the last loaded result queues
    /// the next page (the list keeps growing until the API runs dry)
    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.results.len() {
            self.selected_index += 1;
        } else if !self.is_finished && !self.is_loading {
            self.load_more_requested = true;
        }
    }
}
