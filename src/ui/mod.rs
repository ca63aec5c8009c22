//! UI rendering module for Reelvault
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod credits;
pub mod help_overlay;
pub mod movie_detail;
pub mod results;
pub mod search;
pub mod widgets;

pub use credits::render as render_credits;
pub use help_overlay::render as render_help_overlay;
pub use movie_detail::render as render_movie_detail;
pub use results::render as render_results;
pub use search::render as render_search;
