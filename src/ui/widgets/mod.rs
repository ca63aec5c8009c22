//! Custom widgets

pub mod poster;

pub use poster::Poster;
