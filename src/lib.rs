//! Reelvault Library
//!
//! This module exposes the CLI, cache, data, and fetcher modules for use in
//! integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod fetcher;
