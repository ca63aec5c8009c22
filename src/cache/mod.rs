//! Cache module for storing poster images on disk
//!
//! This module provides a time-based disk cache for remote images. Entries
//! are flat PNG files named by a caller-normalized id, expired entries are
//! purged once at construction, and any storage failure degrades silently
//! to no-op/miss behavior so a broken cache never breaks image display.

mod images;

pub use images::{DiskImageCache, TimeUnit};
