//! Time-based disk cache for poster images
//!
//! Stores PNG-encoded posters as flat files under a single cache root,
//! keyed by a caller-normalized id (file extension already stripped).
//! Entries older than the configured expiration age are deleted once,
//! during construction. Every failure mode degrades silently: a broken
//! cache must never break the views it serves.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use directories::{BaseDirs, UserDirs};
use image::{DynamicImage, ImageFormat};

/// Unit of the cache expiration period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Seconds per unit tag
    pub fn duration_in_secs(self) -> u64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3600,
            TimeUnit::Days => 86400,
        }
    }
}

/// Lifecycle of a cache instance, decided once at construction.
///
/// `Disabled` is terminal: no root is retained and every operation is an
/// immediate no-op for the life of the instance. The filesystem is never
/// re-probed after construction.
#[derive(Debug, Clone)]
enum CacheState {
    Disabled,
    Operable { root: PathBuf },
}

/// Disk cache for remote images with construction-time expiration.
///
/// Layout is one flat directory: `<cache root>/<dir name>/<id>.png`.
/// `store` and `load` are ordinary synchronous filesystem calls and never
/// return errors; callers treat `load` returning `None` as a miss and are
/// responsible for fetching from origin and calling `store` afterwards.
///
/// Clones share the resolved root. The operable/disabled decision is made
/// once, before any clone can exist, and is never re-evaluated.
#[derive(Debug, Clone)]
pub struct DiskImageCache {
    state: CacheState,
}

impl DiskImageCache {
    /// Creates a cache rooted in the platform cache directory, falling back
    /// to the Documents directory, with expiration `amount * unit`.
    ///
    /// If neither base directory resolves, or the root cannot be created,
    /// the cache is permanently disabled and all operations become no-ops.
    pub fn new(cache_dir_name: &str, unit: TimeUnit, amount: u64) -> Self {
        match resolve_root(cache_dir_name) {
            Some(root) => Self::from_candidate(root, unit, amount),
            None => Self {
                state: CacheState::Disabled,
            },
        }
    }

    /// Creates a cache over an explicit candidate root, skipping directory
    /// resolution. Useful for testing or a custom cache location.
    pub fn with_root(root: PathBuf, unit: TimeUnit, amount: u64) -> Self {
        Self::from_candidate(root, unit, amount)
    }

    /// Sweeps expired entries, then ensures the root directory exists.
    ///
    /// The sweep runs before the directory is confirmed to exist; on a
    /// fresh install it observes nothing and is a no-op.
    fn from_candidate(root: PathBuf, unit: TimeUnit, amount: u64) -> Self {
        delete_expired(&root, unit, amount);
        if fs::create_dir_all(&root).is_err() {
            return Self {
                state: CacheState::Disabled,
            };
        }
        Self {
            state: CacheState::Operable { root },
        }
    }

    /// Whether this instance has a usable root directory.
    pub fn is_operable(&self) -> bool {
        matches!(self.state, CacheState::Operable { .. })
    }

    /// Writes `image` as `<root>/<id>.png`, overwriting any earlier entry
    /// for the same id and resetting its modification time.
    ///
    /// Silently does nothing when the cache is disabled or when encoding
    /// or writing fails; callers receive no signal either way.
    pub fn store(&self, id: &str, image: &DynamicImage) {
        let CacheState::Operable { root } = &self.state else {
            return;
        };
        let mut encoded = Vec::new();
        if image
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .is_err()
        {
            return;
        }
        let _ = fs::write(entry_path(root, id), &encoded);
    }

    /// Reads and decodes the entry for `id`, or `None` on a miss.
    ///
    /// A disabled cache, a missing file, an unreadable file, and undecodable
    /// bytes all look identical to the caller: a miss. Loading has no side
    /// effects and does not refresh the entry's modification time.
    pub fn load(&self, id: &str) -> Option<DynamicImage> {
        let CacheState::Operable { root } = &self.state else {
            return None;
        };
        let path = entry_path(root, id);
        if !path.exists() {
            return None;
        }
        let bytes = fs::read(&path).ok()?;
        image::load_from_memory(&bytes).ok()
    }
}

/// File path for a cache entry
fn entry_path(root: &Path, id: &str) -> PathBuf {
    root.join(format!("{}.png", id))
}

/// Resolves the candidate cache root: platform cache directory first,
/// Documents directory second, `None` when neither is available.
fn resolve_root(cache_dir_name: &str) -> Option<PathBuf> {
    if let Some(base) = BaseDirs::new() {
        return Some(base.cache_dir().join(cache_dir_name));
    }
    UserDirs::new()
        .as_ref()
        .and_then(UserDirs::document_dir)
        .map(|docs| docs.join(cache_dir_name))
}

/// Deletes every entry in `dir` whose modification time is older than
/// `now - amount * unit`. Per-entry failures are skipped; failure to list
/// the directory at all means there is nothing to expire.
fn delete_expired(dir: &Path, unit: TimeUnit, amount: u64) {
    let max_age = Duration::from_secs(amount.saturating_mul(unit.duration_in_secs()));
    let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
        return;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let Ok(modified) = entry.metadata().and_then(|meta| meta.modified()) else {
            continue;
        };
        if modified < cutoff {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::thread;
    use tempfile::TempDir;

    /// Builds a small solid-color test image
    fn solid_image(r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([r, g, b, 255])))
    }

    fn fresh_cache() -> (DiskImageCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = DiskImageCache::with_root(
            temp_dir.path().join("posters"),
            TimeUnit::Days,
            1,
        );
        (cache, temp_dir)
    }

    #[test]
    fn test_time_unit_durations() {
        assert_eq!(TimeUnit::Seconds.duration_in_secs(), 1);
        assert_eq!(TimeUnit::Minutes.duration_in_secs(), 60);
        assert_eq!(TimeUnit::Hours.duration_in_secs(), 3600);
        assert_eq!(TimeUnit::Days.duration_in_secs(), 86400);
    }

    #[test]
    fn test_construction_creates_root_directory() {
        let (cache, temp_dir) = fresh_cache();
        assert!(cache.is_operable());
        assert!(temp_dir.path().join("posters").is_dir());
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let (cache, _temp_dir) = fresh_cache();
        let original = solid_image(200, 10, 10);

        cache.store("abc123", &original);
        let loaded = cache.load("abc123").expect("Should load stored image");

        assert_eq!(loaded.to_rgba8(), original.to_rgba8());
    }

    #[test]
    fn test_store_writes_png_file_named_by_id() {
        let (cache, temp_dir) = fresh_cache();

        cache.store("poster42", &solid_image(1, 2, 3));

        assert!(temp_dir.path().join("posters").join("poster42.png").is_file());
    }

    #[test]
    fn test_overwrite_replaces_earlier_entry() {
        let (cache, _temp_dir) = fresh_cache();
        let first = solid_image(255, 0, 0);
        let second = solid_image(0, 0, 255);

        cache.store("same-id", &first);
        cache.store("same-id", &second);

        let loaded = cache.load("same-id").expect("Should load overwritten entry");
        assert_eq!(loaded.to_rgba8(), second.to_rgba8());
    }

    #[test]
    fn test_load_unknown_id_is_a_miss() {
        let (cache, _temp_dir) = fresh_cache();
        assert!(cache.load("never-stored").is_none());
    }

    #[test]
    fn test_load_undecodable_bytes_is_a_miss() {
        let (cache, temp_dir) = fresh_cache();
        let path = temp_dir.path().join("posters").join("corrupt.png");
        fs::write(&path, b"not a png").unwrap();

        assert!(cache.load("corrupt").is_none());
        // The corrupt file is left alone; load has no side effects
        assert!(path.exists());
    }

    #[test]
    fn test_sweep_deletes_entries_older_than_cutoff() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("posters");

        let cache = DiskImageCache::with_root(root.clone(), TimeUnit::Days, 1);
        cache.store("stale", &solid_image(9, 9, 9));
        assert!(root.join("stale.png").is_file());

        // A zero-length expiration makes every existing entry stale. Give
        // the entry's mtime a moment to fall strictly behind the cutoff.
        thread::sleep(std::time::Duration::from_millis(50));
        let rebuilt = DiskImageCache::with_root(root.clone(), TimeUnit::Seconds, 0);

        assert!(rebuilt.is_operable());
        assert!(!root.join("stale.png").exists());
        assert!(rebuilt.load("stale").is_none());
    }

    #[test]
    fn test_sweep_keeps_entries_newer_than_cutoff() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("posters");

        let cache = DiskImageCache::with_root(root.clone(), TimeUnit::Days, 1);
        let image = solid_image(30, 60, 90);
        cache.store("fresh", &image);

        // One day of allowance; an entry written moments ago survives.
        let rebuilt = DiskImageCache::with_root(root.clone(), TimeUnit::Days, 1);

        assert!(root.join("fresh.png").is_file());
        let loaded = rebuilt.load("fresh").expect("Fresh entry should survive sweep");
        assert_eq!(loaded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn test_sweep_on_missing_directory_is_a_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("never-created").join("posters");

        // First-ever construction: the sweep sees no directory, then the
        // root (including intermediate segments) is created.
        let cache = DiskImageCache::with_root(root.clone(), TimeUnit::Hours, 2);

        assert!(cache.is_operable());
        assert!(root.is_dir());
    }

    #[test]
    fn test_directory_creation_failure_disables_cache() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"plain file").unwrap();

        // The candidate root sits under a regular file, so create_dir_all fails
        let cache = DiskImageCache::with_root(blocker.join("posters"), TimeUnit::Days, 1);

        assert!(!cache.is_operable());
        assert!(cache.load("anything").is_none());

        cache.store("anything", &solid_image(5, 5, 5));
        assert!(cache.load("anything").is_none());

        // No filesystem side effects: the blocker is still a plain file
        assert!(blocker.is_file());
    }

    #[test]
    fn test_disabled_cache_stays_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"plain file").unwrap();
        let root = blocker.join("posters");

        let cache = DiskImageCache::with_root(root.clone(), TimeUnit::Days, 1);
        assert!(!cache.is_operable());

        // Unblock the path. A live instance never re-attempts resolution
        // or creation, so the cache must remain a no-op.
        fs::remove_file(&blocker).unwrap();
        for _ in 0..3 {
            cache.store("id", &solid_image(7, 7, 7));
            assert!(cache.load("id").is_none());
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_clone_shares_the_same_root() {
        let (cache, _temp_dir) = fresh_cache();
        let clone = cache.clone();
        let image = solid_image(120, 130, 140);

        clone.store("shared", &image);

        let loaded = cache.load("shared").expect("Clone writes are visible");
        assert_eq!(loaded.to_rgba8(), image.to_rgba8());
    }
}
