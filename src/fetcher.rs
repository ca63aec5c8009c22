//! Background poster fetch system
//!
//! Resolves poster images off the render path: each request spawns a task
//! that consults the disk cache first and falls back to the image host on a
//! miss, storing the fetched poster back into the cache before reporting.
//! Results arrive over a tokio channel drained by the main event loop.

use std::collections::HashSet;

use image::DynamicImage;
use tokio::sync::mpsc;

use crate::cache::DiskImageCache;
use crate::data::{poster_cache_id, PosterClient};

/// Messages sent from background poster tasks to the main app
#[derive(Debug)]
pub enum PosterMessage {
    /// Poster resolved, from cache or from the image host
    Loaded { id: String, image: DynamicImage },
    /// Poster could not be fetched or decoded
    Failed { id: String },
}

/// Spawns and tracks background poster fetch tasks
///
/// Requests are deduplicated by cache id: a poster already in flight is not
/// requested again until its result has been drained. Fetch failures are
/// reported once and not retried; a later request for the same id starts
/// over from the cache.
pub struct PosterFetcher {
    cache: DiskImageCache,
    client: PosterClient,
    sender: mpsc::Sender<PosterMessage>,
    receiver: mpsc::Receiver<PosterMessage>,
    in_flight: HashSet<String>,
}

impl PosterFetcher {
    /// Creates a fetcher over the given cache and poster client
    pub fn new(cache: DiskImageCache, client: PosterClient) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self {
            cache,
            client,
            sender,
            receiver,
            in_flight: HashSet::new(),
        }
    }

    /// Requests the poster at `poster_path`, returning its cache id.
    ///
    /// Spawns a background task unless the same poster is already in
    /// flight. The task tries the disk cache first; on a miss it fetches
    /// from the image host and stores the result back into the cache.
    pub fn request(&mut self, poster_path: &str) -> String {
        let id = poster_cache_id(poster_path);
        if !self.in_flight.insert(id.clone()) {
            return id;
        }

        let cache = self.cache.clone();
        let client = self.client.clone();
        let sender = self.sender.clone();
        let path = poster_path.to_string();
        let task_id = id.clone();

        tokio::spawn(async move {
            if let Some(image) = cache.load(&task_id) {
                let _ = sender
                    .send(PosterMessage::Loaded { id: task_id, image })
                    .await;
                return;
            }

            match client.fetch(&path).await {
                Ok(image) => {
                    cache.store(&task_id, &image);
                    let _ = sender
                        .send(PosterMessage::Loaded { id: task_id, image })
                        .await;
                }
                Err(_) => {
                    let _ = sender.send(PosterMessage::Failed { id: task_id }).await;
                }
            }
        });

        id
    }

    /// Checks for a completed poster without blocking
    pub fn try_recv(&mut self) -> Option<PosterMessage> {
        let message = self.receiver.try_recv().ok()?;
        let id = match &message {
            PosterMessage::Loaded { id, .. } | PosterMessage::Failed { id } => id,
        };
        self.in_flight.remove(id);
        Some(message)
    }

    /// Number of posters currently in flight
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TimeUnit;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn test_cache(temp_dir: &TempDir) -> DiskImageCache {
        DiskImageCache::with_root(temp_dir.path().join("posters"), TimeUnit::Days, 1)
    }

    /// Client pointed at a closed local port so origin fetches fail fast
    fn unreachable_client() -> PosterClient {
        PosterClient::new().with_base_url("http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn test_cached_poster_resolves_without_origin() {
        let temp_dir = TempDir::new().unwrap();
        let cache = test_cache(&temp_dir);
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        cache.store("abc123", &image);

        let mut fetcher = PosterFetcher::new(cache, unreachable_client());
        fetcher.request("/abc123.jpg");

        let message = fetcher.receiver.recv().await.expect("Should get a message");
        match message {
            PosterMessage::Loaded { id, image: loaded } => {
                assert_eq!(id, "abc123");
                assert_eq!(loaded.to_rgba8(), image.to_rgba8());
            }
            PosterMessage::Failed { id } => panic!("Cached poster {} should not fail", id),
        }
    }

    #[tokio::test]
    async fn test_miss_with_unreachable_origin_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut fetcher = PosterFetcher::new(test_cache(&temp_dir), unreachable_client());
        fetcher.request("/missing.jpg");

        let message = fetcher.receiver.recv().await.expect("Should get a message");
        assert!(matches!(message, PosterMessage::Failed { id } if id == "missing"));
    }

    #[tokio::test]
    async fn test_requests_are_deduplicated_while_in_flight() {
        let temp_dir = TempDir::new().unwrap();
        let mut fetcher = PosterFetcher::new(test_cache(&temp_dir), unreachable_client());

        fetcher.request("/same.jpg");
        fetcher.request("/same.jpg");
        assert_eq!(fetcher.in_flight_count(), 1);
    }

    #[tokio::test]
    async fn test_drain_clears_in_flight() {
        let temp_dir = TempDir::new().unwrap();
        let cache = test_cache(&temp_dir);
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])));
        cache.store("poster1", &image);

        let mut fetcher = PosterFetcher::new(cache, unreachable_client());
        fetcher.request("/poster1.jpg");

        // Wait for the task, then drain through try_recv
        let message = fetcher.receiver.recv().await.expect("Should get a message");
        let id = match message {
            PosterMessage::Loaded { id, .. } | PosterMessage::Failed { id } => id,
        };
        fetcher.in_flight.remove(&id);
        assert_eq!(fetcher.in_flight_count(), 0);
    }
}
