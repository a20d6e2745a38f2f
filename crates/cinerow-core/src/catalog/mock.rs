use std::ops::Range;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::CatalogSource;
use crate::model::{Featured, MediaItem, MediaItemId, PagePayload, Row, RowId};
use crate::Result;

/// Shape of one generated row
struct RowTemplate {
    id: &'static str,
    title: &'static str,
    prefix: &'static str,
    item_label: &'static str,
    count: usize,
    image_seed: u32,
    genre: &'static str,
    rating: Range<f64>,
    in_progress: bool,
}

const ROWS: &[RowTemplate] = &[
    RowTemplate {
        id: "trending",
        title: "Trending Now",
        prefix: "t",
        item_label: "Trend Film",
        count: 15,
        image_seed: 10,
        genre: "Action",
        rating: 4.0..5.0,
        in_progress: false,
    },
    RowTemplate {
        id: "continue",
        title: "Continue Watching",
        prefix: "c",
        item_label: "Watched Film",
        count: 10,
        image_seed: 20,
        genre: "Drama",
        rating: 3.5..4.5,
        in_progress: true,
    },
    RowTemplate {
        id: "toprated",
        title: "Top Rated in 2024",
        prefix: "r",
        item_label: "Top Film",
        count: 12,
        image_seed: 30,
        genre: "Comedy",
        rating: 4.5..5.0,
        in_progress: false,
    },
    RowTemplate {
        id: "scifi",
        title: "Sci-Fi Adventures",
        prefix: "s",
        item_label: "Sci-Fi Title",
        count: 15,
        image_seed: 40,
        genre: "Sci-Fi",
        rating: 4.0..5.0,
        in_progress: false,
    },
];

/// Fixture catalog with simulated latency and seeded ratings
#[derive(Debug, Clone)]
pub struct MockCatalog {
    seed: u64,
    latency: Duration,
}

impl MockCatalog {
    pub fn new(seed: u64, latency: Duration) -> Self {
        Self { seed, latency }
    }

    /// Build the payload without the simulated network delay
    pub fn generate(&self) -> PagePayload {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let rows = ROWS
            .iter()
            .map(|template| Row {
                id: RowId::new(template.id),
                title: template.title.to_string(),
                items: (0..template.count)
                    .map(|i| MediaItem {
                        id: MediaItemId::new(format!("{}{}", template.prefix, i)),
                        title: format!("{} {}", template.item_label, i + 1),
                        image_url: format!(
                            "https://picsum.photos/300/450?random={}{}",
                            template.image_seed, i
                        ),
                        genre: template.genre.to_string(),
                        rating: round_tenth(rng.random_range(template.rating.clone())),
                        watch_progress: template
                            .in_progress
                            .then(|| rng.random_range(10..90u8)),
                    })
                    .collect(),
            })
            .collect();

        PagePayload {
            featured: Some(Featured {
                id: MediaItemId::new("1"),
                title: "The Silent Watcher".to_string(),
                genre: "Sci-Fi Thriller".to_string(),
                year: 2024,
                rating: 4.8,
                description: "A lone astronaut discovers an ancient, silent entity orbiting \
                              Jupiter, forcing humanity to confront its place in the cosmos. \
                              An epic journey of discovery and survival."
                    .to_string(),
                backdrop_url: "https://images.unsplash.com/photo-1517457224424-633878b22a01\
                               ?q=80&w=2500&auto=format&fit=crop"
                    .to_string(),
            }),
            rows,
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_page(&self) -> Result<PagePayload> {
        debug!("Mock catalog responding in {:?}", self.latency);
        tokio::time::sleep(self.latency).await;
        self.generate().validate()
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_payload() {
        let a = MockCatalog::new(7, Duration::ZERO).generate();
        let b = MockCatalog::new(7, Duration::ZERO).generate();
        assert_eq!(a, b);

        let c = MockCatalog::new(8, Duration::ZERO).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_row_shapes() {
        let payload = MockCatalog::new(1, Duration::ZERO).generate();
        let counts: Vec<_> = payload.rows.iter().map(|r| r.items.len()).collect();
        assert_eq!(counts, vec![15, 10, 12, 15]);
        assert_eq!(payload.rows[1].title, "Continue Watching");
        assert_eq!(payload.rows[0].items[3].id, MediaItemId::new("t3"));
        assert_eq!(payload.rows[0].items[3].title, "Trend Film 4");
    }

    #[test]
    fn test_generated_ranges() {
        let payload = MockCatalog::new(99, Duration::ZERO).generate();
        for item in &payload.rows[1].items {
            let progress = item.watch_progress.expect("continue row is in progress");
            assert!((10..90).contains(&progress));
            assert!((3.5..=4.5).contains(&item.rating));
        }
        for item in &payload.rows[2].items {
            assert!(item.watch_progress.is_none());
            assert!((4.5..=5.0).contains(&item.rating));
            assert_eq!(item.rating, round_tenth(item.rating));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let catalog = MockCatalog::new(3, Duration::from_millis(800));
        let started = tokio::time::Instant::now();
        let payload = catalog.fetch_page().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
        assert_eq!(payload.featured.unwrap().title, "The Silent Watcher");
    }
}
