use anyhow::Result;
use tracing::info;

use cinerow_core::catalog;
use cinerow_core::{AppConfig, MediaItem};

pub async fn run(config: &AppConfig) -> Result<()> {
    let source = catalog::from_config(config)?;
    info!("Fetching page from the {} catalog", source.name());
    let payload = source.fetch_page().await?;

    if let Some(featured) = &payload.featured {
        println!(
            "Featured: {} ({}, {}) ★ {:.1}\n",
            featured.title, featured.genre, featured.year, featured.rating
        );
    }

    let rows: Vec<_> = payload.visible_rows().collect();
    if rows.is_empty() {
        println!("The catalog has no rows to show.");
        return Ok(());
    }

    for row in rows {
        println!("{} [{}] ({} items)", row.title, row.id, row.items.len());
        for item in &row.items {
            println!("  {}", item_line(item));
        }
        println!();
    }

    Ok(())
}

fn item_line(item: &MediaItem) -> String {
    let progress = item
        .watch_progress
        .map(|p| format!("  {}% watched", p))
        .unwrap_or_default();
    format!(
        "{:<28} {:<8} ★ {}{}",
        item.title,
        item.genre,
        item.rating_label(),
        progress
    )
}

#[cfg(test)]
mod tests {
    use cinerow_core::MediaItemId;

    use super::*;

    #[test]
    fn test_item_line() {
        let mut item = MediaItem {
            id: MediaItemId::new("c0"),
            title: "Watched Film 1".to_string(),
            image_url: String::new(),
            genre: "Drama".to_string(),
            rating: 3.94,
            watch_progress: None,
        };
        assert_eq!(item_line(&item), format!("{:<28} {:<8} ★ 3.9", "Watched Film 1", "Drama"));

        item.watch_progress = Some(42);
        assert!(item_line(&item).ends_with("★ 3.9  42% watched"));
    }
}
