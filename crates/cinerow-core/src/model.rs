//! Catalog data model shared by the carousel engine and its data sources.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Highest rating on the catalog scale
pub const MAX_RATING: f64 = 5.0;

/// Stable identifier of a media item, unique within its row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaItemId(pub String);

/// Stable identifier of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub String);

impl MediaItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a content row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: MediaItemId,
    pub title: String,
    pub image_url: String,
    pub genre: String,
    pub rating: f64,
    /// Percent watched; presence selects the in-progress rendering variant
    #[serde(default, alias = "progress", skip_serializing_if = "Option::is_none")]
    pub watch_progress: Option<u8>,
}

impl MediaItem {
    /// Rating rounded to one decimal for display
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Whether the item is partially watched
    pub fn is_in_progress(&self) -> bool {
        self.watch_progress.is_some()
    }
}

/// A titled, ordered collection rendered as one carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub title: String,
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

impl Row {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Hero promotion shown above the rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Featured {
    pub id: MediaItemId,
    pub title: String,
    pub genre: String,
    pub year: u16,
    pub rating: f64,
    pub description: String,
    pub backdrop_url: String,
}

/// Everything the landing view needs, as delivered by a catalog source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagePayload {
    #[serde(default)]
    pub featured: Option<Featured>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl PagePayload {
    /// Check identity invariants and normalise numeric ranges
    ///
    /// Row ids must be unique on the page and item ids unique within a row,
    /// since animation and scroll state are keyed by them.
    pub fn validate(mut self) -> Result<Self> {
        let mut row_ids = HashSet::new();
        for row in &mut self.rows {
            if !row_ids.insert(row.id.clone()) {
                return Err(Error::InvalidCatalog(format!("duplicate row id '{}'", row.id)));
            }

            let mut item_ids = HashSet::new();
            for item in &mut row.items {
                if !item_ids.insert(item.id.clone()) {
                    return Err(Error::InvalidCatalog(format!(
                        "duplicate item id '{}' in row '{}'",
                        item.id, row.id
                    )));
                }
                item.rating = sanitize_rating(item.rating);
                item.watch_progress = item.watch_progress.map(|p| p.min(100));
            }
        }

        if let Some(featured) = &mut self.featured {
            featured.rating = sanitize_rating(featured.rating);
        }

        Ok(self)
    }

    /// Rows that will actually render
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| !row.is_empty())
    }
}

fn sanitize_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(0.0, MAX_RATING)
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn item(id: &str) -> MediaItem {
        MediaItem {
            id: MediaItemId::new(id),
            title: format!("Film {}", id),
            image_url: format!("https://img.example/{}.jpg", id),
            genre: "Drama".to_string(),
            rating: 4.2,
            watch_progress: None,
        }
    }

    pub fn row(id: &str, count: usize) -> Row {
        Row {
            id: RowId::new(id),
            title: format!("Row {}", id),
            items: (0..count).map(|i| item(&format!("{}{}", id, i))).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{item, row};
    use super::*;

    #[test]
    fn test_rating_label_rounds() {
        let mut it = item("a");
        it.rating = 4.449;
        assert_eq!(it.rating_label(), "4.4");
        it.rating = 4.96;
        assert_eq!(it.rating_label(), "5.0");
    }

    #[test]
    fn test_validate_rejects_duplicate_item_ids() {
        let mut r = row("t", 2);
        r.items[1].id = r.items[0].id.clone();
        let payload = PagePayload { featured: None, rows: vec![r] };
        assert!(matches!(payload.validate(), Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_row_ids() {
        let payload = PagePayload {
            featured: None,
            rows: vec![row("t", 1), row("t", 3)],
        };
        assert!(matches!(payload.validate(), Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_validate_clamps_ranges() {
        let mut r = row("c", 2);
        r.items[0].rating = 9.0;
        r.items[1].rating = f64::NAN;
        r.items[1].watch_progress = Some(180);
        let payload = PagePayload { featured: None, rows: vec![r] }.validate().unwrap();
        assert_eq!(payload.rows[0].items[0].rating, MAX_RATING);
        assert_eq!(payload.rows[0].items[1].rating, 0.0);
        assert_eq!(payload.rows[0].items[1].watch_progress, Some(100));
    }

    #[test]
    fn test_deserialize_accepts_progress_alias() {
        let json = r#"{
            "rows": [{
                "id": "continue",
                "title": "Continue Watching",
                "items": [{
                    "id": "c0",
                    "title": "Watched Film 1",
                    "imageUrl": "https://picsum.photos/300/450?random=200",
                    "genre": "Drama",
                    "rating": 3.9,
                    "progress": 42
                }]
            }, {
                "id": "empty",
                "title": "Nothing Here"
            }]
        }"#;
        let payload: PagePayload = serde_json::from_str(json).unwrap();
        assert!(payload.featured.is_none());
        assert_eq!(payload.rows[0].items[0].watch_progress, Some(42));
        assert_eq!(payload.visible_rows().count(), 1);
    }
}
