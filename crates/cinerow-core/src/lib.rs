pub mod carousel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;

pub use carousel::{CarouselPage, ContentRow, MediaCard, PageState, SelectEvent};
pub use catalog::CatalogSource;
pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use model::{Featured, MediaItem, MediaItemId, PagePayload, Row, RowId};
