//! Landing page: hero promotion plus the ordered row list, behind a
//! `Loading -> Ready | Error` lifecycle.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::card::ImageOutcome;
use super::row::{ContentRow, ImageTicket};
use crate::catalog::CatalogSource;
use crate::config::{AppConfig, CarouselConfig, ScrollConfig};
use crate::model::{Featured, PagePayload, Row, RowId};
use crate::Result;

/// Rows and hero of a loaded page
#[derive(Debug, Clone, Default)]
pub struct ReadyPage {
    pub featured: Option<Featured>,
    pub rows: Vec<ContentRow>,
}

#[derive(Debug, Clone)]
pub enum PageState {
    Loading,
    Error(String),
    Ready(ReadyPage),
}

/// Page lifecycle owner
///
/// Loads are tagged with a generation so a fetch that completes after a
/// newer `reload` is ignored.
#[derive(Debug, Clone)]
pub struct CarouselPage {
    carousel: CarouselConfig,
    scroll: ScrollConfig,
    state: PageState,
    generation: u64,
    viewport_width: f64,
}

impl CarouselPage {
    pub fn new(carousel: CarouselConfig, scroll: ScrollConfig) -> Self {
        Self {
            carousel,
            scroll,
            state: PageState::Loading,
            generation: 0,
            viewport_width: 0.0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.carousel.clone(), config.ui.scroll.clone())
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, PageState::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            PageState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn featured(&self) -> Option<&Featured> {
        match &self.state {
            PageState::Ready(page) => page.featured.as_ref(),
            _ => None,
        }
    }

    /// All rows, including empty ones that render nothing
    pub fn rows(&self) -> &[ContentRow] {
        match &self.state {
            PageState::Ready(page) => &page.rows,
            _ => &[],
        }
    }

    pub fn rows_mut(&mut self) -> &mut [ContentRow] {
        match &mut self.state {
            PageState::Ready(page) => &mut page.rows,
            _ => &mut [],
        }
    }

    /// Rows that actually render, in display order
    pub fn visible_rows(&self) -> impl Iterator<Item = &ContentRow> {
        self.rows().iter().filter(|r| r.is_renderable())
    }

    pub fn row(&self, id: &RowId) -> Option<&ContentRow> {
        self.rows().iter().find(|r| r.id() == id)
    }

    pub fn row_mut(&mut self, id: &RowId) -> Option<&mut ContentRow> {
        self.rows_mut().iter_mut().find(|r| r.id() == id)
    }

    /// Enter `Loading`, unmounting every row; returns the new load generation
    pub fn begin_loading(&mut self) -> u64 {
        if let PageState::Ready(page) = &mut self.state {
            for row in &mut page.rows {
                row.unmount();
            }
        }
        self.state = PageState::Loading;
        self.generation += 1;
        debug!("Page loading, generation {}", self.generation);
        self.generation
    }

    /// Drop the current page and start over
    pub fn reload(&mut self) -> u64 {
        info!("Reloading page");
        self.begin_loading()
    }

    /// Complete the load tagged `generation`
    ///
    /// Returns false when a newer load has started since.
    pub fn finish(&mut self, generation: u64, result: Result<PagePayload>, now: Instant) -> bool {
        if generation != self.generation {
            debug!(
                "Ignoring page result for generation {} (current {})",
                generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(payload) => {
                let page = self.build(payload, now);
                info!(
                    "Page ready: {} rows ({} renderable)",
                    page.rows.len(),
                    page.rows.iter().filter(|r| r.is_renderable()).count()
                );
                PageState::Ready(page)
            }
            Err(e) => {
                warn!("Page load failed: {}", e);
                PageState::Error(e.to_string())
            }
        };
        true
    }

    /// Start a refresh that keeps the current rows mounted
    ///
    /// Without a ready page this is a plain load.
    pub fn begin_refresh(&mut self) -> u64 {
        if !self.is_ready() {
            return self.begin_loading();
        }
        self.generation += 1;
        debug!("Page refreshing, generation {}", self.generation);
        self.generation
    }

    /// Complete the refresh tagged `generation` through `update_rows`
    ///
    /// `Ok(false)` means a newer load has started since. A failed fetch is
    /// returned as `Err` and leaves the current page untouched.
    pub fn finish_refresh(
        &mut self,
        generation: u64,
        result: Result<PagePayload>,
        now: Instant,
    ) -> Result<bool> {
        if !self.is_ready() {
            return Ok(self.finish(generation, result, now));
        }
        if generation != self.generation {
            debug!(
                "Ignoring refresh for generation {} (current {})",
                generation, self.generation
            );
            return Ok(false);
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Page refresh failed, keeping current rows: {}", e);
                return Err(e);
            }
        };
        if let PageState::Ready(page) = &mut self.state {
            page.featured = payload.featured;
        }
        self.update_rows(payload.rows, now);
        info!("Page refreshed in place: {} rows", self.rows().len());
        Ok(true)
    }

    /// Fetch from `source` and settle the page in one step
    pub async fn load(&mut self, source: &dyn CatalogSource) -> bool {
        let generation = self.begin_loading();
        let result = source.fetch_page().await;
        self.finish(generation, result, Instant::now())
    }

    fn build(&self, payload: PagePayload, now: Instant) -> ReadyPage {
        let mut position = 0;
        let rows = payload
            .rows
            .into_iter()
            .map(|row| {
                let renderable = !row.is_empty();
                let mut content =
                    ContentRow::new(row, position, &self.carousel, self.scroll.clone());
                if renderable {
                    position += 1;
                }
                content.resize(self.viewport_width);
                content.mount(now);
                content
            })
            .collect();
        ReadyPage {
            featured: payload.featured,
            rows,
        }
    }

    /// Replace row data in place, keyed by row id
    ///
    /// Existing rows refresh through `ContentRow::update_items`; new rows
    /// mount at their position; rows missing from `rows` are dropped.
    pub fn update_rows(&mut self, rows: Vec<Row>, now: Instant) {
        let carousel = self.carousel.clone();
        let scroll = self.scroll.clone();
        let viewport = self.viewport_width;
        let PageState::Ready(page) = &mut self.state else {
            return;
        };

        let mut existing: HashMap<RowId, ContentRow> =
            page.rows.drain(..).map(|r| (r.id().clone(), r)).collect();
        let mut position = 0;
        for row in rows {
            let renderable = !row.is_empty();
            let content = match existing.remove(&row.id) {
                Some(mut content) => {
                    content.set_position(position, &carousel);
                    content.update_items(row, now);
                    content.mount(now);
                    content
                }
                None => {
                    let mut content = ContentRow::new(row, position, &carousel, scroll.clone());
                    content.resize(viewport);
                    content.mount(now);
                    content
                }
            };
            if renderable {
                position += 1;
            }
            page.rows.push(content);
        }
        if !existing.is_empty() {
            debug!("Dropped {} rows on update", existing.len());
        }
    }

    /// Propagate a new viewport width to every row
    pub fn resize(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width.max(0.0);
        for row in self.rows_mut() {
            row.resize(viewport_width);
        }
    }

    /// Advance every row; returns true while any row is animating
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for row in self.rows_mut() {
            animating |= row.tick(now);
        }
        animating
    }

    /// Poster requests for every mounted row
    pub fn image_requests(&mut self) -> Vec<ImageTicket> {
        self.rows_mut()
            .iter_mut()
            .flat_map(|row| row.image_requests())
            .collect()
    }

    /// Route a poster result to its row; false when stale
    pub fn apply_image_result(&mut self, ticket: &ImageTicket, outcome: ImageOutcome) -> bool {
        match self.row_mut(&ticket.row_id) {
            Some(row) => row.apply_image_result(ticket, outcome),
            None => false,
        }
    }
}
