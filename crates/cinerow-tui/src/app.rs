use std::sync::Arc;
use std::time::Instant;

use cinerow_core::carousel::{
    CarouselPage, ContentRow, Direction, ImageOutcome, ImageTicket, LayoutKind, SelectEvent,
};
use cinerow_core::config::LayoutPreference;
use cinerow_core::model::{MediaItemId, RowId};
use cinerow_core::AppConfig;
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use crate::event::PageLoadResult;
use crate::images::PosterCache;
use crate::theme::Theme;

/// Terminal rows of a card's poster
pub const POSTER_ROWS: u16 = 9;
/// Poster plus the title line
pub const CARD_HEIGHT: u16 = POSTER_ROWS + 1;
/// Heading, cards and one blank line
pub const ROW_HEIGHT: u16 = CARD_HEIGHT + 2;
/// Columns reserved on each side of a row for the ‹ › controls
pub const ARROW_WIDTH: u16 = 2;
pub const HERO_HEIGHT: u16 = 8;

const SPINNER_FRAMES: &[&str] = &[
    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
];

/// Something the pointer can interact with in the last drawn frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Row(RowId),
    Card { row: RowId, item: MediaItemId },
    Arrow { row: RowId, direction: Direction },
}

impl HitTarget {
    pub fn row_id(&self) -> &RowId {
        match self {
            HitTarget::Row(row) => row,
            HitTarget::Card { row, .. } => row,
            HitTarget::Arrow { row, .. } => row,
        }
    }
}

/// Screen regions of the last frame; later regions sit on top
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, target: HitTarget) {
        if !rect.is_empty() {
            self.regions.push((rect, target));
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<&HitTarget> {
        let point = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(point))
            .map(|(_, target)| target)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Pick the layout kind for a preference
///
/// `auto` means pointer when the terminal reports mouse events.
pub fn resolve_layout(preference: LayoutPreference, mouse_capture: bool) -> LayoutKind {
    match preference {
        LayoutPreference::Pointer => LayoutKind::Pointer,
        LayoutPreference::Touch => LayoutKind::Touch,
        LayoutPreference::Auto if mouse_capture => LayoutKind::Pointer,
        LayoutPreference::Auto => LayoutKind::Touch,
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub page: CarouselPage,
    pub layout: LayoutKind,
    pub mode: Mode,
    /// Index into the renderable rows
    pub focused_row: usize,
    /// First renderable row drawn below the hero
    pub row_scroll: usize,
    /// How many rows fit on screen
    pub rows_per_screen: usize,
    /// Keyboard focus is on a card (set by the first navigation key)
    pub card_focus: bool,
    pub hovered_row: Option<RowId>,
    pub hit_map: HitMap,
    pub posters: PosterCache,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub now_playing: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    pub spinner_frame: usize,
    /// Generation of an in-flight in-place refresh
    pub pending_refresh: Option<u64>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let page = CarouselPage::from_config(&config);
        let layout = resolve_layout(config.ui.layout, true);
        let posters = PosterCache::new(poster_size(&config), None);
        Self {
            config,
            theme,
            page,
            layout,
            mode: Mode::Normal,
            focused_row: 0,
            row_scroll: 0,
            rows_per_screen: 1,
            card_focus: false,
            hovered_row: None,
            hit_map: HitMap::default(),
            posters,
            should_quit: false,
            status_message: None,
            now_playing: None,
            pending_key: None,
            spinner_frame: 0,
            pending_refresh: None,
        }
    }

    pub fn visible_row_ids(&self) -> Vec<RowId> {
        self.page.visible_rows().map(|r| r.id().clone()).collect()
    }

    pub fn focused_row_id(&self) -> Option<RowId> {
        self.page
            .visible_rows()
            .nth(self.focused_row)
            .map(|r| r.id().clone())
    }

    fn focused_row_mut(&mut self) -> Option<&mut ContentRow> {
        let id = self.focused_row_id()?;
        self.page.row_mut(&id)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// New terminal size; rows get the width between the arrow columns
    pub fn resize(&mut self, width: u16, height: u16) {
        let viewport = width.saturating_sub(ARROW_WIDTH * 2);
        self.page.resize(f64::from(viewport));

        // Hero plus its blank separator line
        let hero = if self.page.featured().is_some() { HERO_HEIGHT + 1 } else { 0 };
        let available = height.saturating_sub(hero);
        self.rows_per_screen = usize::from((available / ROW_HEIGHT).max(1));
        self.ensure_row_visible();
    }

    fn ensure_row_visible(&mut self) {
        if self.focused_row < self.row_scroll {
            self.row_scroll = self.focused_row;
        } else if self.focused_row >= self.row_scroll + self.rows_per_screen {
            self.row_scroll = self.focused_row + 1 - self.rows_per_screen;
        }
    }

    /// Start a reload; returns the load generation to tag the fetch with
    pub fn begin_reload(&mut self) -> u64 {
        self.focused_row = 0;
        self.row_scroll = 0;
        self.card_focus = false;
        self.hovered_row = None;
        self.hit_map.clear();
        self.pending_refresh = None;
        self.page.reload()
    }

    /// Start an in-place refresh; rows keep scroll, hover and entrance state
    ///
    /// Falls back to a full reload while no page is ready.
    pub fn begin_refresh(&mut self) -> u64 {
        if !self.page.is_ready() {
            return self.begin_reload();
        }
        let generation = self.page.begin_refresh();
        self.pending_refresh = Some(generation);
        generation
    }

    /// Apply a finished page fetch; stale generations are ignored
    pub fn finish_load(&mut self, load: PageLoadResult, now: Instant) -> bool {
        if self.pending_refresh == Some(load.generation) {
            self.pending_refresh = None;
            return self.finish_refresh(load, now);
        }
        if !self.page.finish(load.generation, load.result, now) {
            return false;
        }
        self.focused_row = 0;
        self.row_scroll = 0;
        match self.page.error() {
            Some(error) => {
                let message = format!("Failed to load catalog: {}", error);
                self.set_status(message);
            }
            None => self.clear_status(),
        }
        true
    }

    fn finish_refresh(&mut self, load: PageLoadResult, now: Instant) -> bool {
        let focused = self.focused_row_id();
        match self.page.finish_refresh(load.generation, load.result, now) {
            Ok(false) => false,
            Ok(true) => {
                self.focused_row = focused
                    .and_then(|id| self.visible_row_ids().iter().position(|r| *r == id))
                    .unwrap_or(0);
                self.ensure_row_visible();
                self.clear_status();
                true
            }
            Err(e) => {
                self.set_status(format!("Refresh failed: {}", e));
                true
            }
        }
    }

    /// Advance every row; returns true while something animates
    pub fn tick(&mut self, now: Instant) -> bool {
        self.page.tick(now)
    }

    /// Move keyboard focus one card left or right
    pub fn move_card(&mut self, direction: Direction, now: Instant) {
        let first_focus = !self.card_focus;
        self.card_focus = true;
        let Some(row) = self.focused_row_mut() else {
            return;
        };
        if first_focus || row.focused_index().is_none() {
            row.focus(now);
            return;
        }
        match direction {
            Direction::Left => row.focus_prev(now),
            Direction::Right => row.focus_next(now),
        };
    }

    /// Move focus `delta` rows, clamped to the renderable rows
    pub fn move_row(&mut self, delta: isize, now: Instant) {
        let count = self.page.visible_rows().count();
        if count == 0 {
            return;
        }
        let target = (self.focused_row as isize + delta).clamp(0, count as isize - 1) as usize;
        self.focus_row(target, now);
    }

    pub fn first_row(&mut self, now: Instant) {
        self.focus_row(0, now);
    }

    pub fn last_row(&mut self, now: Instant) {
        let count = self.page.visible_rows().count();
        self.focus_row(count.saturating_sub(1), now);
    }

    fn focus_row(&mut self, index: usize, now: Instant) {
        if index != self.focused_row {
            if let Some(row) = self.focused_row_mut() {
                row.blur();
            }
            self.focused_row = index;
        }
        self.card_focus = true;
        if let Some(row) = self.focused_row_mut() {
            row.focus(now);
        }
        self.ensure_row_visible();
    }

    /// Page-scroll the focused row
    pub fn scroll_focused(&mut self, direction: Direction, now: Instant) -> bool {
        self.focused_row_mut()
            .map(|row| row.scroll_by(direction, now))
            .unwrap_or(false)
    }

    /// Play affordance of the focused card
    pub fn select_focused(&mut self) -> Option<SelectEvent> {
        let id = self.focused_row_id()?;
        let event = self.page.row(&id)?.select_focused()?;
        self.handle_select(&event);
        Some(event)
    }

    /// Report a select event; the carousel itself never navigates
    pub fn handle_select(&mut self, event: &SelectEvent) {
        let title = self
            .page
            .row(&event.row_id)
            .and_then(|row| row.cards().iter().find(|c| c.id() == &event.item_id))
            .map(|card| card.item().title.clone())
            .unwrap_or_else(|| event.item_id.to_string());
        info!("Now playing {} ({})", title, event.item_id);
        self.set_status(format!("Now playing: {}", title));
        self.now_playing = Some(title);
    }

    /// Pointer moved over `target` (or nothing)
    pub fn hover(&mut self, target: Option<&HitTarget>) {
        let next_row = target.map(|t| t.row_id().clone());
        if self.hovered_row != next_row {
            if let Some(previous) = self.hovered_row.take() {
                if let Some(row) = self.page.row_mut(&previous) {
                    row.pointer_leave();
                }
            }
            self.hovered_row = next_row;
        }

        let Some(target) = target else {
            return;
        };
        let Some(row) = self.page.row_mut(target.row_id()) else {
            return;
        };
        match target {
            HitTarget::Card { item, .. } => row.hover_card(item),
            HitTarget::Row(_) | HitTarget::Arrow { .. } => row.hover_row(),
        }
    }

    /// Left click; returns the select event when a card's play affordance fires
    pub fn click(&mut self, target: &HitTarget, now: Instant) -> Option<SelectEvent> {
        self.hover(Some(target));
        match target {
            HitTarget::Card { row, item } => {
                let event = self.page.row(row)?.select(item)?;
                self.handle_select(&event);
                Some(event)
            }
            HitTarget::Arrow { row, direction } => {
                if let Some(row) = self.page.row_mut(row) {
                    row.scroll_by(*direction, now);
                }
                None
            }
            HitTarget::Row(_) => None,
        }
    }

    /// Mouse wheel over a row
    pub fn wheel(&mut self, target: &HitTarget, direction: Direction, now: Instant) -> bool {
        match self.page.row_mut(target.row_id()) {
            Some(row) => row.scroll_by(direction, now),
            None => false,
        }
    }

    pub fn toggle_layout(&mut self) {
        self.layout = match self.layout {
            LayoutKind::Pointer => LayoutKind::Touch,
            LayoutKind::Touch => LayoutKind::Pointer,
        };
        debug!("Layout switched to {:?}", self.layout);
        self.set_status(format!("Layout: {:?}", self.layout));
    }

    /// Poster requests from mounted rows, when previews are enabled
    pub fn poster_requests(&mut self) -> Vec<ImageTicket> {
        if !self.config.ui.image_preview {
            return Vec::new();
        }
        self.page.image_requests()
    }

    /// Deliver a poster result; false when its card is gone
    pub fn apply_poster(&mut self, ticket: &ImageTicket, outcome: ImageOutcome) -> bool {
        self.page.apply_image_result(ticket, outcome)
    }

    pub fn placeholder_url(&self) -> &str {
        &self.config.carousel.placeholder_image
    }
}

/// Poster size in cells for the configured card width
pub fn poster_size(config: &AppConfig) -> (u16, u16) {
    let width = config.carousel.card_width.round().clamp(4.0, 120.0) as u16;
    (width, POSTER_ROWS)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cinerow_core::carousel::RowPhase;
    use cinerow_core::model::{MediaItem, PagePayload, Row};
    use cinerow_core::Error;

    use super::*;

    fn items(prefix: &str, count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| MediaItem {
                id: MediaItemId::new(format!("{}{}", prefix, i)),
                title: format!("Title {}{}", prefix, i),
                image_url: format!("https://img.example/{}{}.jpg", prefix, i),
                genre: "Drama".to_string(),
                rating: 4.0,
                watch_progress: None,
            })
            .collect()
    }

    fn row(id: &str, count: usize) -> Row {
        Row {
            id: RowId::new(id),
            title: id.to_uppercase(),
            items: items(id, count),
        }
    }

    fn loaded_app(rows: Vec<Row>) -> (App, Instant) {
        let now = Instant::now();
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        let generation = app.begin_reload();
        app.resize(84, 60);
        let result = Ok(PagePayload { featured: None, rows });
        assert!(app.finish_load(PageLoadResult { generation, result }, now));
        (app, now)
    }

    #[test]
    fn test_resolve_layout() {
        assert_eq!(resolve_layout(LayoutPreference::Auto, true), LayoutKind::Pointer);
        assert_eq!(resolve_layout(LayoutPreference::Auto, false), LayoutKind::Touch);
        assert_eq!(resolve_layout(LayoutPreference::Touch, true), LayoutKind::Touch);
    }

    #[test]
    fn test_hit_map_prefers_topmost() {
        let mut map = HitMap::default();
        let row = RowId::new("a");
        map.push(Rect::new(0, 0, 80, 12), HitTarget::Row(row.clone()));
        map.push(
            Rect::new(2, 1, 18, 10),
            HitTarget::Card {
                row: row.clone(),
                item: MediaItemId::new("a0"),
            },
        );
        map.push(Rect::new(0, 0, 0, 0), HitTarget::Row(row.clone()));
        assert_eq!(map.len(), 2);
        assert!(matches!(map.hit_test(3, 2), Some(HitTarget::Card { .. })));
        assert_eq!(map.hit_test(40, 2), Some(&HitTarget::Row(row)));
        assert_eq!(map.hit_test(40, 20), None);
    }

    #[test]
    fn test_empty_rows_are_skipped_by_focus() {
        let (mut app, now) = loaded_app(vec![row("a", 6), row("e", 0), row("b", 6)]);
        assert_eq!(app.visible_row_ids(), vec![RowId::new("a"), RowId::new("b")]);
        app.move_row(1, now);
        assert_eq!(app.focused_row_id(), Some(RowId::new("b")));
        app.move_row(5, now);
        assert_eq!(app.focused_row, 1);
        app.first_row(now);
        assert_eq!(app.focused_row, 0);
    }

    #[test]
    fn test_first_card_key_focuses_then_moves() {
        let (mut app, now) = loaded_app(vec![row("a", 6)]);
        app.move_card(Direction::Right, now);
        let id = RowId::new("a");
        assert_eq!(app.page.row(&id).unwrap().focused_index(), Some(0));
        app.move_card(Direction::Right, now);
        assert_eq!(app.page.row(&id).unwrap().focused_index(), Some(1));
    }

    #[test]
    fn test_select_reports_now_playing() {
        let (mut app, now) = loaded_app(vec![row("a", 6)]);
        assert!(app.select_focused().is_none());
        app.move_card(Direction::Right, now);
        let event = app.select_focused().unwrap();
        assert_eq!(event.item_id, MediaItemId::new("a0"));
        assert_eq!(app.status_message.as_deref(), Some("Now playing: Title a0"));
    }

    #[test]
    fn test_click_on_card_selects() {
        let (mut app, now) = loaded_app(vec![row("a", 6)]);
        let target = HitTarget::Card {
            row: RowId::new("a"),
            item: MediaItemId::new("a2"),
        };
        let event = app.click(&target, now).unwrap();
        assert_eq!(event.item_id, MediaItemId::new("a2"));
        assert_eq!(app.now_playing.as_deref(), Some("Title a2"));
    }

    #[test]
    fn test_hover_leave_collapses_previous_row() {
        let (mut app, _) = loaded_app(vec![row("a", 6), row("b", 6)]);
        let card = HitTarget::Card {
            row: RowId::new("a"),
            item: MediaItemId::new("a1"),
        };
        app.hover(Some(&card));
        assert!(app.page.row(&RowId::new("a")).unwrap().cards()[1].is_expanded());

        app.hover(Some(&HitTarget::Row(RowId::new("b"))));
        assert!(!app.page.row(&RowId::new("a")).unwrap().cards()[1].is_expanded());
        assert_eq!(app.hovered_row, Some(RowId::new("b")));

        app.hover(None);
        assert_eq!(app.hovered_row, None);
    }

    #[test]
    fn test_arrow_click_and_wheel_scroll() {
        let (mut app, now) = loaded_app(vec![row("a", 10)]);
        let id = RowId::new("a");
        let arrow = HitTarget::Arrow {
            row: id.clone(),
            direction: Direction::Right,
        };
        assert!(app.click(&arrow, now).is_none());
        assert!(app.page.row(&id).unwrap().scroll().is_animating());

        let later = now + Duration::from_secs(1);
        app.tick(later);
        // Viewport 80, step 56
        assert_eq!(app.page.row(&id).unwrap().scroll().offset(), 56.0);
        assert!(app.wheel(&HitTarget::Row(id.clone()), Direction::Left, later));
    }

    #[test]
    fn test_failed_load_sets_status() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        let generation = app.begin_reload();
        let result = Err(Error::Catalog("offline".to_string()));
        app.finish_load(PageLoadResult { generation, result }, Instant::now());
        assert!(app.page.error().is_some());
        assert!(app.status_message.unwrap().starts_with("Failed to load catalog"));
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        let old = app.begin_reload();
        app.begin_reload();
        let result = Ok(PagePayload::default());
        assert!(!app.finish_load(PageLoadResult { generation: old, result }, Instant::now()));
        assert!(app.page.is_loading());
    }

    #[test]
    fn test_rows_per_screen_and_scrolling() {
        let (mut app, now) = loaded_app(vec![row("a", 3), row("b", 3), row("c", 3), row("d", 3)]);
        app.resize(84, 30);
        assert_eq!(app.rows_per_screen, 2);
        app.last_row(now);
        assert_eq!(app.row_scroll, 2);
        app.first_row(now);
        assert_eq!(app.row_scroll, 0);
    }

    #[test]
    fn test_refresh_keeps_row_state() {
        let (mut app, now) = loaded_app(vec![row("a", 3), row("b", 8)]);
        let settled = now + Duration::from_secs(2);
        app.tick(settled);
        app.move_row(1, settled);
        let b = RowId::new("b");
        app.scroll_focused(Direction::Right, settled);
        let target = app.page.row(&b).unwrap().scroll().target_offset();
        assert!(target > 0.0);

        let generation = app.begin_refresh();
        assert_eq!(app.pending_refresh, Some(generation));
        let mut data = row("b", 8);
        data.items[0].watch_progress = Some(42);
        let result = Ok(PagePayload {
            featured: None,
            rows: vec![data, row("a", 3)],
        });
        assert!(app.finish_load(PageLoadResult { generation, result }, settled));

        assert!(app.pending_refresh.is_none());
        assert_eq!(app.focused_row_id(), Some(b.clone()));
        let r = app.page.row(&b).unwrap();
        assert_eq!(r.phase(), RowPhase::Settled);
        assert_eq!(r.scroll().target_offset(), target);
        assert_eq!(r.cards()[0].item().watch_progress, Some(42));
    }

    #[test]
    fn test_failed_refresh_keeps_rows() {
        let (mut app, now) = loaded_app(vec![row("a", 3)]);
        let generation = app.begin_refresh();
        let result = Err(Error::Catalog("offline".to_string()));
        assert!(app.finish_load(PageLoadResult { generation, result }, now));
        assert!(app.page.is_ready());
        assert_eq!(app.visible_row_ids(), vec![RowId::new("a")]);
        assert!(app.status_message.unwrap().starts_with("Refresh failed"));
    }

    #[test]
    fn test_toggle_layout() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        assert_eq!(app.layout, LayoutKind::Pointer);
        app.toggle_layout();
        assert_eq!(app.layout, LayoutKind::Touch);
    }
}
