//! One titled carousel: cards, scroll surface, entrance choreography and
//! the row lifecycle `Unmounted -> Mounting -> Settled -> Unmounted`.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use super::card::{CardView, ImageOutcome, MediaCard};
use super::choreography::{Appearance, EntranceChoreographer};
use super::scroll::{CardMetrics, Direction, ScrollController, ScrollState};
use super::SelectEvent;
use crate::config::{CarouselConfig, ScrollConfig};
use crate::model::{MediaItemId, Row, RowId};

/// Lifecycle of a row instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPhase {
    Unmounted,
    /// Choreography scheduled, entrances still running
    Mounting,
    /// Every entrance delay has elapsed
    Settled,
}

/// Primary input modality of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Hover exists; navigation arrows wait for interaction
    #[default]
    Pointer,
    /// No hover; navigation arrows are always available
    Touch,
}

/// One directional navigation control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavAffordance {
    pub visible: bool,
    /// Whether activating it would move the row
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavAffordances {
    pub left: NavAffordance,
    pub right: NavAffordance,
}

/// Identity of one poster request
///
/// A result is only applied while the row is still mounted with the same
/// epoch and the item still exists with the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageTicket {
    pub row_id: RowId,
    pub item_id: MediaItemId,
    pub epoch: u64,
    pub url: String,
}

/// Placed card inside a row view
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot<'a> {
    pub index: usize,
    /// Leading edge relative to the viewport (may be negative when clipped)
    pub x: f64,
    pub width: f64,
    pub appearance: Appearance,
    pub card: CardView<'a>,
}

/// Renderable description of a row at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub id: &'a RowId,
    pub title: &'a str,
    pub phase: RowPhase,
    pub scroll: ScrollState,
    pub nav: NavAffordances,
    pub cards: Vec<CardSlot<'a>>,
}

/// A row instance with its own scroll, hover and choreography state
#[derive(Debug, Clone)]
pub struct ContentRow {
    id: RowId,
    title: String,
    cards: Vec<MediaCard>,
    phase: RowPhase,
    scroll: ScrollController,
    choreography: EntranceChoreographer,
    metrics: CardMetrics,
    epoch: u64,
    interacted: bool,
    pointer_inside: bool,
    focused: Option<usize>,
}

impl ContentRow {
    /// Build the row at position `index` on the page
    pub fn new(row: Row, index: usize, carousel: &CarouselConfig, scroll: ScrollConfig) -> Self {
        let metrics = CardMetrics::new(carousel.card_width, carousel.card_gutter);
        let cards = row.items.into_iter().map(MediaCard::new).collect();
        Self {
            id: row.id,
            title: row.title,
            cards,
            phase: RowPhase::Unmounted,
            scroll: ScrollController::new(scroll),
            choreography: EntranceChoreographer::for_row(carousel, index),
            metrics,
            epoch: 0,
            interacted: false,
            pointer_inside: false,
            focused: None,
        }
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> RowPhase {
        self.phase
    }

    pub fn cards(&self) -> &[MediaCard] {
        &self.cards
    }

    pub fn metrics(&self) -> CardMetrics {
        self.metrics
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn choreography(&self) -> &EntranceChoreographer {
        &self.choreography
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_card(&self) -> Option<&MediaCard> {
        self.focused.and_then(|i| self.cards.get(i))
    }

    /// Rows without items render nothing at all
    pub fn is_renderable(&self) -> bool {
        !self.cards.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != RowPhase::Unmounted
    }

    fn content_width(&self) -> f64 {
        self.metrics.content_width(self.cards.len())
    }

    fn position_of(&self, id: &MediaItemId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// The row moved to `index` on the page; the running cascade is kept
    pub fn set_position(&mut self, index: usize, carousel: &CarouselConfig) {
        self.choreography.reposition(carousel, index);
    }

    /// Unmounted -> Mounting; schedules a fresh entrance cascade
    ///
    /// Empty rows never mount. Mounting an already mounted row is a no-op.
    pub fn mount(&mut self, now: Instant) {
        if !self.is_renderable() || self.is_mounted() {
            return;
        }
        self.epoch += 1;
        self.phase = RowPhase::Mounting;
        self.choreography.mount(self.cards.iter().map(|c| c.id()), now);
        info!("Row '{}' mounted ({} cards, epoch {})", self.id, self.cards.len(), self.epoch);
    }

    /// Any phase -> Unmounted; scroll, hover, focus and images reset
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.phase = RowPhase::Unmounted;
        self.scroll.reset();
        self.choreography.unmount();
        self.interacted = false;
        self.pointer_inside = false;
        self.focused = None;
        for card in &mut self.cards {
            card.reset();
        }
        debug!("Row '{}' unmounted", self.id);
    }

    /// Advance scroll and lifecycle; returns true while anything is still moving
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.scroll.tick(now);
        if self.phase == RowPhase::Mounting && self.choreography.is_settled(now) {
            self.phase = RowPhase::Settled;
            debug!("Row '{}' settled", self.id);
        }
        self.scroll.is_animating() || self.phase == RowPhase::Mounting
    }

    /// New viewport width from layout; re-clamps without animating
    pub fn resize(&mut self, viewport_width: f64) {
        let content = self.content_width();
        self.scroll.resize(viewport_width, content);
    }

    /// Directional page scroll from a navigation control or key
    pub fn scroll_by(&mut self, direction: Direction, now: Instant) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.interacted = true;
        self.scroll.scroll_by(direction, now)
    }

    /// Pointer entered the row area
    pub fn pointer_enter(&mut self) {
        if self.is_mounted() {
            self.pointer_inside = true;
            self.interacted = true;
        }
    }

    /// Pointer left the row area; every card collapses
    pub fn pointer_leave(&mut self) {
        self.pointer_inside = false;
        self.interacted = self.focused.is_some();
        for card in &mut self.cards {
            card.pointer_leave();
        }
    }

    /// Pointer is over the row but between cards
    pub fn hover_row(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.pointer_inside = true;
        self.interacted = true;
        for card in &mut self.cards {
            card.pointer_leave();
        }
    }

    /// Move pointer hover onto the card `id`, collapsing any other hovered card
    pub fn hover_card(&mut self, id: &MediaItemId) {
        if !self.is_mounted() {
            return;
        }
        self.pointer_inside = true;
        self.interacted = true;
        for card in &mut self.cards {
            if card.id() == id {
                card.pointer_enter();
            } else {
                card.pointer_leave();
            }
        }
    }

    /// Keyboard focus enters the row at the first visible card
    pub fn focus(&mut self, now: Instant) {
        if !self.is_mounted() || self.focused.is_some() {
            return;
        }
        let first = self
            .scroll
            .visible_range(&self.metrics, self.cards.len())
            .start;
        self.focus_index(first, now);
    }

    /// Keyboard focus leaves the row; a hovering pointer keeps it interacted
    pub fn blur(&mut self) {
        if let Some(card) = self.focused.and_then(|i| self.cards.get_mut(i)) {
            card.blur();
        }
        self.focused = None;
        self.interacted = self.pointer_inside;
    }

    pub fn focus_next(&mut self, now: Instant) -> bool {
        match self.focused {
            Some(i) if i + 1 < self.cards.len() => self.focus_index(i + 1, now),
            Some(_) => false,
            None => {
                self.focus(now);
                self.focused.is_some()
            }
        }
    }

    pub fn focus_prev(&mut self, now: Instant) -> bool {
        match self.focused {
            Some(i) if i > 0 => self.focus_index(i - 1, now),
            Some(_) => false,
            None => {
                self.focus(now);
                self.focused.is_some()
            }
        }
    }

    /// Focus the card at `index` and bring it into view
    pub fn focus_index(&mut self, index: usize, now: Instant) -> bool {
        if !self.is_mounted() || index >= self.cards.len() {
            return false;
        }
        if let Some(card) = self.focused.and_then(|i| self.cards.get_mut(i)) {
            card.blur();
        }
        self.cards[index].focus();
        self.focused = Some(index);
        self.interacted = true;
        self.scroll.scroll_to_item(index, &self.metrics, now);
        true
    }

    /// Navigation controls for the current state and layout
    pub fn nav_affordances(&self, layout: LayoutKind) -> NavAffordances {
        let state = self.scroll.state();
        if !self.is_mounted() || !state.can_scroll() {
            return NavAffordances::default();
        }
        let visible = match layout {
            LayoutKind::Touch => true,
            LayoutKind::Pointer => self.interacted,
        };
        NavAffordances {
            left: NavAffordance {
                visible,
                enabled: !state.at_start(),
            },
            right: NavAffordance {
                visible,
                enabled: !state.at_end(),
            },
        }
    }

    /// Activate the play affordance of the focused card
    pub fn select_focused(&self) -> Option<SelectEvent> {
        let card = self.focused_card()?;
        self.select_event(card)
    }

    /// Activate the play affordance of card `id` (pointer click)
    pub fn select(&self, id: &MediaItemId) -> Option<SelectEvent> {
        let card = self.cards.iter().find(|c| c.id() == id)?;
        self.select_event(card)
    }

    fn select_event(&self, card: &MediaCard) -> Option<SelectEvent> {
        let item_id = card.activate_play()?.clone();
        info!("Select {} in row '{}'", item_id, self.id);
        Some(SelectEvent {
            row_id: self.id.clone(),
            item_id,
        })
    }

    /// Tickets for posters that should start loading now
    ///
    /// Covers the visible window plus one viewport of lookahead on each side.
    pub fn image_requests(&mut self) -> Vec<ImageTicket> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let visible = self.scroll.visible_range(&self.metrics, self.cards.len());
        let span = visible.len().max(1);
        let start = visible.start.saturating_sub(span);
        let end = (visible.end + span).min(self.cards.len());

        let mut tickets = Vec::new();
        for card in &mut self.cards[start..end] {
            if card.request_image() {
                tickets.push(ImageTicket {
                    row_id: self.id.clone(),
                    item_id: card.id().clone(),
                    epoch: self.epoch,
                    url: card.item().image_url.clone(),
                });
            }
        }
        tickets
    }

    /// Apply a poster load result; returns false when it was stale and dropped
    pub fn apply_image_result(&mut self, ticket: &ImageTicket, outcome: ImageOutcome) -> bool {
        if !self.is_mounted() || ticket.row_id != self.id || ticket.epoch != self.epoch {
            debug!("Dropping stale image result for {}", ticket.item_id);
            return false;
        }
        let Some(card) = self.cards.iter_mut().find(|c| c.id() == &ticket.item_id) else {
            debug!("Dropping image result for removed item {}", ticket.item_id);
            return false;
        };
        if card.item().image_url != ticket.url {
            return false;
        }
        card.resolve_image(outcome);
        true
    }

    /// Refresh item data in place, diffed by id
    ///
    /// Surviving cards keep hover and image state and their entrance slot;
    /// new ids cascade in from `now`.
    pub fn update_items(&mut self, row: Row, now: Instant) {
        self.title = row.title;
        let focused_id = self.focused_card().map(|c| c.id().clone());

        let mut existing: HashMap<MediaItemId, MediaCard> = self
            .cards
            .drain(..)
            .map(|c| (c.id().clone(), c))
            .collect();
        self.cards = row
            .items
            .into_iter()
            .map(|item| match existing.remove(&item.id) {
                Some(mut card) => {
                    card.update_item(item);
                    card
                }
                None => MediaCard::new(item),
            })
            .collect();

        self.focused = focused_id.and_then(|id| self.position_of(&id));
        let added = self.choreography.sync(self.cards.iter().map(|c| c.id()), now);
        let viewport = self.scroll.state().viewport_width;
        self.resize(viewport);

        if self.cards.is_empty() {
            self.unmount();
        } else if added > 0 && self.phase == RowPhase::Settled {
            self.phase = RowPhase::Mounting;
        }
        debug!(
            "Row '{}' updated: {} cards, {} new, {} removed",
            self.id,
            self.cards.len(),
            added,
            existing.len()
        );
    }

    /// Snapshot for rendering; `None` for rows that render nothing
    pub fn view(&self, layout: LayoutKind, now: Instant) -> Option<RowView<'_>> {
        if !self.is_renderable() || !self.is_mounted() {
            return None;
        }
        let scroll = self.scroll.state();
        let range = self.scroll.visible_range(&self.metrics, self.cards.len());
        let cards = range
            .map(|index| {
                let card = &self.cards[index];
                let (start, _) = self.metrics.card_span(index);
                CardSlot {
                    index,
                    x: start - scroll.offset,
                    width: self.metrics.card_width,
                    appearance: self.choreography.appearance(card.id(), now),
                    card: card.view(),
                }
            })
            .collect();

        Some(RowView {
            id: &self.id,
            title: &self.title,
            phase: self.phase,
            scroll,
            nav: self.nav_affordances(layout),
            cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::carousel::card::ImageStatus;
    use crate::model::fixtures::row;

    fn content_row(id: &str, count: usize) -> ContentRow {
        let scroll = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut r = ContentRow::new(row(id, count), 0, &CarouselConfig::default(), scroll);
        // 18 + 2 per card: 5 cards = 98 wide
        r.resize(50.0);
        r
    }

    fn ms(now: Instant, ms: u64) -> Instant {
        now + Duration::from_millis(ms)
    }

    #[test]
    fn test_empty_row_renders_nothing() {
        let now = Instant::now();
        let mut r = content_row("e", 0);
        r.mount(now);
        assert_eq!(r.phase(), RowPhase::Unmounted);
        assert!(r.view(LayoutKind::Touch, now).is_none());
        assert!(r.image_requests().is_empty());
    }

    #[test]
    fn test_lifecycle_mounting_to_settled() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        assert!(r.view(LayoutKind::Pointer, now).is_none());

        r.mount(now);
        assert_eq!(r.phase(), RowPhase::Mounting);
        assert!(r.tick(ms(now, 699)));
        assert_eq!(r.phase(), RowPhase::Mounting);
        assert!(!r.tick(ms(now, 700)));
        assert_eq!(r.phase(), RowPhase::Settled);

        r.unmount();
        assert_eq!(r.phase(), RowPhase::Unmounted);
    }

    #[test]
    fn test_item_delay_in_row() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        let third = r.cards()[3].id().clone();
        assert_eq!(
            r.choreography().delay_of(&third),
            Some(Duration::from_millis(350))
        );
    }

    #[test]
    fn test_nav_hidden_until_interaction_on_pointer() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);

        let nav = r.nav_affordances(LayoutKind::Pointer);
        assert!(!nav.left.visible && !nav.right.visible);
        let touch = r.nav_affordances(LayoutKind::Touch);
        assert!(touch.left.visible && touch.right.visible);
        assert!(!touch.left.enabled && touch.right.enabled);

        r.pointer_enter();
        let nav = r.nav_affordances(LayoutKind::Pointer);
        assert!(nav.left.visible && nav.right.visible);

        r.pointer_leave();
        assert!(!r.nav_affordances(LayoutKind::Pointer).right.visible);
    }

    #[test]
    fn test_blur_keeps_nav_while_pointer_inside() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        r.pointer_enter();
        r.focus_next(now);

        // Keyboard focus moves to another row, pointer stays here
        r.blur();
        assert!(r.focused_index().is_none());
        let nav = r.nav_affordances(LayoutKind::Pointer);
        assert!(nav.left.visible && nav.right.visible);

        r.pointer_leave();
        assert!(!r.nav_affordances(LayoutKind::Pointer).right.visible);

        // Focus alone, no pointer: blur hides the arrows
        r.focus_next(now);
        assert!(r.nav_affordances(LayoutKind::Pointer).right.visible);
        r.blur();
        assert!(!r.nav_affordances(LayoutKind::Pointer).right.visible);
    }

    #[test]
    fn test_nav_absent_when_content_fits() {
        let now = Instant::now();
        let mut r = content_row("t", 2);
        r.mount(now);
        r.pointer_enter();
        assert_eq!(r.nav_affordances(LayoutKind::Touch), NavAffordances::default());
        assert!(!r.scroll_by(Direction::Right, now));
    }

    #[test]
    fn test_unmount_resets_scroll_and_hover() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        r.scroll_by(Direction::Right, now);
        let id = r.cards()[1].id().clone();
        r.hover_card(&id);
        assert!(r.scroll().offset() > 0.0);
        assert!(r.cards()[1].is_expanded());

        r.unmount();
        assert_eq!(r.scroll().offset(), 0.0);
        assert!(!r.cards()[1].is_expanded());
        assert!(r.focused_index().is_none());
        assert!(!r.nav_affordances(LayoutKind::Touch).right.visible);
    }

    #[test]
    fn test_hover_moves_between_cards() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        let a = r.cards()[0].id().clone();
        let b = r.cards()[1].id().clone();
        r.hover_card(&a);
        r.hover_card(&b);
        assert!(!r.cards()[0].is_expanded());
        assert!(r.cards()[1].is_expanded());
    }

    #[test]
    fn test_focus_moves_and_scrolls_into_view() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        assert!(r.focus_next(now));
        assert_eq!(r.focused_index(), Some(0));
        assert!(r.cards()[0].is_expanded());

        for _ in 0..4 {
            r.focus_next(now);
        }
        assert_eq!(r.focused_index(), Some(4));
        assert!(!r.focus_next(now));
        assert!(!r.cards()[0].is_expanded());
        // Card 4 spans [80, 98] in a 50 wide viewport
        assert_eq!(r.scroll().offset(), 48.0);

        assert!(r.focus_prev(now));
        assert_eq!(r.focused_index(), Some(3));
    }

    #[test]
    fn test_select_focused_emits_event() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        assert!(r.select_focused().is_none());
        r.focus_next(now);
        let event = r.select_focused().unwrap();
        assert_eq!(event.row_id, RowId::new("t"));
        assert_eq!(event.item_id, MediaItemId::new("t0"));

        // A click on a collapsed card does nothing
        assert!(r.select(&MediaItemId::new("t3")).is_none());
    }

    #[test]
    fn test_progress_update_does_not_replay_entrance() {
        let now = Instant::now();
        let mut r = content_row("c", 5);
        r.mount(now);
        r.tick(ms(now, 1000));
        assert_eq!(r.phase(), RowPhase::Settled);

        let mut data = row("c", 5);
        data.items[2].watch_progress = Some(64);
        let later = ms(now, 5000);
        r.update_items(data, later);

        assert_eq!(r.phase(), RowPhase::Settled);
        let view = r.view(LayoutKind::Pointer, later).unwrap();
        assert!(view.cards.iter().all(|s| s.appearance == Appearance::Visible));
        assert_eq!(r.cards()[2].item().watch_progress, Some(64));
    }

    #[test]
    fn test_update_items_adds_and_removes() {
        let now = Instant::now();
        let mut r = content_row("c", 3);
        r.mount(now);
        r.tick(ms(now, 1000));
        r.focus_index(1, now);

        let mut data = row("c", 3);
        data.items.remove(0);
        data.items.push(crate::model::fixtures::item("fresh"));
        let later = ms(now, 2000);
        r.update_items(data, later);

        assert_eq!(r.cards().len(), 3);
        assert_eq!(r.focused_index(), Some(0));
        assert_eq!(r.phase(), RowPhase::Mounting);
        assert_eq!(
            r.choreography().appearance(&MediaItemId::new("fresh"), later),
            Appearance::Entering(0.0)
        );
        assert_eq!(r.scroll().state().content_width, 58.0);
    }

    #[test]
    fn test_update_to_empty_unmounts() {
        let now = Instant::now();
        let mut r = content_row("c", 3);
        r.mount(now);
        r.update_items(row("c", 0), now);
        assert_eq!(r.phase(), RowPhase::Unmounted);
        assert!(r.view(LayoutKind::Pointer, now).is_none());
    }

    #[test]
    fn test_image_results_respect_epoch() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        let tickets = r.image_requests();
        assert_eq!(tickets.len(), 5);
        assert!(r.image_requests().is_empty());

        let ticket = tickets[0].clone();
        r.unmount();
        assert!(!r.apply_image_result(&ticket, ImageOutcome::Loaded));

        r.mount(now);
        // Old epoch stays stale after remount
        assert!(!r.apply_image_result(&ticket, ImageOutcome::Loaded));
        let fresh = r.image_requests();
        assert!(r.apply_image_result(&fresh[0], ImageOutcome::Failed("HTTP 404".into())));
        assert!(matches!(r.cards()[0].image_status(), ImageStatus::Fallback(_)));
        assert!(r.view(LayoutKind::Pointer, now).is_some());
    }

    #[test]
    fn test_image_result_for_removed_item_is_dropped() {
        let now = Instant::now();
        let mut r = content_row("t", 3);
        r.mount(now);
        let tickets = r.image_requests();
        let removed = tickets[0].clone();

        let mut data = row("t", 3);
        data.items.remove(0);
        r.update_items(data, now);

        assert!(!r.apply_image_result(&removed, ImageOutcome::Loaded));
        assert!(r
            .cards()
            .iter()
            .all(|c| c.image_status() == &ImageStatus::Requested));
    }

    #[test]
    fn test_image_result_for_changed_url_is_dropped() {
        let now = Instant::now();
        let mut r = content_row("t", 3);
        r.mount(now);
        let old = r.image_requests()[1].clone();

        let mut data = row("t", 3);
        data.items[1].image_url = "https://img.example/t1-v2.jpg".to_string();
        r.update_items(data, now);
        assert_eq!(r.cards()[1].image_status(), &ImageStatus::Pending);

        assert!(!r.apply_image_result(&old, ImageOutcome::Loaded));
        assert_eq!(r.cards()[1].image_status(), &ImageStatus::Pending);

        let fresh = r.image_requests();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].url, "https://img.example/t1-v2.jpg");
        assert!(r.apply_image_result(&fresh[0], ImageOutcome::Loaded));
        assert_eq!(r.cards()[1].image_status(), &ImageStatus::Loaded);
    }

    #[test]
    fn test_view_places_visible_cards() {
        let now = Instant::now();
        let mut r = content_row("t", 5);
        r.mount(now);
        r.scroll_by(Direction::Right, now);
        // 0.7 * 50 = 35
        let view = r.view(LayoutKind::Pointer, now).unwrap();
        assert_eq!(view.scroll.offset, 35.0);
        let indices: Vec<_> = view.cards.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(view.cards[0].x, -15.0);
        assert_eq!(view.title, "Row t");
    }
}
