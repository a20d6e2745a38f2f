//! A single media card: hover expansion, poster status and the play affordance.

use tracing::{debug, warn};

use crate::model::{MediaItem, MediaItemId};

/// Pointer/focus expansion of a card
///
/// `expanded` is true while either the pointer is over the card or the
/// card holds keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    pub expanded: bool,
    pointer: bool,
    focus: bool,
}

impl HoverState {
    fn set_pointer(&mut self, inside: bool) {
        self.pointer = inside;
        self.expanded = self.pointer || self.focus;
    }

    fn set_focus(&mut self, focused: bool) {
        self.focus = focused;
        self.expanded = self.pointer || self.focus;
    }

    pub fn has_focus(&self) -> bool {
        self.focus
    }
}

/// Poster loading status of a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    /// Not requested yet
    Pending,
    /// Request in flight
    Requested,
    /// Poster available
    Loaded,
    /// Poster failed; the placeholder is shown instead
    Fallback(String),
}

/// Result of a poster load delivered back to the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Loaded,
    Failed(String),
}

/// Which image a card should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// The item's own poster URL
    Poster(&'a str),
    /// The placeholder asset
    Placeholder,
}

/// Filled bar for partially watched items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressIndicator {
    pub percent: u8,
}

impl ProgressIndicator {
    /// Fill ratio in [0, 1]
    pub fn fraction(&self) -> f64 {
        f64::from(self.percent.min(100)) / 100.0
    }

    pub fn label(&self) -> String {
        format!("{}% Watched", self.percent.min(100))
    }
}

/// Secondary metadata shown while a card is expanded
#[derive(Debug, Clone, PartialEq)]
pub struct CardOverlay<'a> {
    pub rating: String,
    pub genre: &'a str,
    pub play: bool,
    pub progress: Option<ProgressIndicator>,
}

/// Renderable description of a card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub id: &'a MediaItemId,
    pub title: &'a str,
    pub image: ImageSource<'a>,
    pub expanded: bool,
    pub focused: bool,
    pub overlay: Option<CardOverlay<'a>>,
}

/// One item of a row with its own interaction state
#[derive(Debug, Clone)]
pub struct MediaCard {
    item: MediaItem,
    hover: HoverState,
    image: ImageStatus,
}

impl MediaCard {
    pub fn new(item: MediaItem) -> Self {
        Self {
            item,
            hover: HoverState::default(),
            image: ImageStatus::Pending,
        }
    }

    pub fn id(&self) -> &MediaItemId {
        &self.item.id
    }

    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn image_status(&self) -> &ImageStatus {
        &self.image
    }

    pub fn is_expanded(&self) -> bool {
        self.hover.expanded
    }

    pub fn pointer_enter(&mut self) {
        self.hover.set_pointer(true);
    }

    pub fn pointer_leave(&mut self) {
        self.hover.set_pointer(false);
    }

    pub fn focus(&mut self) {
        self.hover.set_focus(true);
    }

    pub fn blur(&mut self) {
        self.hover.set_focus(false);
    }

    /// Replace the item data in place, keeping interaction state
    ///
    /// A changed poster URL puts the image back to `Pending`.
    pub fn update_item(&mut self, item: MediaItem) {
        if item.image_url != self.item.image_url {
            self.image = ImageStatus::Pending;
        }
        self.item = item;
    }

    /// Drop transient state when the owning row unmounts
    pub fn reset(&mut self) {
        self.hover = HoverState::default();
        self.image = ImageStatus::Pending;
    }

    /// Mark the poster as requested; returns false if it needs no request
    pub fn request_image(&mut self) -> bool {
        if self.image == ImageStatus::Pending {
            self.image = ImageStatus::Requested;
            true
        } else {
            false
        }
    }

    /// Record a poster load result
    pub fn resolve_image(&mut self, outcome: ImageOutcome) {
        self.image = match outcome {
            ImageOutcome::Loaded => {
                debug!("Poster ready for {}", self.item.id);
                ImageStatus::Loaded
            }
            ImageOutcome::Failed(reason) => {
                warn!(
                    "Poster for {} failed ({}), using placeholder",
                    self.item.id, reason
                );
                ImageStatus::Fallback(reason)
            }
        };
    }

    /// Activate the play affordance; only reachable while expanded
    pub fn activate_play(&self) -> Option<&MediaItemId> {
        self.hover.expanded.then_some(&self.item.id)
    }

    /// Pure projection of (item, hover, image status) to a renderable card
    pub fn view(&self) -> CardView<'_> {
        let image = match self.image {
            ImageStatus::Fallback(_) => ImageSource::Placeholder,
            _ => ImageSource::Poster(&self.item.image_url),
        };

        let overlay = self.hover.expanded.then(|| CardOverlay {
            rating: self.item.rating_label(),
            genre: &self.item.genre,
            play: true,
            progress: self
                .item
                .watch_progress
                .map(|percent| ProgressIndicator { percent }),
        });

        CardView {
            id: &self.item.id,
            title: &self.item.title,
            image,
            expanded: self.hover.expanded,
            focused: self.hover.has_focus(),
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::item;

    #[test]
    fn test_collapsed_card_has_no_overlay() {
        let card = MediaCard::new(item("a"));
        let view = card.view();
        assert!(!view.expanded);
        assert!(view.overlay.is_none());
        assert_eq!(view.image, ImageSource::Poster("https://img.example/a.jpg"));
    }

    #[test]
    fn test_pointer_enter_expands_with_progress() {
        let mut it = item("c0");
        it.watch_progress = Some(42);
        let mut card = MediaCard::new(it);
        card.pointer_enter();

        let view = card.view();
        let overlay = view.overlay.expect("expanded card shows overlay");
        assert_eq!(overlay.rating, "4.2");
        assert_eq!(overlay.genre, "Drama");
        assert!(overlay.play);
        let progress = overlay.progress.expect("in-progress item shows bar");
        assert_eq!(progress.percent, 42);
        assert!((progress.fraction() - 0.42).abs() < 1e-9);
        assert_eq!(progress.label(), "42% Watched");

        card.pointer_leave();
        assert!(card.view().overlay.is_none());
    }

    #[test]
    fn test_no_progress_bar_without_watch_progress() {
        let mut card = MediaCard::new(item("t0"));
        card.focus();
        let overlay = card.view().overlay.unwrap();
        assert!(overlay.progress.is_none());
    }

    #[test]
    fn test_focus_and_pointer_combine() {
        let mut card = MediaCard::new(item("a"));
        card.focus();
        card.pointer_enter();
        card.blur();
        assert!(card.is_expanded());
        card.pointer_leave();
        assert!(!card.is_expanded());
    }

    #[test]
    fn test_failed_poster_falls_back_to_placeholder() {
        let mut card = MediaCard::new(item("a"));
        assert!(card.request_image());
        assert!(!card.request_image());
        card.resolve_image(ImageOutcome::Failed("HTTP 404".to_string()));
        assert_eq!(card.view().image, ImageSource::Placeholder);
        assert_eq!(
            card.image_status(),
            &ImageStatus::Fallback("HTTP 404".to_string())
        );
    }

    #[test]
    fn test_play_requires_expansion() {
        let mut card = MediaCard::new(item("a"));
        assert!(card.activate_play().is_none());
        card.pointer_enter();
        assert_eq!(card.activate_play(), Some(&MediaItemId::new("a")));
    }

    #[test]
    fn test_update_item_keeps_state() {
        let mut card = MediaCard::new(item("c0"));
        card.pointer_enter();
        card.request_image();
        card.resolve_image(ImageOutcome::Loaded);

        let mut updated = item("c0");
        updated.watch_progress = Some(77);
        card.update_item(updated.clone());
        assert!(card.is_expanded());
        assert_eq!(card.image_status(), &ImageStatus::Loaded);

        updated.image_url = "https://img.example/new.jpg".to_string();
        card.update_item(updated);
        assert_eq!(card.image_status(), &ImageStatus::Pending);
    }
}
