//! Row-based content carousel engine
//!
//! Headless state machines for the landing page: [`CarouselPage`] owns an
//! ordered list of [`ContentRow`]s, each composing [`MediaCard`]s with a
//! [`ScrollController`] and an [`EntranceChoreographer`]. Time is always
//! passed in as an `Instant`.

mod card;
mod choreography;
mod easing;
mod page;
mod row;
mod scroll;
mod timing;

pub use card::{
    CardOverlay, CardView, HoverState, ImageOutcome, ImageSource, ImageStatus, MediaCard,
    ProgressIndicator,
};
pub use choreography::{Appearance, EntranceChoreographer};
pub use easing::EasingTypeExt;
pub use page::{CarouselPage, PageState, ReadyPage};
pub use row::{
    CardSlot, ContentRow, ImageTicket, LayoutKind, NavAffordance, NavAffordances, RowPhase,
    RowView,
};
pub use scroll::{CardMetrics, Direction, ScrollController, ScrollState};
pub use timing::{lerp, progress};

use crate::model::{MediaItemId, RowId};

/// Emitted when a card's play affordance activates
///
/// The carousel does not navigate; the receiver decides what selecting
/// `item_id` means.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectEvent {
    pub row_id: RowId,
    pub item_id: MediaItemId,
}
