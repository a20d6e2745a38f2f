//! Staggered entrance timing for the cards of a row.
//!
//! The schedule is keyed by item id and rebuilt only when the row mounts.
//! In-place item updates (new progress, new rating) keep their schedule,
//! so an already visible card never replays its entrance.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use super::easing::EasingTypeExt;
use super::timing::progress;
use crate::config::{CarouselConfig, EasingType};
use crate::model::MediaItemId;

/// Visual phase of a card's entrance at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Appearance {
    /// Entrance delay not yet elapsed
    Hidden,
    /// Entrance in progress, eased progress in (0, 1)
    Entering(f64),
    /// Entrance finished
    Visible,
}

impl Appearance {
    /// Opacity-like weight in [0, 1]
    pub fn weight(&self) -> f64 {
        match self {
            Appearance::Hidden => 0.0,
            Appearance::Entering(p) => *p,
            Appearance::Visible => 1.0,
        }
    }

    /// Scale factor, growing from 0.95 to 1.0 during the entrance
    pub fn scale(&self) -> f64 {
        0.95 + 0.05 * self.weight()
    }
}

/// Assigns each card of a row its appearance time
#[derive(Debug, Clone)]
pub struct EntranceChoreographer {
    stagger: Duration,
    row_delay: Duration,
    entrance: Duration,
    easing: EasingType,
    mounted_at: Option<Instant>,
    schedule: HashMap<MediaItemId, Instant>,
}

impl EntranceChoreographer {
    pub fn new(stagger: Duration, row_delay: Duration, entrance: Duration) -> Self {
        Self {
            stagger,
            row_delay,
            entrance,
            easing: EasingType::Cubic,
            mounted_at: None,
            schedule: HashMap::new(),
        }
    }

    /// Choreographer for the row at `row_index` on the page
    pub fn for_row(config: &CarouselConfig, row_index: usize) -> Self {
        Self::new(
            Duration::from_millis(config.stagger_ms),
            Self::row_delay_at(config, row_index),
            Duration::from_millis(config.entrance_duration_ms),
        )
    }

    fn row_delay_at(config: &CarouselConfig, row_index: usize) -> Duration {
        Duration::from_millis(
            config.row_entrance_delay_ms + row_index as u64 * config.row_delay_step_ms,
        )
    }

    /// Move the row to `row_index`; takes effect on the next mount
    pub fn reposition(&mut self, config: &CarouselConfig, row_index: usize) {
        self.row_delay = Self::row_delay_at(config, row_index);
    }

    /// Delay of the card at `index`: the row's own delay plus one stagger per position
    #[inline]
    pub fn delay_for_index(&self, index: usize) -> Duration {
        self.row_delay + self.stagger * index as u32
    }

    pub fn row_delay(&self) -> Duration {
        self.row_delay
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Schedule a fresh cascade for `ids` (display order) starting at `now`
    pub fn mount<'a>(&mut self, ids: impl IntoIterator<Item = &'a MediaItemId>, now: Instant) {
        self.mounted_at = Some(now);
        self.schedule = ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), now + self.delay_for_index(i)))
            .collect();
        debug!(
            "Entrance scheduled for {} cards, row delay {:?}",
            self.schedule.len(),
            self.row_delay
        );
    }

    pub fn unmount(&mut self) {
        self.mounted_at = None;
        self.schedule.clear();
    }

    /// Reconcile the schedule with the row's current ids without replaying
    ///
    /// Ids already scheduled keep their slot. Ids seen for the first time
    /// cascade in from `now` in display order; vanished ids are dropped.
    /// Returns how many ids were newly scheduled.
    pub fn sync<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a MediaItemId>,
        now: Instant,
    ) -> usize {
        if self.mounted_at.is_none() {
            return 0;
        }

        let mut next = HashMap::with_capacity(self.schedule.len());
        let mut added = 0u32;
        for id in ids {
            let start = match self.schedule.get(id) {
                Some(start) => *start,
                None => {
                    let start = now + self.stagger * added;
                    added += 1;
                    start
                }
            };
            next.insert(id.clone(), start);
        }
        self.schedule = next;
        added as usize
    }

    /// Delay of `id` relative to the mount instant
    pub fn delay_of(&self, id: &MediaItemId) -> Option<Duration> {
        let mounted = self.mounted_at?;
        self.schedule
            .get(id)
            .map(|start| start.saturating_duration_since(mounted))
    }

    /// Entrance phase of `id` at `now`; unknown ids are treated as visible
    pub fn appearance(&self, id: &MediaItemId, now: Instant) -> Appearance {
        let Some(start) = self.schedule.get(id) else {
            return if self.mounted_at.is_some() {
                Appearance::Visible
            } else {
                Appearance::Hidden
            };
        };

        if now < *start {
            return Appearance::Hidden;
        }
        let t = progress(*start, now, self.entrance);
        if t >= 1.0 {
            Appearance::Visible
        } else {
            Appearance::Entering(self.easing.apply(t))
        }
    }

    /// Instant at which the last scheduled entrance finishes
    pub fn settles_at(&self) -> Option<Instant> {
        let mounted = self.mounted_at?;
        let last = self.schedule.values().max().copied().unwrap_or(mounted);
        Some(last + self.entrance)
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.settles_at().is_some_and(|at| now >= at)
    }
}
