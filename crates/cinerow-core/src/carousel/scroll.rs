//! Horizontal scroll state and the smoothed scroll controller of a row.
//!
//! The controller owns an explicit [`ScrollState`]; nothing reads the
//! position back from a rendering surface. Every mutation re-establishes
//! `0 <= offset <= max(0, content_width - viewport_width)`.

use std::ops::Range;
use std::time::{Duration, Instant};

use tracing::debug;

use super::easing::EasingTypeExt;
use super::timing::{is_complete, lerp, progress};
use crate::config::{EasingType, ScrollConfig};

/// Directional scroll command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Card geometry along the scroll axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub card_width: f64,
    pub gutter: f64,
}

impl CardMetrics {
    pub fn new(card_width: f64, gutter: f64) -> Self {
        Self {
            card_width: card_width.max(1.0),
            gutter: gutter.max(0.0),
        }
    }

    /// Distance between the leading edges of neighbouring cards
    #[inline]
    pub fn stride(&self) -> f64 {
        self.card_width + self.gutter
    }

    /// Total scrollable width of `count` cards (no trailing gutter)
    pub fn content_width(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            count as f64 * self.stride() - self.gutter
        }
    }

    /// Leading and trailing edge of the card at `index`
    pub fn card_span(&self, index: usize) -> (f64, f64) {
        let start = index as f64 * self.stride();
        (start, start + self.card_width)
    }
}

/// Scroll position of one row
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub offset: f64,
    pub viewport_width: f64,
    pub content_width: f64,
}

impl ScrollState {
    /// Largest valid offset
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Clamp a candidate offset into the valid range
    #[inline]
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            0.0
        }
    }

    /// Whether the content overflows the viewport at all
    #[inline]
    pub fn can_scroll(&self) -> bool {
        self.content_width > self.viewport_width
    }

    pub fn at_start(&self) -> bool {
        self.offset <= 0.0
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset()
    }
}

/// In-flight smoothed transition
#[derive(Debug, Clone)]
struct ActiveTransition {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Smooth scroll controller for one row instance
///
/// `scroll_by` computes a new target from the current position; a call
/// made while a transition is in flight replaces that transition's target
/// instead of queueing behind it.
#[derive(Debug, Clone)]
pub struct ScrollController {
    state: ScrollState,
    transition: Option<ActiveTransition>,
    config: ScrollConfig,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollController {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            state: ScrollState::default(),
            transition: None,
            config,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    /// Current scroll state snapshot
    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Current (possibly mid-transition) offset
    #[inline]
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Offset the controller is heading to
    pub fn target_offset(&self) -> f64 {
        self.transition
            .as_ref()
            .map(|t| t.to)
            .unwrap_or(self.state.offset)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }

    /// Scroll one step (a fraction of the viewport) in `direction`
    ///
    /// Returns false when the command was a no-op: content fits the
    /// viewport, or the offset is already clamped at that edge.
    pub fn scroll_by(&mut self, direction: Direction, now: Instant) -> bool {
        if !self.state.can_scroll() {
            return false;
        }

        let step = self.state.viewport_width * self.config.step_fraction;
        let target = self.state.offset + direction.sign() * step;
        debug!(
            "scroll_by {:?}: offset {:.1} step {:.1} -> target {:.1}",
            direction, self.state.offset, step, target
        );
        self.scroll_to(target, now)
    }

    /// Transition to an absolute offset (clamped)
    pub fn scroll_to(&mut self, target: f64, now: Instant) -> bool {
        let target = self.state.clamp_offset(target);

        if target == self.state.offset {
            // Last writer wins: settling here cancels any other target
            let changed = self.transition.is_some();
            self.transition = None;
            return changed;
        }

        if !self.is_smooth() {
            self.state.offset = target;
            self.transition = None;
            return true;
        }

        self.transition = Some(ActiveTransition {
            start: now,
            from: self.state.offset,
            to: target,
            duration: Duration::from_millis(self.config.animation_duration_ms),
            easing: self.config.easing,
        });
        true
    }

    /// Bring the card at `index` fully into view, scrolling as little as possible
    pub fn scroll_to_item(&mut self, index: usize, metrics: &CardMetrics, now: Instant) -> bool {
        let (start, end) = metrics.card_span(index);
        let target = self.target_offset();
        let viewport = self.state.viewport_width;

        if start < target {
            self.scroll_to(start, now)
        } else if end > target + viewport {
            self.scroll_to(end - viewport, now)
        } else {
            false
        }
    }

    /// Apply new layout measurements
    ///
    /// Resizing is not a user scroll: the offset is re-clamped immediately
    /// and no transition is started.
    pub fn resize(&mut self, viewport_width: f64, content_width: f64) {
        self.state.viewport_width = viewport_width.max(0.0);
        self.state.content_width = content_width.max(0.0);
        self.state.offset = self.state.clamp_offset(self.state.offset);

        if let Some(transition) = &mut self.transition {
            transition.to = self.state.clamp_offset(transition.to);
            transition.from = self.state.clamp_offset(transition.from);
            if transition.to == self.state.offset {
                self.transition = None;
            }
        }
    }

    /// Advance the in-flight transition and return the current offset
    pub fn tick(&mut self, now: Instant) -> f64 {
        if let Some(ref t) = self.transition {
            if is_complete(t.start, now, t.duration) {
                self.state.offset = self.state.clamp_offset(t.to);
                self.transition = None;
            } else {
                let eased = t.easing.apply(progress(t.start, now, t.duration));
                self.state.offset = self.state.clamp_offset(lerp(t.from, t.to, eased));
            }
        }
        self.state.offset
    }

    /// Indices of the cards intersecting the viewport
    pub fn visible_range(&self, metrics: &CardMetrics, item_count: usize) -> Range<usize> {
        if item_count == 0 || self.state.viewport_width <= 0.0 {
            return 0..0;
        }

        let stride = metrics.stride();
        let left = self.state.offset;
        let right = left + self.state.viewport_width;

        // First card whose trailing edge is past the left viewport edge
        let mut first = (left / stride).floor() as usize;
        if metrics.card_span(first).1 <= left {
            first += 1;
        }
        let last = (right / stride).ceil() as usize;

        first.min(item_count)..last.min(item_count)
    }

    /// Cancel any transition and return to the origin
    pub fn reset(&mut self) {
        self.transition = None;
        self.state.offset = 0.0;
    }
}
