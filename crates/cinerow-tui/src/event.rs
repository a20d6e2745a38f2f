use std::time::Duration;

use anyhow::Result;
use cinerow_core::model::PagePayload;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

use crate::images::HalfBlockImage;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_rate: Duration,
}

/// Result of an async poster load
pub enum ImageLoadResult {
    Success {
        url: String,
        poster: HalfBlockImage,
    },
    Failure {
        url: String,
        error: String,
    },
}

/// Result of an async page fetch, tagged with its load generation
pub struct PageLoadResult {
    pub generation: u64,
    pub result: cinerow_core::Result<PagePayload>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    /// Event handler that polls faster while something animates
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        let fps = fps.clamp(1, 240);
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_rate: Duration::from_micros(1_000_000 / u64::from(fps)),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // crossterm reports releases on some platforms
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}
