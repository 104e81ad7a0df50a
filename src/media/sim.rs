//! Simulated screen for demos and tests
//!
//! Drives the crate without a real windowing host. The screen holds the
//! current viewport width; [`SimulatedScreen::set_width`] re-evaluates every
//! media binding it has handed out and emits one change event per binding
//! whose match state flipped. A resize that crosses several thresholds at once
//! therefore produces several events, which is how platform media listeners
//! behave.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::query::WidthQuery;

use super::{MediaEvent, MediaSender, MediaSource, WidthMedia};

/// Width a new screen starts at
pub const DEFAULT_WIDTH: f64 = 1024.0;

/// Shared state of one simulated media binding
#[derive(Debug)]
struct BindingState {
    query: WidthQuery,
    media: String,
    matches: bool,
    watcher: Option<MediaSender>,
}

/// Screen-wide state shared by every handle
#[derive(Debug)]
struct ScreenState {
    width: f64,
    bindings: Vec<Arc<Mutex<BindingState>>>,
}

/// In-process stand-in for the host's width-matching mechanism
///
/// Cheap to clone; every clone is a handle onto the same screen, so one clone
/// can be moved into a [`Viewport`](crate::Viewport) while another keeps
/// driving the width from a test or another task.
#[derive(Debug, Clone)]
pub struct SimulatedScreen {
    inner: Arc<Mutex<ScreenState>>,
}

impl SimulatedScreen {
    /// Create a screen at the default width
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    /// Create a screen at the given width
    pub fn with_width(width: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScreenState {
                width,
                bindings: Vec::new(),
            })),
        }
    }

    /// Current viewport width in pixels
    pub fn width(&self) -> f64 {
        self.inner.lock().width
    }

    /// Set the viewport width and notify bindings whose match state flipped
    pub fn set_width(&self, width: f64) {
        let mut state = self.inner.lock();
        state.width = width;
        tracing::debug!(width, "screen width set");

        for binding in &state.bindings {
            let mut binding = binding.lock();
            let matches = binding.query.eval(width);
            if matches == binding.matches {
                continue;
            }
            binding.matches = matches;
            tracing::trace!(media = %binding.media, matches, "match state flipped");
            if let Some(tx) = &binding.watcher {
                // Receiver may already be gone; a dead watcher is not an error
                let _ = tx.send(MediaEvent {
                    media: binding.media.clone(),
                    matches,
                });
            }
        }
    }
}

impl Default for SimulatedScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSource for SimulatedScreen {
    fn match_media(&self, media: &str) -> Result<Box<dyn WidthMedia>> {
        let query = WidthQuery::parse(media)?;
        let mut state = self.inner.lock();
        let binding = Arc::new(Mutex::new(BindingState {
            query,
            media: media.to_string(),
            matches: query.eval(state.width),
            watcher: None,
        }));
        state.bindings.push(Arc::clone(&binding));

        Ok(Box::new(SimMedia {
            media: media.to_string(),
            state: binding,
        }))
    }
}

/// Media binding handed out by [`SimulatedScreen`]
#[derive(Debug)]
pub struct SimMedia {
    media: String,
    state: Arc<Mutex<BindingState>>,
}

impl WidthMedia for SimMedia {
    fn matches(&self) -> bool {
        self.state.lock().matches
    }

    fn media(&self) -> &str {
        &self.media
    }

    fn watch(&mut self, tx: MediaSender) {
        self.state.lock().watcher = Some(tx);
    }

    fn unwatch(&mut self) {
        self.state.lock().watcher = None;
    }
}
