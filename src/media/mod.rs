//! Host width-matching seam
//!
//! The viewport never inspects the platform directly. It consumes two small
//! traits: [`MediaSource`] builds a live width condition from its textual form,
//! and [`WidthMedia`] is the live condition itself: it knows its current match
//! state, the text it was created from, and how to deliver match-state changes
//! over a channel. The crate ships [`SimulatedScreen`] as an in-process host so
//! the whole system can run without a windowing platform.

pub mod sim;

use tokio::sync::mpsc;

use crate::error::Result;

pub use sim::SimulatedScreen;

/// Match-state change notification from a watched width condition
#[derive(Debug, Clone)]
pub struct MediaEvent {
    /// Condition text of the binding that flipped
    pub media: String,
    /// New match state
    pub matches: bool,
}

/// Sending half of the change-event channel handed to watched conditions
pub type MediaSender = mpsc::UnboundedSender<MediaEvent>;

/// A live width condition bound to the host's matching mechanism
pub trait WidthMedia: Send {
    /// Whether the host viewport currently satisfies this condition
    fn matches(&self) -> bool;

    /// The condition text this binding was created from
    fn media(&self) -> &str;

    /// Subscribe to match-state changes; `tx` receives one event per flip
    fn watch(&mut self, tx: MediaSender);

    /// Release the change subscription
    fn unwatch(&mut self);
}

/// Factory for live width conditions
pub trait MediaSource {
    /// Build a media binding for the given condition text
    fn match_media(&self, media: &str) -> Result<Box<dyn WidthMedia>>;
}
