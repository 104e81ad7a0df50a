//! Responsive breakpoint registry with change notifications
//!
//! viewport-rs keeps an ordered registry of named width breakpoints and tells
//! registered subscribers whenever the currently active breakpoint changes.
//! The host's width-matching mechanism sits behind the [`MediaSource`] /
//! [`WidthMedia`] traits; [`SimulatedScreen`] is a ready-made in-process host
//! for demos and tests.
//!
//! # Architecture
//!
//! ```text
//!   MediaSource (host)                 Viewport
//!   ┌───────────────────┐    ┌───────────────────────────┐
//!   │ match_media(text) │───►│ BreakpointRegistry        │
//!   │                   │    │   ordered entries         │
//!   │ width changes     │    │ SubscriberHub             │
//!   └────────┬──────────┘    │   name -> callback        │
//!            │               └────────────┬──────────────┘
//!            │ MediaEvent per flip        │ current()?
//!            └──────────► mpsc ──────────►│
//!                                         ▼
//!                            broadcast to every subscriber
//! ```
//!
//! Every match-state flip of any watched condition lands on one channel. The
//! viewport handles events one at a time: re-evaluate which breakpoint is
//! active, and if one is, broadcast it to all subscribers in registration
//! order.
//!
//! # Example
//!
//! ```
//! use viewport_rs::{Result, SimulatedScreen, Viewport};
//!
//! fn main() -> Result<()> {
//!     let screen = SimulatedScreen::with_width(1000.0);
//!     let mut viewport = Viewport::new(screen.clone());
//!
//!     viewport.add_breakpoint("small", "(max-width: 500px)")?;
//!     viewport.add_breakpoint("medium", "(max-width: 900px)")?;
//!
//!     viewport.register(|breakpoint| {
//!         println!("now active: {}", breakpoint.key());
//!         Ok(())
//!     })?;
//!
//!     screen.set_width(600.0);
//!     viewport.process_pending()?;
//!     assert_eq!(viewport.current().unwrap().key(), "medium");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod hub;
pub mod media;
pub mod query;
pub mod registry;
pub mod viewport;

pub use config::ViewportConfig;
pub use error::{Result, SubscriberError, ViewportError};
pub use hub::{SubscriberHub, DEFAULT_SUBSCRIBER};
pub use media::{MediaEvent, MediaSender, MediaSource, SimulatedScreen, WidthMedia};
pub use query::{Sign, WidthQuery};
pub use registry::{Breakpoint, BreakpointRegistry};
pub use viewport::{Viewport, ViewportStats};
