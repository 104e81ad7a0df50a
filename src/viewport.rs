//! Viewport coordinator
//!
//! [`Viewport`] wires the pieces together: it owns the breakpoint registry and
//! the subscriber hub, builds media bindings through the injected
//! [`MediaSource`], and funnels every match-state change through one channel.
//! Each received event re-evaluates which breakpoint is active; when one is,
//! it is broadcast to every subscriber. Events are handled one at a time and
//! each is processed completely before the next is taken off the channel.

use tokio::sync::mpsc;

use crate::config::ViewportConfig;
use crate::error::{Result, SubscriberError, ViewportError};
use crate::hub::SubscriberHub;
use crate::media::{MediaEvent, MediaSource};
use crate::query::WidthQuery;
use crate::registry::{Breakpoint, BreakpointRegistry};

/// Diagnostic counters
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportStats {
    /// Registered breakpoints
    pub breakpoints: usize,
    /// Registered subscribers
    pub subscribers: usize,
    /// Change events handled so far
    pub events_processed: u64,
    /// Broadcasts triggered so far
    pub broadcasts: u64,
}

/// Coordinator over one breakpoint registry and one subscriber hub
///
/// Construct one instance and share it by reference; there is no ambient
/// global.
pub struct Viewport<S: MediaSource> {
    source: S,
    config: ViewportConfig,
    registry: BreakpointRegistry,
    hub: SubscriberHub,
    events_tx: mpsc::UnboundedSender<MediaEvent>,
    events_rx: mpsc::UnboundedReceiver<MediaEvent>,
    events_processed: u64,
    broadcasts: u64,
}

impl<S: MediaSource> Viewport<S> {
    /// Create a viewport over the given media source with default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, ViewportConfig::default())
    }

    /// Create a viewport with custom configuration
    pub fn with_config(source: S, config: ViewportConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            source,
            config,
            registry: BreakpointRegistry::new(),
            hub: SubscriberHub::new(),
            events_tx,
            events_rx,
            events_processed: 0,
            broadcasts: 0,
        }
    }

    /// Get the viewport configuration
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Get a reference to the breakpoint registry
    pub fn registry(&self) -> &BreakpointRegistry {
        &self.registry
    }

    /// Get a reference to the subscriber hub
    pub fn subscribers(&self) -> &SubscriberHub {
        &self.hub
    }

    /// Register a breakpoint under a unique key.
    ///
    /// The condition text is lower-cased, validated against the accepted
    /// `(min-width: Npx)` / `(max-width: Npx)` shape, bound to the media
    /// source and watched for match-state changes, then inserted so that
    /// `max`-signed breakpoints stay in ascending width order.
    pub fn add_breakpoint(&mut self, key: &str, media: &str) -> Result<()> {
        if key.is_empty() {
            return Err(ViewportError::EmptyKey);
        }
        if media.is_empty() {
            return Err(ViewportError::EmptyQuery);
        }
        if self.registry.position(key).is_some() {
            return Err(ViewportError::DuplicateKey(key.to_string()));
        }

        let media = media.to_lowercase();
        let query = WidthQuery::parse(&media)?;

        let entry = match self.bind(key, &media, query) {
            Ok(entry) => entry,
            Err(error) => {
                // The caller only learns that the add failed; the cause stays
                // in the log
                tracing::debug!(key, media = %media, error = %error, "breakpoint binding failed");
                return Err(ViewportError::Construction);
            }
        };

        self.registry.insert(entry);
        tracing::info!(key, media = %media, total = self.registry.len(), "breakpoint added");
        Ok(())
    }

    /// Build and wire the live entry for an already validated breakpoint
    fn bind(&mut self, key: &str, media: &str, query: WidthQuery) -> Result<Breakpoint> {
        let binding = self.source.match_media(media)?;
        let mut entry = Breakpoint::new(key, query, binding);
        entry.watch(self.events_tx.clone());
        Ok(entry)
    }

    /// Remove a breakpoint and release its change subscription
    pub fn remove_breakpoint(&mut self, key: &str) -> Result<()> {
        let mut entry = self
            .registry
            .remove(key)
            .ok_or_else(|| ViewportError::KeyNotFound(key.to_string()))?;
        entry.release();

        tracing::info!(key, total = self.registry.len(), "breakpoint removed");
        Ok(())
    }

    /// Register a callback under the default subscriber name
    pub fn register<F>(&mut self, subscriber: F) -> Result<()>
    where
        F: FnMut(&Breakpoint) -> std::result::Result<(), SubscriberError> + Send + 'static,
    {
        self.hub.register(None, Box::new(subscriber))
    }

    /// Register a callback under an explicit subscriber name.
    ///
    /// A blank name falls back to the default subscriber name.
    pub fn register_as<F>(&mut self, name: &str, subscriber: F) -> Result<()>
    where
        F: FnMut(&Breakpoint) -> std::result::Result<(), SubscriberError> + Send + 'static,
    {
        self.hub.register(Some(name), Box::new(subscriber))
    }

    /// Detach one named subscriber; a blank name detaches every subscriber
    pub fn detach(&mut self, name: &str) {
        self.hub.detach(Some(name));
    }

    /// Detach every subscriber
    pub fn detach_all(&mut self) {
        self.hub.detach(None);
    }

    /// Breakpoints in registry order
    pub fn breakpoints(&self) -> &[Breakpoint] {
        self.registry.entries()
    }

    /// Position of a key in registry order, if registered
    pub fn breakpoint_exists(&self, key: &str) -> Option<usize> {
        self.registry.position(key)
    }

    /// Breakpoint keys in registry order
    pub fn breakpoint_keys(&self) -> Vec<&str> {
        self.registry.keys()
    }

    /// The currently active breakpoint: the first in registry order whose
    /// condition the viewport satisfies
    pub fn current(&self) -> Option<&Breakpoint> {
        self.registry.current()
    }

    /// Diagnostic counters
    pub fn stats(&self) -> ViewportStats {
        ViewportStats {
            breakpoints: self.registry.len(),
            subscribers: self.hub.len(),
            events_processed: self.events_processed,
            broadcasts: self.broadcasts,
        }
    }

    /// Handle one match-state change: re-evaluate the active breakpoint and
    /// broadcast it. When nothing matches, subscribers are not told.
    fn handle_change(&mut self, event: &MediaEvent) -> Result<()> {
        self.events_processed += 1;
        tracing::trace!(media = %event.media, matches = event.matches, "match state changed");

        let Some(breakpoint) = self.registry.current() else {
            return Ok(());
        };

        tracing::debug!(key = breakpoint.key(), "broadcasting active breakpoint");
        self.broadcasts += 1;
        self.hub
            .broadcast(breakpoint, self.config.isolate_subscribers)
    }

    /// Drain and handle every queued change event.
    ///
    /// Returns how many events were handled. Useful when the caller drives
    /// the width synchronously and wants notifications delivered in between.
    pub fn process_pending(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_change(&event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Process change events as they arrive.
    ///
    /// This method loops for the life of the viewport; use
    /// [`Viewport::run_until`] for graceful shutdown. Each event is handled
    /// synchronously and completely before the next is taken off the channel.
    pub async fn run(&mut self) -> Result<()> {
        while let Some(event) = self.events_rx.recv().await {
            self.handle_change(&event)?;
        }
        Ok(())
    }

    /// Run the event loop with graceful shutdown
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.run() => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use crate::media::SimulatedScreen;

    use super::*;

    type Seen = Arc<Mutex<Vec<String>>>;

    fn collector(viewport: &mut Viewport<SimulatedScreen>) -> Seen {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        viewport
            .register(move |breakpoint| {
                log.lock().push(breakpoint.key().to_string());
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_add_breakpoint_validation() {
        let mut viewport = Viewport::new(SimulatedScreen::new());

        assert!(matches!(
            viewport.add_breakpoint("", "(max-width: 500px)"),
            Err(ViewportError::EmptyKey)
        ));
        assert!(matches!(
            viewport.add_breakpoint("small", ""),
            Err(ViewportError::EmptyQuery)
        ));
        assert!(matches!(
            viewport.add_breakpoint("small", "(max-height: 500px)"),
            Err(ViewportError::InvalidQuery(_))
        ));

        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        assert!(matches!(
            viewport.add_breakpoint("small", "(max-width: 900px)"),
            Err(ViewportError::DuplicateKey(_))
        ));
        assert_eq!(viewport.breakpoints().len(), 1);
    }

    #[test]
    fn test_add_breakpoint_lowercases_media() {
        let mut viewport = Viewport::new(SimulatedScreen::new());
        viewport.add_breakpoint("small", "(MAX-WIDTH: 500PX)").unwrap();

        let entry = &viewport.breakpoints()[0];
        assert_eq!(entry.media(), "(max-width: 500px)");
    }

    #[test]
    fn test_breakpoints_kept_in_width_order() {
        let mut viewport = Viewport::new(SimulatedScreen::new());
        viewport.add_breakpoint("large", "(max-width: 1200px)").unwrap();
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();
        viewport.add_breakpoint("xlarge", "(min-width: 1200px)").unwrap();

        assert_eq!(
            viewport.breakpoint_keys(),
            ["small", "medium", "large", "xlarge"]
        );
        assert_eq!(viewport.breakpoint_exists("medium"), Some(1));
        assert_eq!(viewport.breakpoint_exists("missing"), None);
    }

    #[test]
    fn test_keys_stay_unique_across_add_remove() {
        let mut viewport = Viewport::new(SimulatedScreen::new());
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();
        viewport.remove_breakpoint("small").unwrap();
        viewport.add_breakpoint("small", "(max-width: 600px)").unwrap();

        let mut keys = viewport.breakpoint_keys();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), viewport.breakpoints().len());
    }

    struct FailingSource;

    impl crate::media::MediaSource for FailingSource {
        fn match_media(
            &self,
            media: &str,
        ) -> crate::error::Result<Box<dyn crate::media::WidthMedia>> {
            Err(ViewportError::InvalidQuery(media.to_string()))
        }
    }

    #[test]
    fn test_construction_failure_is_coarse() {
        let mut viewport = Viewport::new(FailingSource);

        // Validation passes; the source itself refuses to build the binding,
        // and the caller sees only the generic construction error
        assert!(matches!(
            viewport.add_breakpoint("small", "(max-width: 500px)"),
            Err(ViewportError::Construction)
        ));
        assert!(viewport.breakpoints().is_empty());
    }

    #[test]
    fn test_remove_unknown_breakpoint() {
        let mut viewport = Viewport::new(SimulatedScreen::new());
        assert!(matches!(
            viewport.remove_breakpoint("missing"),
            Err(ViewportError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_narrowing_broadcasts_each_crossing() {
        let screen = SimulatedScreen::with_width(1000.0);
        let mut viewport = Viewport::new(screen.clone());
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();
        let seen = collector(&mut viewport);

        // 1000 -> 600 crosses only the 900px threshold
        screen.set_width(600.0);
        assert_eq!(viewport.process_pending().unwrap(), 1);
        assert_eq!(*seen.lock(), ["medium"]);

        // 600 -> 400 crosses only the 500px threshold
        screen.set_width(400.0);
        assert_eq!(viewport.process_pending().unwrap(), 1);
        assert_eq!(*seen.lock(), ["medium", "small"]);
    }

    #[test]
    fn test_no_broadcast_when_nothing_matches() {
        let screen = SimulatedScreen::with_width(400.0);
        let mut viewport = Viewport::new(screen.clone());
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        let seen = collector(&mut viewport);

        // Widening past the threshold flips the condition off; with no match
        // left there is nothing to announce
        screen.set_width(800.0);
        assert_eq!(viewport.process_pending().unwrap(), 1);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_removed_breakpoint_stops_notifying() {
        let screen = SimulatedScreen::with_width(1000.0);
        let mut viewport = Viewport::new(screen.clone());
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();
        let seen = collector(&mut viewport);

        viewport.remove_breakpoint("small").unwrap();

        // 1000 -> 400 would have flipped both; only the surviving binding
        // emits an event now
        screen.set_width(400.0);
        assert_eq!(viewport.process_pending().unwrap(), 1);
        assert_eq!(*seen.lock(), ["medium"]);
    }

    #[test]
    fn test_register_duplicate_default_name() {
        let mut viewport = Viewport::new(SimulatedScreen::new());
        viewport.register(|_| Ok(())).unwrap();

        assert!(matches!(
            viewport.register(|_| Ok(())),
            Err(ViewportError::DuplicateSubscriber(_))
        ));
    }

    #[test]
    fn test_detach_one_and_all() {
        let mut viewport = Viewport::new(SimulatedScreen::new());
        viewport.register(|_| Ok(())).unwrap();
        viewport.register_as("menu", |_| Ok(())).unwrap();
        viewport.register_as("sidebar", |_| Ok(())).unwrap();

        viewport.detach("menu");
        assert_eq!(viewport.subscribers().names(), ["_", "sidebar"]);

        viewport.detach_all();
        assert!(viewport.subscribers().is_empty());
    }

    #[test]
    fn test_subscriber_failure_halts_by_default() {
        let screen = SimulatedScreen::with_width(1000.0);
        let mut viewport = Viewport::new(screen.clone());
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();

        viewport
            .register_as("bad", |_| Err("boom".into()))
            .unwrap();
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        viewport
            .register_as("after", move |breakpoint| {
                log.lock().push(breakpoint.key().to_string());
                Ok(())
            })
            .unwrap();

        screen.set_width(600.0);
        assert!(matches!(
            viewport.process_pending(),
            Err(ViewportError::Subscriber { name, .. }) if name == "bad"
        ));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_subscriber_failure_isolated_by_config() {
        let screen = SimulatedScreen::with_width(1000.0);
        let mut viewport = Viewport::with_config(
            screen.clone(),
            ViewportConfig::default().isolate_subscribers(true),
        );
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();

        viewport
            .register_as("bad", |_| Err("boom".into()))
            .unwrap();
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        viewport
            .register_as("after", move |breakpoint| {
                log.lock().push(breakpoint.key().to_string());
                Ok(())
            })
            .unwrap();

        screen.set_width(600.0);
        assert_eq!(viewport.process_pending().unwrap(), 1);
        assert_eq!(*seen.lock(), ["medium"]);
    }

    #[test]
    fn test_stats_counters() {
        let screen = SimulatedScreen::with_width(1000.0);
        let mut viewport = Viewport::new(screen.clone());
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();
        let _seen = collector(&mut viewport);

        // One event with a broadcast, then one event with no match left
        screen.set_width(600.0);
        viewport.process_pending().unwrap();
        viewport.remove_breakpoint("small").unwrap();
        screen.set_width(1000.0);
        viewport.process_pending().unwrap();

        let stats = viewport.stats();
        assert_eq!(stats.breakpoints, 1);
        assert_eq!(stats.subscribers, 1);
        assert_eq!(stats.events_processed, 2);
        assert_eq!(stats.broadcasts, 1);
    }

    #[tokio::test]
    async fn test_run_until_processes_events() {
        let screen = SimulatedScreen::with_width(1000.0);
        let mut viewport = Viewport::new(screen.clone());
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();
        viewport.add_breakpoint("medium", "(max-width: 900px)").unwrap();
        let seen = collector(&mut viewport);

        screen.set_width(600.0);
        screen.set_width(400.0);

        viewport
            .run_until(tokio::time::sleep(Duration::from_millis(50)))
            .await
            .unwrap();

        assert_eq!(*seen.lock(), ["medium", "small"]);
    }

    #[test]
    fn test_run_until_shutdown_without_events() {
        let screen = SimulatedScreen::new();
        let mut viewport = Viewport::new(screen);
        viewport.add_breakpoint("small", "(max-width: 500px)").unwrap();

        tokio_test::block_on(async {
            viewport
                .run_until(tokio::time::sleep(Duration::from_millis(10)))
                .await
                .unwrap();
        });

        assert_eq!(viewport.stats().events_processed, 0);
    }
}
