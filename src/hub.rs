//! Subscriber hub
//!
//! Named callbacks interested in active-breakpoint changes. Names are unique;
//! a reserved sentinel stands in when no usable name is given. Broadcast walks
//! the map in insertion order and invokes every callback synchronously.

use indexmap::IndexMap;

use crate::error::{Result, SubscriberError, ViewportError};
use crate::registry::Breakpoint;

/// Reserved name used when a subscriber registers without one
pub const DEFAULT_SUBSCRIBER: &str = "_";

/// A registered callback
pub type Subscriber =
    Box<dyn FnMut(&Breakpoint) -> std::result::Result<(), SubscriberError> + Send>;

/// Mapping from subscriber name to callback
#[derive(Default)]
pub struct SubscriberHub {
    subscribers: IndexMap<String, Subscriber>,
}

impl SubscriberHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self {
            subscribers: IndexMap::new(),
        }
    }

    /// A name counts as usable once it contains anything besides spaces
    fn usable(name: Option<&str>) -> Option<&str> {
        name.filter(|name| name.chars().any(|c| c != ' '))
    }

    /// Register a callback.
    ///
    /// A missing or blank name maps to [`DEFAULT_SUBSCRIBER`]; registering the
    /// same resolved name twice is an error.
    pub fn register(&mut self, name: Option<&str>, subscriber: Subscriber) -> Result<()> {
        let name = Self::usable(name).unwrap_or(DEFAULT_SUBSCRIBER);

        if self.subscribers.contains_key(name) {
            return Err(ViewportError::DuplicateSubscriber(name.to_string()));
        }

        self.subscribers.insert(name.to_string(), subscriber);
        tracing::debug!(name, total = self.subscribers.len(), "subscriber registered");
        Ok(())
    }

    /// Detach subscribers.
    ///
    /// A missing or blank name clears every subscriber; otherwise exactly the
    /// named one is removed (no-op when absent), keeping the order of the rest.
    pub fn detach(&mut self, name: Option<&str>) {
        match Self::usable(name) {
            Some(name) => {
                if self.subscribers.shift_remove(name).is_some() {
                    tracing::debug!(name, "subscriber detached");
                }
            }
            None => {
                let count = self.subscribers.len();
                self.subscribers.clear();
                tracing::debug!(count, "all subscribers detached");
            }
        }
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the hub has no subscribers
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.subscribers.contains_key(name)
    }

    /// Registered names in broadcast order
    pub fn names(&self) -> Vec<&str> {
        self.subscribers.keys().map(String::as_str).collect()
    }

    /// Invoke every subscriber with the active breakpoint, in insertion order.
    ///
    /// With `isolate` unset, the first failing callback halts the remaining
    /// calls and its error propagates to the caller. With `isolate` set,
    /// failures are logged and the remaining subscribers still run.
    pub fn broadcast(&mut self, breakpoint: &Breakpoint, isolate: bool) -> Result<()> {
        for (name, subscriber) in &mut self.subscribers {
            if let Err(error) = subscriber(breakpoint) {
                if !isolate {
                    return Err(ViewportError::Subscriber {
                        name: name.clone(),
                        source: error,
                    });
                }
                tracing::warn!(name = %name, error = %error, "subscriber failed");
            }
        }
        Ok(())
    }
}
