//! Breakpoint registry implementation
//!
//! An ordered sequence of breakpoints with key lookup, positional insertion
//! and a first-match scan for the currently active entry.

use crate::query::Sign;

use super::entry::Breakpoint;

/// Ordered collection of registered breakpoints
///
/// Keys are unique across the registry. The sequence order is not creation
/// order; see [`BreakpointRegistry::insert`].
#[derive(Debug, Default)]
pub struct BreakpointRegistry {
    entries: Vec<Breakpoint>,
}

impl BreakpointRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of registered breakpoints
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of a key in registry order, if present
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }

    /// Look up an entry by key
    pub fn get(&self, key: &str) -> Option<&Breakpoint> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Keys in registry order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key()).collect()
    }

    /// All entries in registry order
    pub fn entries(&self) -> &[Breakpoint] {
        &self.entries
    }

    /// First entry whose condition the viewport currently satisfies
    ///
    /// Because `max` entries are kept in ascending width order, this returns
    /// the narrowest matching `max` breakpoint when several match at once.
    pub fn current(&self) -> Option<&Breakpoint> {
        self.entries.iter().find(|entry| entry.is_active())
    }

    /// Insert an entry, keeping `max`-signed breakpoints in ascending width order.
    ///
    /// The new entry lands before the first existing `max` entry with a
    /// strictly greater width, or at the end when there is none. Ties and
    /// `min`-signed entries always append.
    pub fn insert(&mut self, entry: Breakpoint) {
        let at = self.entries.iter().position(|existing| {
            existing.query().sign == Sign::Max && existing.query().width > entry.query().width
        });

        match at {
            Some(index) => self.entries.insert(index, entry),
            None => self.entries.push(entry),
        }
    }

    /// Remove an entry by key
    ///
    /// Returns `None` (and leaves the registry untouched) when the key is
    /// absent.
    pub fn remove(&mut self, key: &str) -> Option<Breakpoint> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }
}
