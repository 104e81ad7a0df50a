//! Breakpoint entry type
//!
//! One entry per registered breakpoint: the key, the parsed width query, and
//! the live media binding the key is attached to. While an entry is alive its
//! binding is watched for match-state changes; removal releases the watch.

use std::fmt;

use crate::media::{MediaSender, WidthMedia};
use crate::query::WidthQuery;

/// A named breakpoint held by the registry
pub struct Breakpoint {
    /// Unique identifier; immutable once created
    key: String,
    /// Parsed sign/width descriptor
    query: WidthQuery,
    /// Live width-condition binding
    media: Box<dyn WidthMedia>,
}

impl Breakpoint {
    pub(crate) fn new(
        key: impl Into<String>,
        query: WidthQuery,
        media: Box<dyn WidthMedia>,
    ) -> Self {
        Self {
            key: key.into(),
            query,
            media,
        }
    }

    /// The breakpoint's unique key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The parsed width query
    pub fn query(&self) -> WidthQuery {
        self.query
    }

    /// Condition text of the media binding
    pub fn media(&self) -> &str {
        self.media.media()
    }

    /// Whether the viewport currently satisfies this breakpoint's condition
    pub fn is_active(&self) -> bool {
        self.media.matches()
    }

    /// Attach the change-event sender to the media binding
    pub(crate) fn watch(&mut self, tx: MediaSender) {
        self.media.watch(tx);
    }

    /// Release the media binding's change subscription
    pub(crate) fn release(&mut self) {
        self.media.unwatch();
    }
}

impl fmt::Debug for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breakpoint")
            .field("key", &self.key)
            .field("query", &self.query)
            .field("matches", &self.media.matches())
            .finish()
    }
}
