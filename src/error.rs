//! Crate error types
//!
//! Every failure is surfaced synchronously to the caller; nothing is retried
//! internally.

use std::fmt;

/// Convenience alias for results returned by this crate
pub type Result<T> = std::result::Result<T, ViewportError>;

/// Error returned by a failing subscriber callback
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for viewport operations
#[derive(Debug)]
pub enum ViewportError {
    /// Breakpoint key is empty
    EmptyKey,
    /// Width condition text is empty
    EmptyQuery,
    /// Breakpoint key already present in the registry
    DuplicateKey(String),
    /// Breakpoint key not present in the registry
    KeyNotFound(String),
    /// Condition text does not parse as a width query
    InvalidQuery(String),
    /// Breakpoint could not be built or attached; the cause is only logged
    Construction,
    /// Subscriber name already registered
    DuplicateSubscriber(String),
    /// A subscriber callback failed during broadcast
    Subscriber {
        /// Name the failing subscriber was registered under
        name: String,
        /// Error the callback returned
        source: SubscriberError,
    },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportError::EmptyKey => write!(f, "Breakpoint key is empty"),
            ViewportError::EmptyQuery => write!(f, "Width condition is empty"),
            ViewportError::DuplicateKey(key) => {
                write!(f, "Breakpoint already exists: {}", key)
            }
            ViewportError::KeyNotFound(key) => write!(f, "Breakpoint not found: {}", key),
            ViewportError::InvalidQuery(media) => {
                write!(f, "Not a valid width condition: {}", media)
            }
            ViewportError::Construction => write!(f, "Breakpoint could not be added"),
            ViewportError::DuplicateSubscriber(name) => {
                write!(f, "Subscriber name already registered: {}", name)
            }
            ViewportError::Subscriber { name, source } => {
                write!(f, "Subscriber '{}' failed: {}", name, source)
            }
        }
    }
}

impl std::error::Error for ViewportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewportError::Subscriber { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
