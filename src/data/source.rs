use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::{Restaurant, Review, Stats};

/// Errors that can occur while loading data.
/// Each cause stays distinguishable so the controller can decide what to surface.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The request deadline elapsed before a response arrived.
    Timeout(Duration),
    /// The caller revoked the request (cancel key, collapse, superseded request).
    Cancelled,
    /// Server answered with a non-success status.
    Http { status: u16, url: String },
    /// Transport-level failure (DNS, connection refused, reset).
    Network(String),
    /// Body could not be decoded into the expected shape.
    Parse(String),
}

impl LoadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Timeout(after) => {
                write!(f, "request timed out after {} ms", after.as_millis())
            }
            LoadError::Cancelled => write!(f, "cancelled by user"),
            LoadError::Http { status, url } => write!(f, "HTTP error {status} for {url}"),
            LoadError::Network(msg) => write!(f, "network error: {msg}"),
            LoadError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Where restaurants, stats and reviews come from.
///
/// Every call observes `cancel`: once it fires the call resolves to
/// `LoadError::Cancelled` without waiting for the underlying work.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    /// Returns the name of the source (for logs and the title bar).
    fn name(&self) -> &str;

    async fn restaurants(&self, cancel: &CancellationToken) -> Result<Vec<Restaurant>, LoadError>;

    async fn stats(&self, cancel: &CancellationToken) -> Result<Stats, LoadError>;

    /// The flat review list for every restaurant. Callers filter per restaurant.
    async fn reviews(&self, cancel: &CancellationToken) -> Result<Vec<Review>, LoadError>;
}
