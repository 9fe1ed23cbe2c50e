//! # Fetch with Timeout
//!
//! One GET request raced against two ways of giving up:
//!
//! ```text
//! fetch_json ──┬── request (send + decode)   → Ok(T) / Http / Network / Parse
//!              ├── deadline timer            → LoadError::Timeout
//!              └── caller's cancellation     → LoadError::Cancelled
//! ```
//!
//! The deadline timer is owned by the race. Whichever branch wins, the other
//! two futures are dropped, so the timer can never fire after the request
//! has resolved.

use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::source::LoadError;

/// Deadline for the primary load (restaurants + stats).
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(5000);
/// Deadline for a review request.
pub const DEFAULT_REVIEW_TIMEOUT: Duration = Duration::from_millis(3000);

/// GET `url` and decode the JSON body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<T, LoadError> {
    debug!("GET {} (timeout {} ms)", url, timeout.as_millis());

    let request = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} failed with status {}", url, status);
            return Err(LoadError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                LoadError::Parse(e.to_string())
            } else {
                LoadError::Network(e.to_string())
            }
        })
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("GET {} cancelled", url);
            Err(LoadError::Cancelled)
        }
        _ = tokio::time::sleep(timeout) => {
            warn!("GET {} timed out after {} ms", url, timeout.as_millis());
            Err(LoadError::Timeout(timeout))
        }
        result = request => result,
    }
}
