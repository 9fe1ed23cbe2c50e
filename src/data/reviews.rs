//! # Review Loader
//!
//! Reviews are fetched on first expand and memoized per restaurant for the
//! lifetime of the process.
//!
//! ```text
//! load(id) ── memo hit ───────────────────────────────→ Some(cached)
//!          └─ begin(id): revoke old token, install new (generation n)
//!               └─ fetch ── still generation n? ── yes → memo[id], Some(list)
//!                        │                       └─ no → None (superseded)
//!                        └─ Cancelled ───────────────────→ None
//! ```
//!
//! At most one request per id is live. The memo lock is never held across an
//! await.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};
use tokio_util::sync::CancellationToken;

use super::{LoadError, RestaurantSource, Review};

struct InFlight {
    token: CancellationToken,
    generation: u64,
}

#[derive(Default)]
struct ReviewBook {
    memo: HashMap<u32, Vec<Review>>,
    in_flight: HashMap<u32, InFlight>,
    next_generation: u64,
}

impl ReviewBook {
    /// Revoke any in-flight request for `id` and register a new one.
    fn begin(&mut self, id: u32) -> (CancellationToken, u64) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let token = CancellationToken::new();
        let previous = self.in_flight.insert(
            id,
            InFlight {
                token: token.clone(),
                generation,
            },
        );
        if let Some(previous) = previous {
            debug!("Superseding review request for restaurant {}", id);
            previous.token.cancel();
        }
        (token, generation)
    }

    /// Drop the handle for `id` if it is still `generation`. Returns whether it was current.
    fn finish(&mut self, id: u32, generation: u64) -> bool {
        match self.in_flight.get(&id) {
            Some(current) if current.generation == generation => {
                self.in_flight.remove(&id);
                true
            }
            _ => false,
        }
    }
}

pub struct ReviewLoader {
    source: Arc<dyn RestaurantSource>,
    book: Mutex<ReviewBook>,
}

impl ReviewLoader {
    pub fn new(source: Arc<dyn RestaurantSource>) -> Self {
        Self {
            source,
            book: Mutex::new(ReviewBook::default()),
        }
    }

    fn book(&self) -> MutexGuard<'_, ReviewBook> {
        self.book.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reviews for one restaurant.
    ///
    /// `Ok(None)` means the request was cancelled or replaced by a newer one
    /// for the same id; callers leave their view as it is.
    pub async fn load(&self, id: u32) -> Result<Option<Vec<Review>>, LoadError> {
        let (token, generation) = {
            let mut book = self.book();
            if let Some(cached) = book.memo.get(&id) {
                debug!("Review memo hit for restaurant {}", id);
                return Ok(Some(cached.clone()));
            }
            book.begin(id)
        };

        let result = self.source.reviews(&token).await;

        let mut book = self.book();
        let current = book.finish(id, generation);
        match result {
            Ok(all) if current && !token.is_cancelled() => {
                let reviews: Vec<Review> = all
                    .into_iter()
                    .filter(|review| review.restaurant_id == id)
                    .collect();
                info!("Loaded {} reviews for restaurant {}", reviews.len(), id);
                book.memo.insert(id, reviews.clone());
                Ok(Some(reviews))
            }
            Ok(_) => {
                debug!("Discarding superseded reviews for restaurant {}", id);
                Ok(None)
            }
            Err(LoadError::Cancelled) => {
                debug!("Review request cancelled for restaurant {}", id);
                Ok(None)
            }
            Err(e) if !current => {
                debug!("Ignoring failure of superseded review request for restaurant {}: {}", id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Revoke the in-flight request for `id`, if any.
    pub fn cancel(&self, id: u32) -> bool {
        match self.book().in_flight.remove(&id) {
            Some(in_flight) => {
                debug!("Cancelling review request for restaurant {}", id);
                in_flight.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Revoke every in-flight request (shutdown).
    pub fn cancel_all(&self) {
        for (_, in_flight) in self.book().in_flight.drain() {
            in_flight.token.cancel();
        }
    }

    pub fn cached(&self, id: u32) -> Option<Vec<Review>> {
        self.book().memo.get(&id).cloned()
    }

    pub fn is_loading(&self, id: u32) -> bool {
        self.book().in_flight.contains_key(&id)
    }
}
