//! Last successfully fetched restaurant list, for stale-while-revalidate.
//!
//! The capture time is recorded but never compared against an expiry: a
//! cached list is trusted until the next live load replaces it.

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, warn};

use super::{CACHE_KEY, CACHE_TIMESTAMP_KEY, Store, StorageError};
use crate::data::Restaurant;

pub struct RestaurantCache<'a> {
    store: &'a Store,
}

impl<'a> RestaurantCache<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Persist `restaurants` together with the current time.
    pub fn save(&self, restaurants: &[Restaurant]) -> Result<(), StorageError> {
        self.store.set_json(CACHE_KEY, restaurants)?;
        let now = Utc::now().timestamp_millis();
        self.store.set(CACHE_TIMESTAMP_KEY, &now.to_string())?;
        debug!("Cached {} restaurants", restaurants.len());
        Ok(())
    }

    /// The cached list, or `None` if there is none or it cannot be read.
    pub fn load(&self) -> Option<Vec<Restaurant>> {
        match self.store.get_json::<Vec<Restaurant>>(CACHE_KEY) {
            Ok(list) => list,
            Err(e) => {
                warn!("Failed to load restaurant cache: {}", e);
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.load().is_some()
    }

    /// When the cached list was captured.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.store.get(CACHE_TIMESTAMP_KEY).ok().flatten()?;
        let millis = raw.trim().parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CACHE_KEY)?;
        self.store.remove(CACHE_TIMESTAMP_KEY)
    }
}
