use log::warn;

use super::{FAVORITES_KEY, Store, StorageError};
use crate::core::favorites::Favorites;

/// Read the persisted favorites. Missing or unreadable data yields an empty set.
pub fn load(store: &Store) -> Favorites {
    match store.get_json::<Vec<u32>>(FAVORITES_KEY) {
        Ok(Some(ids)) => ids.into_iter().collect(),
        Ok(None) => Favorites::new(),
        Err(e) => {
            warn!("Failed to load favorites: {}", e);
            Favorites::new()
        }
    }
}

pub fn save(store: &Store, favorites: &Favorites) -> Result<(), StorageError> {
    store.set_json(FAVORITES_KEY, favorites)
}
