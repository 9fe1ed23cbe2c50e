use serde::{Deserialize, Serialize};

/// Restaurant ids marked as favorite, in the order they were added.
///
/// Serialized as a plain JSON array of integers. Equality is set equality;
/// the order only matters for serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<u32>);

impl PartialEq for Favorites {
    fn eq(&self, other: &Self) -> bool {
        // Ids are unique, so same length + containment is set equality.
        self.len() == other.len() && self.0.iter().all(|&id| other.contains(id))
    }
}

impl Eq for Favorites {}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.0.iter().position(|&f| f == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[u32] {
        &self.0
    }
}

impl FromIterator<u32> for Favorites {
    /// Duplicates are collapsed, first occurrence wins.
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            if !favorites.contains(id) {
                favorites.0.push(id);
            }
        }
        favorites
    }
}
