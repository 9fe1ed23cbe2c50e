//! # Application State
//!
//! Core business state for LocalEats. No TUI types in here; presentation
//! state (selection, search buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source_name: String                 // "local" / "http"
//! ├── restaurants: Vec<Restaurant>        // full list, replaced wholesale
//! ├── categories: Vec<Category>           // [All, ...cuisines]
//! ├── query: Query                        // category, search, sort
//! ├── favorites: Favorites                // persisted id set
//! ├── stats: Option<Stats>                // title bar numbers
//! ├── load_status: LoadStatus             // primary load lifecycle
//! ├── showing_cache: bool                 // list came from the cache
//! ├── cached_at: Option<DateTime<Utc>>    // capture time of that cache
//! ├── reviews: HashMap<u32, ReviewPanel>  // expanded cards only
//! └── status_message: String              // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::core::favorites::Favorites;
use crate::core::filter::{self, Category, Query};
use crate::data::{LoadError, Restaurant, Review, Stats};

/// Lifecycle of the primary restaurant load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    Idle,
    /// No data to show; the loading panel is visible.
    Loading,
    /// Cached data is shown while a live load runs in the background.
    Revalidating,
    Ready,
    /// Load failed with nothing to fall back on.
    Failed(LoadError),
}

impl LoadStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, LoadStatus::Loading | LoadStatus::Revalidating)
    }
}

/// Contents of an expanded review region.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewPanel {
    Loading,
    Loaded(Vec<Review>),
    Failed(String),
}

pub struct App {
    pub source_name: String,
    pub restaurants: Vec<Restaurant>,
    pub categories: Vec<Category>,
    pub query: Query,
    pub favorites: Favorites,
    pub stats: Option<Stats>,
    pub load_status: LoadStatus,
    pub showing_cache: bool,
    pub cached_at: Option<DateTime<Utc>>,
    pub reviews: HashMap<u32, ReviewPanel>,
    pub status_message: String,
}

impl App {
    pub fn new(source_name: impl Into<String>, favorites: Favorites) -> Self {
        Self {
            source_name: source_name.into(),
            restaurants: Vec::new(),
            categories: vec![Category::All],
            query: Query::default(),
            favorites,
            stats: None,
            load_status: LoadStatus::Idle,
            showing_cache: false,
            cached_at: None,
            reviews: HashMap::new(),
            status_message: String::from("Willkommen bei LocalEats!"),
        }
    }

    /// The list as the user should see it right now.
    pub fn visible(&self) -> Vec<Restaurant> {
        filter::apply(&self.restaurants, &self.query)
    }

    pub fn restaurant(&self, id: u32) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.reviews.contains_key(&id)
    }

    /// Replace the list and keep derived state consistent with it.
    pub(crate) fn replace_restaurants(&mut self, restaurants: Vec<Restaurant>) {
        self.categories = filter::categories(&restaurants);
        if !self.categories.contains(&self.query.category) {
            self.query.category = Category::All;
        }
        self.restaurants = restaurants;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seven_restaurants, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Willkommen bei LocalEats!");
        assert_eq!(app.load_status, LoadStatus::Idle);
        assert_eq!(app.categories, vec![Category::All]);
        assert!(app.visible().is_empty());
    }

    #[test]
    fn test_replace_resets_vanished_category() {
        let mut app = test_app();
        app.replace_restaurants(seven_restaurants());
        app.query.category = Category::Cuisine("Vegan".to_string());
        let without_vegan: Vec<_> = seven_restaurants()
            .into_iter()
            .filter(|r| r.cuisine != "Vegan")
            .collect();
        app.replace_restaurants(without_vegan);
        assert_eq!(app.query.category, Category::All);
    }

    #[test]
    fn test_visible_is_sorted_descending_by_default() {
        let mut app = test_app();
        app.replace_restaurants(seven_restaurants());
        let visible = app.visible();
        assert_eq!(visible.len(), 7);
        assert!(visible.windows(2).all(|w| w[0].rating >= w[1].rating));
    }
}
