//! # Filter/Sort Pipeline
//!
//! Pure functions over restaurant slices. Nothing here mutates its input;
//! every step returns a fresh `Vec`.
//!
//! ```text
//! all restaurants → filter_by_category → search_by_name → sort_by_rating → visible
//! ```

use std::fmt;

use crate::data::Restaurant;

/// Label of the sentinel category that disables filtering.
pub const ALL_LABEL: &str = "Alle";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Cuisine(String),
}

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::All => ALL_LABEL,
            Category::Cuisine(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// What the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub category: Category,
    pub search: String,
    pub sort: SortDirection,
}

/// `[All, ...distinct cuisines in first-seen order]`
pub fn categories(restaurants: &[Restaurant]) -> Vec<Category> {
    let mut result = vec![Category::All];
    for restaurant in restaurants {
        let exists = result
            .iter()
            .any(|c| matches!(c, Category::Cuisine(name) if *name == restaurant.cuisine));
        if !exists {
            result.push(Category::Cuisine(restaurant.cuisine.clone()));
        }
    }
    result
}

pub fn filter_by_category(restaurants: &[Restaurant], category: &Category) -> Vec<Restaurant> {
    match category {
        Category::All => restaurants.to_vec(),
        Category::Cuisine(name) => restaurants
            .iter()
            .filter(|r| r.cuisine == *name)
            .cloned()
            .collect(),
    }
}

/// Case-insensitive substring match on the name. A blank term keeps everything.
pub fn search_by_name(restaurants: &[Restaurant], term: &str) -> Vec<Restaurant> {
    if term.trim().is_empty() {
        return restaurants.to_vec();
    }
    let needle = term.to_lowercase();
    restaurants
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable: equal ratings keep their input order in both directions.
pub fn sort_by_rating(restaurants: &[Restaurant], direction: SortDirection) -> Vec<Restaurant> {
    let mut sorted = restaurants.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortDirection::Descending => sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    sorted
}

pub fn apply(restaurants: &[Restaurant], query: &Query) -> Vec<Restaurant> {
    let filtered = filter_by_category(restaurants, &query.category);
    let searched = search_by_name(&filtered, &query.search);
    sort_by_rating(&searched, query.sort)
}
