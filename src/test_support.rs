//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::favorites::Favorites;
use crate::data::{LoadError, PriceTier, Restaurant, RestaurantSource, Review, Stats};

pub fn restaurant(id: u32, name: &str, cuisine: &str, rating: f64) -> Restaurant {
    Restaurant {
        id,
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        price: PriceTier::Moderate,
        rating,
        image: format!("images/{name}.jpg"),
    }
}

/// Seven records, exactly one Italian, two Asian (tied at 4.5).
pub fn seven_restaurants() -> Vec<Restaurant> {
    vec![
        restaurant(1, "Trattoria Roma", "Italienisch", 4.7),
        restaurant(2, "Sakura", "Asiatisch", 4.5),
        restaurant(3, "Green Leaf", "Vegan", 4.6),
        restaurant(4, "Burger Barn", "Amerikanisch", 4.3),
        restaurant(5, "La Bodega", "Mediterran", 4.4),
        restaurant(6, "Saigon Kitchen", "Asiatisch", 4.5),
        restaurant(7, "Maison Douce", "Französisch", 4.8),
    ]
}

/// Creates a test App with no favorites.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new("test", Favorites::new())
}

/// A source whose review call waits `delay` (or until cancelled) and counts calls.
pub struct SlowSource {
    pub delay: Duration,
    pub reviews: Vec<Review>,
    pub review_calls: AtomicUsize,
}

impl SlowSource {
    pub fn new(delay: Duration, reviews: Vec<Review>) -> Self {
        Self {
            delay,
            reviews,
            review_calls: AtomicUsize::new(0),
        }
    }

    pub fn review_calls(&self) -> usize {
        self.review_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self, cancel: &CancellationToken) -> Result<(), LoadError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(LoadError::Cancelled),
            _ = tokio::time::sleep(self.delay) => Ok(()),
        }
    }
}

#[async_trait]
impl RestaurantSource for SlowSource {
    fn name(&self) -> &str {
        "slow"
    }

    async fn restaurants(&self, cancel: &CancellationToken) -> Result<Vec<Restaurant>, LoadError> {
        self.wait(cancel).await?;
        Ok(seven_restaurants())
    }

    async fn stats(&self, cancel: &CancellationToken) -> Result<Stats, LoadError> {
        self.wait(cancel).await?;
        Ok(Stats {
            total_restaurants: 7,
            total_reviews: self.reviews.len() as u32,
            average_rating: 4.5,
        })
    }

    async fn reviews(&self, cancel: &CancellationToken) -> Result<Vec<Review>, LoadError> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(cancel).await?;
        Ok(self.reviews.clone())
    }
}

/// A unique scratch directory, removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "localeats-{}-{}-{}",
            label,
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
