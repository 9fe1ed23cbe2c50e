//! Bundled dataset. Works offline and needs no server.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::data::{LoadError, PriceTier, Restaurant, RestaurantSource, Review, Stats};

pub struct LocalSource {
    restaurants: Vec<Restaurant>,
    reviews: Vec<Review>,
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSource {
    pub fn new() -> Self {
        Self {
            restaurants: bundled_restaurants(),
            reviews: bundled_reviews(),
        }
    }

    fn check(cancel: &CancellationToken) -> Result<(), LoadError> {
        if cancel.is_cancelled() {
            Err(LoadError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RestaurantSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn restaurants(&self, cancel: &CancellationToken) -> Result<Vec<Restaurant>, LoadError> {
        Self::check(cancel)?;
        Ok(self.restaurants.clone())
    }

    async fn stats(&self, cancel: &CancellationToken) -> Result<Stats, LoadError> {
        Self::check(cancel)?;
        Ok(compute_stats(&self.restaurants, &self.reviews))
    }

    async fn reviews(&self, cancel: &CancellationToken) -> Result<Vec<Review>, LoadError> {
        Self::check(cancel)?;
        Ok(self.reviews.clone())
    }
}

/// Stats derived from the records, average rounded to one decimal.
pub fn compute_stats(restaurants: &[Restaurant], reviews: &[Review]) -> Stats {
    let average_rating = if restaurants.is_empty() {
        0.0
    } else {
        let sum: f64 = restaurants.iter().map(|r| r.rating).sum();
        (sum / restaurants.len() as f64 * 10.0).round() / 10.0
    };
    Stats {
        total_restaurants: restaurants.len() as u32,
        total_reviews: reviews.len() as u32,
        average_rating,
    }
}

fn restaurant(id: u32, name: &str, cuisine: &str, price: PriceTier, rating: f64) -> Restaurant {
    Restaurant {
        id,
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        price,
        rating,
        image: format!("images/{name}.jpg"),
    }
}

fn bundled_restaurants() -> Vec<Restaurant> {
    use PriceTier::*;
    vec![
        restaurant(1, "Trattoria Roma", "Italienisch", Moderate, 4.7),
        restaurant(2, "Sakura", "Asiatisch", Moderate, 4.5),
        restaurant(3, "Green Leaf", "Vegan", Moderate, 4.6),
        restaurant(4, "Burger Barn", "Amerikanisch", Budget, 4.3),
        restaurant(5, "La Bodega", "Mediterran", Moderate, 4.4),
        restaurant(6, "Saigon Kitchen", "Vietnamesisch", Budget, 4.5),
        restaurant(7, "Maison Douce", "Französisch", Upscale, 4.8),
        restaurant(8, "El Toro Loco", "Mexikanisch", Moderate, 4.6),
    ]
}

fn review(restaurant_id: u32, author: &str, rating: u8, text: &str) -> Review {
    Review {
        restaurant_id,
        author: author.to_string(),
        rating,
        text: text.to_string(),
    }
}

fn bundled_reviews() -> Vec<Review> {
    vec![
        review(1, "Giulia", 5, "Die beste Pasta der Stadt."),
        review(1, "Markus", 4, "Gemütlich, aber am Wochenende sehr voll."),
        review(2, "Yuki", 5, "Frisches Sushi und freundlicher Service."),
        review(3, "Lena", 5, "Kreative vegane Küche, sehr empfehlenswert."),
        review(3, "Tom", 4, "Leckere Bowls, etwas lange Wartezeit."),
        review(4, "Chris", 4, "Saftige Burger, gute Pommes."),
        review(5, "Sofia", 4, "Tapas wie in Spanien."),
        review(6, "Minh", 5, "Pho wie bei meiner Oma."),
        review(7, "Claire", 5, "Himmlische Desserts."),
        review(7, "Paul", 4, "Teuer, aber jeden Cent wert."),
        review(8, "Diego", 4, "Scharf und authentisch."),
    ]
}
