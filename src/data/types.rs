use serde::{Deserialize, Serialize};
use std::fmt;

/// Price tier symbol as shown on a card.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceTier {
    #[serde(rename = "€")]
    Budget,
    #[serde(rename = "€€")]
    Moderate,
    #[serde(rename = "€€€")]
    Upscale,
}

impl PriceTier {
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceTier::Budget => "€",
            PriceTier::Moderate => "€€",
            PriceTier::Upscale => "€€€",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single restaurant record. Never patched in place: reloads replace the whole list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: u32,
    pub name: String,
    pub cuisine: String,
    /// The first exercise published this field as `priceLevel`.
    #[serde(alias = "priceLevel")]
    pub price: PriceTier,
    pub rating: f64,
    pub image: String,
}

/// A review as served by the flat `reviews.json` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub restaurant_id: u32,
    pub author: String,
    pub rating: u8,
    pub text: String,
}

impl Review {
    /// Star string for the rating, e.g. `★★★★`.
    pub fn stars(&self) -> String {
        "★".repeat(self.rating.min(5) as usize)
    }
}

/// Aggregate numbers shown in the title bar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_restaurants: u32,
    pub total_reviews: u32,
    pub average_rating: f64,
}

impl Stats {
    pub fn summary(&self) -> String {
        format!(
            "{} Restaurants · {} Bewertungen · ⌀ {}★",
            self.total_restaurants, self.total_reviews, self.average_rating
        )
    }
}

/// Everything the primary load delivers in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialData {
    pub restaurants: Vec<Restaurant>,
    pub stats: Stats,
}
