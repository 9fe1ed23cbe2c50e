//! # Data Layer
//!
//! Everything that crosses the process boundary to get restaurant data:
//! the record types, the `RestaurantSource` trait and its implementations,
//! and the loaders that add deadlines, cancellation and memoization on top.

pub mod fetch;
pub mod loader;
pub mod reviews;
pub mod source;
pub mod sources;
pub mod types;

pub use loader::load_initial;
pub use reviews::ReviewLoader;
pub use source::{LoadError, RestaurantSource};
pub use sources::{HttpSource, LocalSource};
pub use types::{InitialData, PriceTier, Restaurant, Review, Stats};
