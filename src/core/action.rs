//! # Actions
//!
//! Everything that can happen in LocalEats becomes an `Action`.
//! User presses Tab? That's `Action::NextCategory`.
//! The background load finishes? That's `Action::LoadSucceeded(data)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the event loop must carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every arm either completes its state change or leaves the state as it was.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::core::filter::Category;
use crate::core::state::{App, LoadStatus, ReviewPanel};
use crate::data::{InitialData, LoadError, Restaurant, Review};

#[derive(Debug, Clone)]
pub enum Action {
    /// A cached list was found at startup.
    CacheRestored {
        restaurants: Vec<Restaurant>,
        saved_at: Option<DateTime<Utc>>,
    },
    /// Issue the primary load (revalidates when cached data is showing).
    StartLoad,
    /// Re-issue the primary load, ignoring any cached data.
    Retry,
    /// Abort the in-flight primary load.
    CancelLoad,
    LoadSucceeded(InitialData),
    LoadFailed(LoadError),
    NextCategory,
    PrevCategory,
    /// Search term after the debounce quiet period.
    SearchCommitted(String),
    ToggleSort,
    ToggleFavorite(u32),
    /// Expand a collapsed review region or collapse an expanded one.
    ToggleReviews(u32),
    ReviewsLoaded {
        id: u32,
        reviews: Vec<Review>,
    },
    ReviewsFailed {
        id: u32,
        message: String,
    },
    Quit,
}

/// Side effect requested by `update()`, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SpawnLoad,
    AbortLoad,
    SaveCache,
    SaveFavorites,
    SpawnReviews(u32),
    CancelReviews(u32),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::CacheRestored {
            restaurants,
            saved_at,
        } => {
            info!("Showing {} cached restaurants", restaurants.len());
            app.replace_restaurants(restaurants);
            app.showing_cache = true;
            app.cached_at = saved_at;
            app.load_status = LoadStatus::Ready;
            app.status_message = String::from("Zwischengespeicherte Daten");
            Effect::None
        }
        Action::StartLoad => {
            if app.load_status.is_in_flight() {
                return Effect::None;
            }
            app.load_status = if app.showing_cache {
                LoadStatus::Revalidating
            } else {
                LoadStatus::Loading
            };
            Effect::SpawnLoad
        }
        Action::Retry => {
            if app.load_status.is_in_flight() {
                return Effect::None;
            }
            app.showing_cache = false;
            app.cached_at = None;
            app.load_status = LoadStatus::Loading;
            app.status_message = String::from("Erneuter Versuch...");
            Effect::SpawnLoad
        }
        Action::CancelLoad => {
            if app.load_status.is_in_flight() {
                Effect::AbortLoad
            } else {
                Effect::None
            }
        }
        Action::LoadSucceeded(data) => {
            app.status_message = format!("{} Restaurants geladen", data.restaurants.len());
            app.replace_restaurants(data.restaurants);
            app.stats = Some(data.stats);
            app.showing_cache = false;
            app.cached_at = None;
            app.load_status = LoadStatus::Ready;
            Effect::SaveCache
        }
        Action::LoadFailed(error) => {
            match app.load_status {
                LoadStatus::Revalidating => {
                    // Stale view stays; failure goes to the log only.
                    warn!("Background refresh failed, keeping cached data: {}", error);
                    app.load_status = LoadStatus::Ready;
                }
                LoadStatus::Loading => {
                    warn!("Load failed: {}", error);
                    app.status_message = error.to_string();
                    app.load_status = LoadStatus::Failed(error);
                }
                _ => debug!("Ignoring load failure outside a load: {}", error),
            }
            Effect::None
        }
        Action::NextCategory => {
            app.query.category = cycle_category(app, 1);
            Effect::None
        }
        Action::PrevCategory => {
            app.query.category = cycle_category(app, -1);
            Effect::None
        }
        Action::SearchCommitted(term) => {
            app.query.search = term;
            Effect::None
        }
        Action::ToggleSort => {
            app.query.sort = app.query.sort.toggled();
            Effect::None
        }
        Action::ToggleFavorite(id) => {
            let now_favorite = app.favorites.toggle(id);
            let name = app
                .restaurant(id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| format!("#{id}"));
            app.status_message = if now_favorite {
                format!("{name} ist jetzt Favorit")
            } else {
                format!("{name} ist kein Favorit mehr")
            };
            Effect::SaveFavorites
        }
        Action::ToggleReviews(id) => {
            if app.reviews.remove(&id).is_some() {
                Effect::CancelReviews(id)
            } else {
                app.reviews.insert(id, ReviewPanel::Loading);
                Effect::SpawnReviews(id)
            }
        }
        Action::ReviewsLoaded { id, reviews } => {
            // Collapsed meanwhile: nothing to show.
            if let Some(panel) = app.reviews.get_mut(&id) {
                *panel = ReviewPanel::Loaded(reviews);
            }
            Effect::None
        }
        Action::ReviewsFailed { id, message } => {
            if let Some(panel) = app.reviews.get_mut(&id) {
                *panel = ReviewPanel::Failed(message);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn cycle_category(app: &App, step: isize) -> Category {
    let len = app.categories.len() as isize;
    if len == 0 {
        return Category::All;
    }
    let current = app
        .categories
        .iter()
        .position(|c| *c == app.query.category)
        .unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(len) as usize;
    app.categories[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::SortDirection;
    use crate::data::Stats;
    use crate::test_support::{seven_restaurants, test_app};
    use std::time::Duration;

    fn initial_data() -> InitialData {
        InitialData {
            restaurants: seven_restaurants(),
            stats: Stats {
                total_restaurants: 7,
                total_reviews: 12,
                average_rating: 4.5,
            },
        }
    }

    #[test]
    fn test_cold_start_shows_loading_then_ready() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::StartLoad), Effect::SpawnLoad);
        assert_eq!(app.load_status, LoadStatus::Loading);

        let effect = update(&mut app, Action::LoadSucceeded(initial_data()));
        assert_eq!(effect, Effect::SaveCache);
        assert_eq!(app.load_status, LoadStatus::Ready);
        assert_eq!(app.restaurants.len(), 7);
        assert!(app.stats.is_some());
    }

    #[test]
    fn test_start_load_while_in_flight_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::StartLoad);
        assert_eq!(update(&mut app, Action::StartLoad), Effect::None);
    }

    #[test]
    fn test_cached_start_revalidates_without_loading_state() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CacheRestored {
                restaurants: seven_restaurants(),
                saved_at: None,
            },
        );
        assert_eq!(update(&mut app, Action::StartLoad), Effect::SpawnLoad);
        assert_eq!(app.load_status, LoadStatus::Revalidating);
        assert_eq!(app.visible().len(), 7);
    }

    #[test]
    fn test_background_failure_keeps_stale_view() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CacheRestored {
                restaurants: seven_restaurants(),
                saved_at: None,
            },
        );
        update(&mut app, Action::StartLoad);
        let effect = update(
            &mut app,
            Action::LoadFailed(LoadError::Timeout(Duration::from_millis(5000))),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.load_status, LoadStatus::Ready);
        assert!(app.showing_cache);
        assert_eq!(app.restaurants.len(), 7);
    }

    #[test]
    fn test_background_success_replaces_cache_view() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CacheRestored {
                restaurants: seven_restaurants()[..3].to_vec(),
                saved_at: None,
            },
        );
        update(&mut app, Action::StartLoad);
        assert_eq!(
            update(&mut app, Action::LoadSucceeded(initial_data())),
            Effect::SaveCache
        );
        assert!(!app.showing_cache);
        assert_eq!(app.restaurants.len(), 7);
    }

    #[test]
    fn test_cold_failure_is_surfaced() {
        let mut app = test_app();
        update(&mut app, Action::StartLoad);
        update(&mut app, Action::LoadFailed(LoadError::Cancelled));
        assert_eq!(app.load_status, LoadStatus::Failed(LoadError::Cancelled));
        assert_eq!(app.status_message, "cancelled by user");
    }

    #[test]
    fn test_retry_bypasses_cache() {
        let mut app = test_app();
        app.showing_cache = true;
        app.load_status = LoadStatus::Failed(LoadError::Network("down".to_string()));
        assert_eq!(update(&mut app, Action::Retry), Effect::SpawnLoad);
        assert_eq!(app.load_status, LoadStatus::Loading);
        assert!(!app.showing_cache);
    }

    #[test]
    fn test_cancel_only_when_in_flight() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::CancelLoad), Effect::None);
        update(&mut app, Action::StartLoad);
        assert_eq!(update(&mut app, Action::CancelLoad), Effect::AbortLoad);
    }

    #[test]
    fn test_category_cycle_wraps() {
        let mut app = test_app();
        update(&mut app, Action::LoadSucceeded(initial_data()));
        update(&mut app, Action::PrevCategory);
        assert_eq!(app.query.category, *app.categories.last().unwrap());
        update(&mut app, Action::NextCategory);
        assert_eq!(app.query.category, Category::All);
        update(&mut app, Action::NextCategory);
        assert_eq!(app.query.category.label(), "Italienisch");
    }

    #[test]
    fn test_search_and_sort_drive_visible_list() {
        let mut app = test_app();
        update(&mut app, Action::LoadSucceeded(initial_data()));
        update(&mut app, Action::SearchCommitted("trat".to_string()));
        assert_eq!(app.visible().len(), 1);
        update(&mut app, Action::ToggleSort);
        assert_eq!(app.query.sort, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_favorite_requests_save() {
        let mut app = test_app();
        update(&mut app, Action::LoadSucceeded(initial_data()));
        assert_eq!(update(&mut app, Action::ToggleFavorite(1)), Effect::SaveFavorites);
        assert!(app.favorites.contains(1));
        assert_eq!(app.status_message, "Trattoria Roma ist jetzt Favorit");
        update(&mut app, Action::ToggleFavorite(1));
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_review_expand_collapse_cycle() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ToggleReviews(3)), Effect::SpawnReviews(3));
        assert_eq!(app.reviews.get(&3), Some(&ReviewPanel::Loading));
        assert_eq!(update(&mut app, Action::ToggleReviews(3)), Effect::CancelReviews(3));
        assert!(!app.is_expanded(3));
    }

    #[test]
    fn test_reviews_for_collapsed_card_are_dropped() {
        let mut app = test_app();
        update(
            &mut app,
            Action::ReviewsLoaded {
                id: 3,
                reviews: vec![],
            },
        );
        assert!(!app.is_expanded(3));
    }

    #[test]
    fn test_review_failure_is_inline() {
        let mut app = test_app();
        update(&mut app, Action::ToggleReviews(2));
        update(
            &mut app,
            Action::ReviewsFailed {
                id: 2,
                message: "boom".to_string(),
            },
        );
        assert_eq!(app.reviews.get(&2), Some(&ReviewPanel::Failed("boom".to_string())));
        assert_eq!(app.load_status, LoadStatus::Idle);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
