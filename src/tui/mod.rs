//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and carries out the
//! `Effect`s that `update` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading panel, a review region loading): draws every
//!   ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 250ms, only redraws on events, background
//!   results or terminal resize.
//!
//! Background work (primary load, review loads, debounced search commits)
//! reports back through one `mpsc` channel of `Action`s, drained every tick.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio_util::sync::CancellationToken;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{ResolvedConfig, SourceKind};
use crate::core::debounce::Debouncer;
use crate::core::state::{App, LoadStatus, ReviewPanel};
use crate::data::{HttpSource, LocalSource, RestaurantSource, ReviewLoader, load_initial};
use crate::storage::{self, Store, cache::RestaurantCache};
use crate::tui::component::EventHandler;
use crate::tui::components::{ListEvent, RestaurantListState, SearchBoxState, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBoxState,
    pub list: RestaurantListState,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_box: SearchBoxState::new(),
            list: RestaurantListState::new(),
            spinner_frame: 0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar // blinking cursors stutter under continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, SetCursorStyle::DefaultUserShape);
    }
}

/// Build the data source selected by the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn RestaurantSource> {
    match config.source {
        SourceKind::Local => Arc::new(LocalSource::new()),
        SourceKind::Http => Arc::new(
            HttpSource::new(config.base_url.clone())
                .with_timeouts(config.load_timeout, config.review_timeout),
        ),
    }
}

/// Carries out effects. Owns everything that outlives a single action:
/// the store, the source, the review loader and the active load's token.
struct EffectRunner {
    store: Store,
    source: Arc<dyn RestaurantSource>,
    reviews: Arc<ReviewLoader>,
    tx: mpsc::Sender<Action>,
    active_load: Option<CancellationToken>,
    /// With caching disabled the restaurant list is never persisted.
    use_cache: bool,
}

impl EffectRunner {
    /// Returns `true` when the app should quit.
    fn run(&mut self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::SpawnLoad => {
                if let Some(previous) = self.active_load.take() {
                    previous.cancel();
                }
                self.active_load = Some(spawn_load(self.source.clone(), self.tx.clone()));
            }
            Effect::AbortLoad => {
                if let Some(token) = self.active_load.take() {
                    info!("Cancelling restaurant load");
                    token.cancel();
                }
            }
            Effect::SaveCache if !self.use_cache => {
                debug!("Caching disabled, not persisting {} restaurants", app.restaurants.len());
            }
            Effect::SaveCache => {
                if let Err(e) = RestaurantCache::new(&self.store).save(&app.restaurants) {
                    warn!("Failed to write restaurant cache: {}", e);
                }
            }
            Effect::SaveFavorites => {
                if let Err(e) = storage::favorites::save(&self.store, &app.favorites) {
                    warn!("Failed to save favorites: {}", e);
                }
            }
            Effect::SpawnReviews(id) => spawn_reviews(id, self.reviews.clone(), self.tx.clone()),
            Effect::CancelReviews(id) => {
                if self.reviews.cancel(id) {
                    debug!("Cancelled review load for restaurant {}", id);
                }
            }
        }
        false
    }

    fn shutdown(&mut self) {
        if let Some(token) = self.active_load.take() {
            token.cancel();
        }
        self.reviews.cancel_all();
    }
}

/// What the persisted cache contributes at startup.
///
/// With caching enabled, a readable cache becomes `CacheRestored` so the list
/// shows at once while the live load revalidates it. With caching disabled the
/// cache is cleared and the app starts cold.
fn startup_action(store: &Store, use_cache: bool) -> Option<Action> {
    let cache = RestaurantCache::new(store);
    if !use_cache {
        if let Err(e) = cache.clear() {
            warn!("Failed to clear restaurant cache: {}", e);
        }
        return None;
    }
    cache.load().map(|restaurants| Action::CacheRestored {
        restaurants,
        saved_at: cache.saved_at(),
    })
}

fn dispatch(app: &mut App, runner: &mut EffectRunner, action: Action) -> bool {
    let effect = update(app, action);
    runner.run(app, effect)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store = Store::open_or_memory(config.data_dir.clone());
    let source = build_source(&config);
    info!(
        "Starting with source '{}' (persistent storage: {})",
        source.name(),
        store.is_persistent()
    );

    let mut app = App::new(source.name(), storage::favorites::load(&store));
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner {
        reviews: Arc::new(ReviewLoader::new(source.clone())),
        store,
        source,
        tx: tx.clone(),
        active_load: None,
        use_cache: config.use_cache,
    };
    let mut search_debounce = Debouncer::new(config.search_debounce);

    if let Some(action) = startup_action(&runner.store, config.use_cache) {
        dispatch(&mut app, &mut runner, action);
    }
    dispatch(&mut app, &mut runner, Action::StartLoad);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.load_status == LoadStatus::Loading
            || app.reviews.values().any(|p| *p == ReviewPanel::Loading);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            let visible = app.visible();
            tui.list.sync(&visible);
            terminal.draw(|f| ui::draw_ui(f, &app, &visible, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => None,
                TuiEvent::ForceQuit => Some(Action::Quit),
                TuiEvent::Escape => Some(Action::CancelLoad),
                TuiEvent::Retry => Some(Action::Retry),
                TuiEvent::ToggleSort => Some(Action::ToggleSort),
                TuiEvent::NextCategory => {
                    tui.list.reset_selection();
                    Some(Action::NextCategory)
                }
                TuiEvent::PrevCategory => {
                    tui.list.reset_selection();
                    Some(Action::PrevCategory)
                }
                TuiEvent::InputChar(_)
                | TuiEvent::Paste(_)
                | TuiEvent::Backspace
                | TuiEvent::ClearSearch => {
                    if let Some(SearchEvent::Changed(term)) = tui.search_box.handle_event(&event) {
                        let tx = tx.clone();
                        search_debounce.call(move || {
                            if tx.send(Action::SearchCommitted(term)).is_err() {
                                warn!("Failed to send search term: receiver dropped");
                            }
                        });
                    }
                    None
                }
                _ => match tui.list.handle_event(&event) {
                    Some(ListEvent::ToggleReviews(id)) => Some(Action::ToggleReviews(id)),
                    Some(ListEvent::ToggleFavorite(id)) => Some(Action::ToggleFavorite(id)),
                    None => None,
                },
            };
            if let Some(action) = action
                && dispatch(&mut app, &mut runner, action)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::SearchCommitted(_)) {
                tui.list.reset_selection();
            }
            if dispatch(&mut app, &mut runner, action) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    search_debounce.cancel();
    runner.shutdown();
    ratatui::restore();
    info!("Shut down cleanly");
    Ok(())
}

/// Spawn the primary load. The returned token cancels it.
fn spawn_load(source: Arc<dyn RestaurantSource>, tx: mpsc::Sender<Action>) -> CancellationToken {
    info!("Spawning restaurant load from '{}'", source.name());
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        let started = Instant::now();
        let action = match load_initial(source.as_ref(), &cancel).await {
            Ok(data) => {
                info!(
                    "Loaded {} restaurants in {} ms",
                    data.restaurants.len(),
                    started.elapsed().as_millis()
                );
                Action::LoadSucceeded(data)
            }
            Err(e) => {
                info!("Restaurant load ended with error: {}", e);
                Action::LoadFailed(e)
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send load result: receiver dropped");
        }
    });
    token
}

fn spawn_reviews(id: u32, reviews: Arc<ReviewLoader>, tx: mpsc::Sender<Action>) {
    debug!("Spawning review load for restaurant {}", id);
    tokio::spawn(async move {
        let action = match reviews.load(id).await {
            Ok(Some(reviews)) => Action::ReviewsLoaded { id, reviews },
            Ok(None) => {
                debug!("Review load for restaurant {} was superseded", id);
                return;
            }
            Err(e) => {
                warn!("Review load for restaurant {} failed: {}", id, e);
                Action::ReviewsFailed {
                    id,
                    message: e.to_string(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send reviews for restaurant {}: receiver dropped", id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, LocalEatsConfig, resolve};
    use crate::core::favorites::Favorites;
    use crate::test_support::seven_restaurants;

    fn runner(source: Arc<dyn RestaurantSource>) -> (EffectRunner, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner {
            store: Store::in_memory(),
            reviews: Arc::new(ReviewLoader::new(source.clone())),
            source,
            tx,
            active_load: None,
            use_cache: true,
        };
        (runner, rx)
    }

    #[test]
    fn test_startup_restores_cached_list() {
        let store = Store::in_memory();
        RestaurantCache::new(&store).save(&seven_restaurants()).unwrap();

        match startup_action(&store, true) {
            Some(Action::CacheRestored {
                restaurants,
                saved_at,
            }) => {
                assert_eq!(restaurants, seven_restaurants());
                assert!(saved_at.is_some());
            }
            other => panic!("expected CacheRestored, got {:?}", other),
        }

        // Restored list shows without the loading panel; the live load revalidates.
        let mut app = crate::test_support::test_app();
        if let Some(restored) = startup_action(&store, true) {
            update(&mut app, restored);
        }
        assert_eq!(update(&mut app, Action::StartLoad), Effect::SpawnLoad);
        assert_eq!(app.load_status, LoadStatus::Revalidating);
        assert_eq!(app.restaurants.len(), 7);
    }

    #[test]
    fn test_startup_without_cache_starts_cold() {
        let store = Store::in_memory();
        assert!(startup_action(&store, true).is_none());

        let mut app = crate::test_support::test_app();
        update(&mut app, Action::StartLoad);
        assert_eq!(app.load_status, LoadStatus::Loading);
    }

    #[test]
    fn test_startup_with_caching_disabled_clears_cache() {
        let store = Store::in_memory();
        RestaurantCache::new(&store).save(&seven_restaurants()).unwrap();

        assert!(startup_action(&store, false).is_none());
        assert_eq!(store.get(storage::CACHE_KEY).unwrap(), None);
        assert_eq!(store.get(storage::CACHE_TIMESTAMP_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_cache_skipped_when_caching_disabled() {
        let (mut runner, _rx) = runner(Arc::new(LocalSource::new()));
        runner.use_cache = false;
        let mut app = crate::test_support::test_app();
        app.restaurants = seven_restaurants();

        runner.run(&app, Effect::SaveCache);
        assert!(!RestaurantCache::new(&runner.store).exists());

        runner.use_cache = true;
        runner.run(&app, Effect::SaveCache);
        assert!(RestaurantCache::new(&runner.store).exists());
    }

    async fn recv(rx: &mpsc::Receiver<Action>) -> Action {
        for _ in 0..200 {
            if let Ok(action) = rx.try_recv() {
                return action;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no action received");
    }

    #[test]
    fn test_build_source_follows_config() {
        let cli = CliOverrides {
            source: Some(SourceKind::Local),
            ..CliOverrides::default()
        };
        let mut config = resolve(&LocalEatsConfig::default(), &cli);
        assert_eq!(build_source(&config).name(), "local");
        config.source = SourceKind::Http;
        assert_eq!(build_source(&config).name(), "http");
    }

    #[tokio::test]
    async fn test_local_load_round_trip() {
        let source: Arc<dyn RestaurantSource> = Arc::new(LocalSource::new());
        let (mut runner, rx) = runner(source.clone());
        let mut app = App::new(source.name(), Favorites::new());

        assert!(!dispatch(&mut app, &mut runner, Action::StartLoad));
        assert!(runner.active_load.is_some());

        let action = recv(&rx).await;
        let effect = update(&mut app, action);
        assert_eq!(effect, Effect::SaveCache);
        runner.run(&app, effect);

        assert_eq!(app.load_status, LoadStatus::Ready);
        assert_eq!(app.restaurants.len(), 8);
        let cached = RestaurantCache::new(&runner.store).load();
        assert_eq!(cached.map(|c| c.len()), Some(8));
    }

    #[tokio::test]
    async fn test_abort_load_reports_cancelled() {
        let source: Arc<dyn RestaurantSource> = Arc::new(crate::test_support::SlowSource::new(
            Duration::from_secs(30),
            vec![],
        ));
        let (mut runner, rx) = runner(source);
        let mut app = crate::test_support::test_app();

        dispatch(&mut app, &mut runner, Action::StartLoad);
        dispatch(&mut app, &mut runner, Action::CancelLoad);
        assert!(runner.active_load.is_none());

        let action = recv(&rx).await;
        update(&mut app, action);
        assert!(matches!(
            app.load_status,
            LoadStatus::Failed(crate::data::LoadError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_favorites_effect_persists() {
        let (mut runner, _rx) = runner(Arc::new(LocalSource::new()));
        let mut app = crate::test_support::test_app();
        app.restaurants = seven_restaurants();

        dispatch(&mut app, &mut runner, Action::ToggleFavorite(3));
        let saved = storage::favorites::load(&runner.store);
        assert!(saved.contains(3));
    }

    #[tokio::test]
    async fn test_reviews_effect_delivers_loaded_action() {
        let source: Arc<dyn RestaurantSource> = Arc::new(LocalSource::new());
        let (mut runner, rx) = runner(source);
        let mut app = crate::test_support::test_app();

        dispatch(&mut app, &mut runner, Action::ToggleReviews(1));
        match recv(&rx).await {
            Action::ReviewsLoaded { id, reviews } => {
                assert_eq!(id, 1);
                assert!(reviews.iter().all(|r| r.restaurant_id == 1));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
