//! # TUI Components
//!
//! ## Component Architecture
//!
//! Two patterns, same as everywhere else in the TUI:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from `App` data:
//! - `TitleBar`: source, stats, favorite count, status message
//! - `CategoryBar`: category tabs
//! - `StatusPanel`: loading spinner or load error with retry hint
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state in `TuiState`, wrapped by a transient renderer:
//! - `SearchBoxState` / `SearchBox`: search input
//! - `RestaurantListState` / `RestaurantList`: cards, selection, review regions
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs
//! ├── category_bar.rs
//! ├── search_box.rs
//! ├── restaurant_list.rs
//! └── status_panel.rs
//! ```

mod category_bar;
mod restaurant_list;
mod search_box;
mod status_panel;
mod title_bar;

pub use category_bar::CategoryBar;
pub use restaurant_list::{ListEvent, RestaurantList, RestaurantListState};
pub use search_box::{SearchBox, SearchBoxState, SearchEvent};
pub use status_panel::StatusPanel;
pub use title_bar::{CacheBadge, TitleBar};
