//! # Core Application Logic
//!
//! This module contains LocalEats' business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • filter (pipeline)    │
//!                    │                         │
//!                    │  No UI. No network.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`filter`]: Category filter, name search, rating sort
//! - [`favorites`]: The toggle-only favorite id set
//! - [`debounce`]: Quiet-period timer for search input
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod debounce;
pub mod favorites;
pub mod filter;
pub mod state;
