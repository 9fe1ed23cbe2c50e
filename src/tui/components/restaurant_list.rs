//! # RestaurantList Component
//!
//! Scrollable list of restaurant cards. Each card is a header line
//! (favorite star, name, rating) and a badge line (cuisine, price). An
//! expanded card adds its review region underneath.
//!
//! ```text
//! ★ Trattoria Roma                          4.7
//!   Italienisch · €€
//!     Anna ★★★★★ Beste Pasta der Stadt.
//! ```
//!
//! `RestaurantListState` holds the selection by index into the visible list
//! and remembers the ids it was last synced with, so key handling can answer
//! "which restaurant is selected" without seeing the `App`.

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::core::favorites::Favorites;
use crate::core::state::ReviewPanel;
use crate::data::Restaurant;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    ToggleReviews(u32),
    ToggleFavorite(u32),
}

#[derive(Debug, Default)]
pub struct RestaurantListState {
    pub selected: usize,
    pub list_state: ListState,
    ids: Vec<u32>,
}

impl RestaurantListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the visible list. Keeps the selected restaurant selected if it is
    /// still visible, otherwise clamps the index.
    pub fn sync(&mut self, visible: &[Restaurant]) {
        let previous = self.selected_id();
        self.ids = visible.iter().map(|r| r.id).collect();
        if let Some(pos) = previous.and_then(|id| self.ids.iter().position(|&i| i == id)) {
            self.selected = pos;
        } else if self.ids.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.ids.len() - 1);
        }
        self.list_state
            .select(if self.ids.is_empty() { None } else { Some(self.selected) });
    }

    /// Forget the selection; the next `sync` starts at the top.
    pub fn reset_selection(&mut self) {
        self.ids.clear();
        self.selected = 0;
        *self.list_state.offset_mut() = 0;
        self.list_state.select(None);
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.ids.get(self.selected).copied()
    }

    fn move_by(&mut self, delta: isize) {
        if self.ids.is_empty() {
            return;
        }
        let last = self.ids.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(self.selected));
    }
}

impl EventHandler for RestaurantListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            TuiEvent::PageDown => self.move_by(PAGE_SIZE as isize),
            TuiEvent::Submit => return self.selected_id().map(ListEvent::ToggleReviews),
            TuiEvent::ToggleFavorite => return self.selected_id().map(ListEvent::ToggleFavorite),
            _ => {}
        }
        None
    }
}

pub struct RestaurantList<'a> {
    pub state: &'a mut RestaurantListState,
    pub restaurants: &'a [Restaurant],
    pub favorites: &'a Favorites,
    pub reviews: &'a HashMap<u32, ReviewPanel>,
}

impl Component for RestaurantList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));

        if self.restaurants.is_empty() {
            let empty = Paragraph::new("Keine Restaurants gefunden.")
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .restaurants
            .iter()
            .map(|r| {
                let lines = card_lines(
                    r,
                    self.favorites.contains(r.id),
                    self.reviews.get(&r.id),
                    width,
                );
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
            .highlight_symbol("▌");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Lines for one card. `width` is the usable row width, used to push the
/// rating to the right edge.
pub fn card_lines(
    restaurant: &Restaurant,
    is_favorite: bool,
    reviews: Option<&ReviewPanel>,
    width: usize,
) -> Vec<Line<'static>> {
    let star = if is_favorite {
        Span::styled("★ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("☆ ", Style::default().fg(Color::DarkGray))
    };
    let rating = format!("{:.1}", restaurant.rating);
    // star (2) + highlight symbol (1)
    let name_width = width.saturating_sub(3 + rating.len() + 1);
    let name = format!("{:<name_width$}", restaurant.name);

    let mut lines = vec![
        Line::from(vec![
            star,
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(rating, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(restaurant.cuisine.clone(), Style::default().fg(Color::Cyan)),
            Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                restaurant.price.symbol(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    if let Some(panel) = reviews {
        lines.extend(review_lines(panel));
    }
    lines
}

fn review_lines(panel: &ReviewPanel) -> Vec<Line<'static>> {
    let muted = Style::default().fg(Color::DarkGray);
    match panel {
        ReviewPanel::Loading => vec![Line::from(Span::styled("    Lade Bewertungen...", muted))],
        ReviewPanel::Loaded(reviews) if reviews.is_empty() => {
            vec![Line::from(Span::styled("    Keine Bewertungen verfügbar.", muted))]
        }
        ReviewPanel::Loaded(reviews) => reviews
            .iter()
            .map(|review| {
                Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        review.author.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(review.stars(), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::raw(review.text.clone()),
                ])
            })
            .collect(),
        ReviewPanel::Failed(message) => vec![
            Line::from(Span::styled(
                "    Fehler beim Laden der Bewertungen.",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(format!("    {message}"), muted)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Review;
    use crate::test_support::{restaurant, seven_restaurants};

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_navigation_clamps_at_edges() {
        let mut state = RestaurantListState::new();
        state.sync(&seven_restaurants());

        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);

        state.handle_event(&TuiEvent::PageDown);
        state.handle_event(&TuiEvent::PageDown);
        assert_eq!(state.selected, 6);
        assert_eq!(state.list_state.selected(), Some(6));
    }

    #[test]
    fn test_submit_and_favorite_use_selected_id() {
        let mut state = RestaurantListState::new();
        state.sync(&seven_restaurants());
        state.handle_event(&TuiEvent::CursorDown);

        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ListEvent::ToggleReviews(2))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::ToggleFavorite),
            Some(ListEvent::ToggleFavorite(2))
        );
    }

    #[test]
    fn test_empty_list_emits_nothing() {
        let mut state = RestaurantListState::new();
        state.sync(&[]);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_sync_follows_selected_restaurant() {
        let all = seven_restaurants();
        let mut state = RestaurantListState::new();
        state.sync(&all);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected_id(), Some(3));

        // Reordered: id 3 moves to the front.
        let mut reordered = all.clone();
        reordered.rotate_left(2);
        state.sync(&reordered);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_id(), Some(3));

        // Filtered away: index is clamped.
        for _ in 0..4 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected_id(), Some(7));
        state.sync(&all[..2]);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_reset_starts_at_top_after_sync() {
        let all = seven_restaurants();
        let mut state = RestaurantListState::new();
        state.sync(&all);
        state.handle_event(&TuiEvent::PageDown);
        state.reset_selection();
        assert_eq!(state.selected_id(), None);

        state.sync(&all);
        assert_eq!(state.selected_id(), Some(1));
    }

    #[test]
    fn test_card_shows_favorite_star_and_badges() {
        let r = restaurant(1, "Trattoria Roma", "Italienisch", 4.7);
        let lines = text(&card_lines(&r, true, None, 40));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("★ Trattoria Roma"));
        assert!(lines[0].ends_with("4.7"));
        assert!(lines[1].contains("Italienisch · "));

        let lines = text(&card_lines(&r, false, None, 40));
        assert!(lines[0].starts_with("☆ "));
    }

    #[test]
    fn test_review_region_states() {
        let r = restaurant(3, "Green Leaf", "Vegan", 4.6);

        let loading = text(&card_lines(&r, false, Some(&ReviewPanel::Loading), 40));
        assert_eq!(loading[2].trim(), "Lade Bewertungen...");

        let empty = text(&card_lines(&r, false, Some(&ReviewPanel::Loaded(vec![])), 40));
        assert_eq!(empty[2].trim(), "Keine Bewertungen verfügbar.");

        let review = Review {
            restaurant_id: 3,
            author: "Lena".to_string(),
            rating: 5,
            text: "Frisch und kreativ.".to_string(),
        };
        let loaded = text(&card_lines(
            &r,
            false,
            Some(&ReviewPanel::Loaded(vec![review])),
            40,
        ));
        assert_eq!(loaded[2].trim(), "Lena ★★★★★ Frisch und kreativ.");

        let failed = text(&card_lines(
            &r,
            false,
            Some(&ReviewPanel::Failed("HTTP error 500".to_string())),
            40,
        ));
        assert_eq!(failed[2].trim(), "Fehler beim Laden der Bewertungen.");
        assert_eq!(failed[3].trim(), "HTTP error 500");
    }
}
