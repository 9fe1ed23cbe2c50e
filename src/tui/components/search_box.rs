//! # SearchBox Component
//!
//! Single-line search input. The buffer updates on every key so typing feels
//! immediate; the committed search term only changes after the debounce
//! quiet period (see `core::debounce`), which the event loop handles.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SearchBoxState` lives in `TuiState`
//! - `SearchBox` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::filter::SortDirection;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Buffer content after the edit.
    Changed(String),
}

#[derive(Debug, Default)]
pub struct SearchBoxState {
    pub buffer: String,
}

impl SearchBoxState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for SearchBoxState {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces.
                let cleaned: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                if cleaned.is_empty() {
                    return None;
                }
                self.buffer.push_str(&cleaned);
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
            }
            TuiEvent::ClearSearch => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
            }
            _ => return None,
        }
        Some(SearchEvent::Changed(self.buffer.clone()))
    }
}

pub struct SearchBox<'a> {
    pub state: &'a SearchBoxState,
    pub sort: SortDirection,
    pub result_count: usize,
}

impl Component for SearchBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;
        // Leave one cell for the cursor.
        let visible = tail_fitting(&self.state.buffer, inner_width.saturating_sub(1));

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Suche ")
            .title_top(
                Line::from(format!(
                    " Treffer: {} · Bewertung {} ",
                    self.result_count,
                    self.sort.arrow()
                ))
                .right_aligned(),
            );

        let text_width: usize = visible.chars().filter_map(|c| c.width()).sum();
        frame.render_widget(Paragraph::new(visible).block(block), area);

        if area.width > 2 && area.height > 2 {
            frame.set_cursor_position((area.x + 1 + text_width as u16, area.y + 1));
        }
    }
}

/// The longest suffix of `s` that fits in `max_width` terminal cells.
fn tail_fitting(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &s[start..]
}
