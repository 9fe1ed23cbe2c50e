//! # TitleBar Component
//!
//! Top line: app name, data source, stats, favorite count and the status
//! message.
//!
//! ```text
//! LocalEats [http] | 8 Restaurants · 24 Bewertungen · ⌀ 4.6★ | Favoriten: 2 | Zwischengespeicherte Daten
//! ```
//!
//! Stateless: everything comes in as props.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

/// Whether the list on screen came from the cache, and from when.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CacheBadge {
    /// Live data.
    #[default]
    None,
    /// Cached, capture time unreadable.
    Unknown,
    At(DateTime<Utc>),
}

impl CacheBadge {
    pub fn new(showing_cache: bool, saved_at: Option<DateTime<Utc>>) -> Self {
        match (showing_cache, saved_at) {
            (false, _) => CacheBadge::None,
            (true, None) => CacheBadge::Unknown,
            (true, Some(at)) => CacheBadge::At(at),
        }
    }
}

pub struct TitleBar {
    pub source_name: String,
    pub stats_summary: Option<String>,
    pub favorite_count: usize,
    pub status_message: String,
    pub cache: CacheBadge,
}

impl TitleBar {
    /// Segments after the app name, in display order.
    pub fn segments(&self) -> Vec<String> {
        let mut segments = Vec::new();
        if let Some(stats) = &self.stats_summary {
            segments.push(stats.clone());
        }
        segments.push(format!("Favoriten: {}", self.favorite_count));
        match self.cache {
            CacheBadge::At(at) => segments.push(format!(
                "Cache vom {}",
                at.with_timezone(&Local).format("%d.%m. %H:%M")
            )),
            CacheBadge::Unknown => segments.push("Cache".to_string()),
            CacheBadge::None => {}
        }
        if !self.status_message.is_empty() {
            segments.push(self.status_message.clone());
        }
        segments
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "LocalEats",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" [{}]", self.source_name),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        for segment in self.segments() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(segment));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
