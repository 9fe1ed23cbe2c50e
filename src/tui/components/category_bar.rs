//! Category tabs. `Alle` first, then each cuisine. Tab / Shift+Tab cycle.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Tabs;

use crate::core::filter::Category;
use crate::tui::component::Component;

pub struct CategoryBar<'a> {
    pub categories: &'a [Category],
    pub active: &'a Category,
}

impl CategoryBar<'_> {
    pub fn active_index(&self) -> usize {
        self.categories
            .iter()
            .position(|c| c == self.active)
            .unwrap_or(0)
    }
}

impl Component for CategoryBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .categories
            .iter()
            .map(|c| Line::from(c.label().to_string()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active_index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }
}
