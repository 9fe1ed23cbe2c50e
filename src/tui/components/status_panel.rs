//! Loading and error states for the primary load, shown in place of the list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum StatusPanel {
    Loading { spinner_frame: usize },
    Failed { message: String },
}

impl StatusPanel {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let hint = Style::default().fg(Color::DarkGray);
        match self {
            StatusPanel::Loading { spinner_frame } => vec![
                Line::from(vec![
                    Span::styled(
                        SPINNER[spinner_frame % SPINNER.len()],
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(" Restaurants werden geladen..."),
                ]),
                Line::from(""),
                Line::from(Span::styled("Esc  Laden abbrechen", hint)),
            ],
            StatusPanel::Failed { message } => vec![
                Line::from(Span::styled(
                    "Fehler beim Laden der Restaurants.",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(message.clone()),
                Line::from(""),
                Line::from(Span::styled("Ctrl+R  Erneut versuchen", hint)),
            ],
        }
    }
}

impl Component for StatusPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let height = lines.len() as u16 + 2;
        let [panel] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let border = match self {
            StatusPanel::Loading { .. } => Color::Cyan,
            StatusPanel::Failed { .. } => Color::Red,
        };
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::default().fg(border)));
        frame.render_widget(paragraph, panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_offers_cancel() {
        let panel = StatusPanel::Loading { spinner_frame: 13 };
        let rendered = text(&panel.lines());
        assert!(rendered.contains("Laden abbrechen"));
        assert!(rendered.starts_with(SPINNER[3]));
    }

    #[test]
    fn test_failed_shows_message_and_retry() {
        let panel = StatusPanel::Failed {
            message: "request timed out after 5000 ms".to_string(),
        };
        let rendered = text(&panel.lines());
        assert!(rendered.contains("request timed out after 5000 ms"));
        assert!(rendered.contains("Erneut versuchen"));
    }
}
