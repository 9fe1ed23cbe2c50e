use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{App, LoadStatus};
use crate::data::Restaurant;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CacheBadge, CategoryBar, RestaurantList, SearchBox, StatusPanel, TitleBar,
};

const HELP: &str =
    "Tab Kategorie · ↑↓ Auswahl · Enter Bewertungen · ^F Favorit · ^S Sortierung · ^R Neu laden · ^Q Beenden";

/// Draw one frame. `visible` is the filtered/sorted list the caller already
/// synced the list selection with.
pub fn draw_ui(frame: &mut Frame, app: &App, visible: &[Restaurant], tui: &mut TuiState) {
    let [title_area, category_area, search_area, main_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    TitleBar {
        source_name: app.source_name.clone(),
        stats_summary: app.stats.as_ref().map(|s| s.summary()),
        favorite_count: app.favorites.len(),
        status_message: app.status_message.clone(),
        cache: CacheBadge::new(app.showing_cache, app.cached_at),
    }
    .render(frame, title_area);

    CategoryBar {
        categories: &app.categories,
        active: &app.query.category,
    }
    .render(frame, category_area);

    SearchBox {
        state: &tui.search_box,
        sort: app.query.sort,
        result_count: visible.len(),
    }
    .render(frame, search_area);

    match &app.load_status {
        LoadStatus::Loading => StatusPanel::Loading {
            spinner_frame: tui.spinner_frame,
        }
        .render(frame, main_area),
        LoadStatus::Failed(error) => StatusPanel::Failed {
            message: error.to_string(),
        }
        .render(frame, main_area),
        _ => RestaurantList {
            state: &mut tui.list,
            restaurants: visible,
            favorites: &app.favorites,
            reviews: &app.reviews,
        }
        .render(frame, main_area),
    }

    frame.render_widget(
        Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
        help_area,
    );
}
