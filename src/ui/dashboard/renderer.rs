//! Dashboard page renderer

use super::error_banner::render_error_banner;
use super::table::render_workspace_table;
use crate::dashboard::{DashboardView, LoadingState};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render_dashboard(f: &mut Frame, area: Rect, view: &DashboardView, tick: usize) {
    let data = view.data();
    let costs = view.costs();
    let show_costs = view.roles().is_admin();

    let mut errors = Vec::new();
    if data.loading_state == LoadingState::Error {
        errors.extend(data.api_error.as_ref());
    }
    if show_costs && data.cost_loading_state == LoadingState::Error {
        errors.extend(data.cost_api_error.as_ref());
    }

    let banner_height = if errors.is_empty() {
        0
    } else {
        // Two lines per error plus borders
        (errors.len() * 2 + 2) as u16
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(banner_height),
            Constraint::Fill(1),
        ])
        .split(area);

    let title = Paragraph::new("Dashboard")
        .alignment(Alignment::Left)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    if !errors.is_empty() {
        render_error_banner(f, chunks[1], &errors);
    }

    render_workspace_table(f, chunks[2], &data, &costs, show_costs, tick);
}
