//! Workspace table component
//!
//! Renders one row per workspace, or shimmering placeholders while loading

use super::rows::{WorkspaceRow, workspace_rows};
use crate::consts::cli_consts::ui::SHIMMER_ROWS;
use crate::dashboard::{CostsState, DashboardData, LoadingState};
use crate::ui::utils::{icon_glyph, shimmer_text};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

pub fn render_workspace_table(
    f: &mut Frame,
    area: Rect,
    data: &DashboardData,
    costs: &CostsState,
    show_costs: bool,
    tick: usize,
) {
    let header = Row::new(vec!["", "Workspace", "Id", "Cost"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if data.loading_state == LoadingState::Loading {
        (0..SHIMMER_ROWS)
            .map(|i| {
                let bar = shimmer_text(tick + i, 16);
                Row::new(vec![
                    Cell::from(""),
                    Cell::from(bar.clone()),
                    Cell::from(bar.clone()),
                    Cell::from(bar),
                ])
                .style(Style::default().fg(Color::DarkGray))
            })
            .collect()
    } else {
        workspace_rows(data, costs, show_costs)
            .into_iter()
            .map(|row| render_row(row, tick))
            .collect()
    };

    let title = match data.loading_state {
        LoadingState::Ok => format!("WORKSPACES ({})", data.workspaces.len()),
        _ => "WORKSPACES".to_string(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(table, area);
}

fn render_row(row: WorkspaceRow, tick: usize) -> Row<'static> {
    let cost = if row.cost == "…" {
        Cell::from(shimmer_text(tick, 8)).style(Style::default().fg(Color::DarkGray))
    } else {
        Cell::from(row.cost).style(Style::default().fg(Color::LightGreen))
    };
    Row::new(vec![
        Cell::from(icon_glyph("ConnectVirtualMachine")),
        Cell::from(row.name),
        Cell::from(row.id).style(Style::default().fg(Color::DarkGray)),
        cost,
    ])
}
