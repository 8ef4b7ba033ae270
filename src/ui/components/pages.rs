//! Pages other than the dashboard

use crate::navigation::Route;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn page_lines(route: &Route, is_admin: bool) -> (&'static str, Vec<Line<'static>>) {
    match route {
        Route::Workspaces => {
            let mut lines = vec![Line::from("Workspaces you have access to.")];
            if is_admin {
                lines.push(Line::from(
                    "Open the Dashboard for the workspace list with costs.",
                ));
            }
            ("WORKSPACES", lines)
        }
        Route::SharedServices => (
            "SHARED SERVICES",
            vec![Line::from("Services shared by every workspace of this TRE.")],
        ),
        Route::NotFound(path) => (
            "NOT FOUND",
            vec![Line::from(format!("No page at {}", path))],
        ),
        Route::Dashboard => ("DASHBOARD", Vec::new()),
    }
}

pub fn render_page(f: &mut Frame, area: Rect, route: &Route, is_admin: bool) {
    let (title, lines) = page_lines(route, is_admin);
    let page = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .padding(Padding::uniform(1)),
        );
    f.render_widget(page, area);
}
