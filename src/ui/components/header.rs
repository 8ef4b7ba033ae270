//! Header component
//!
//! Renders the title and the session line (API, roles, route)

use crate::navigation::Route;
use crate::roles::RoleSet;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_header(f: &mut Frame, area: Rect, api_url: &str, roles: &RoleSet, route: &Route) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("TRE CONSOLE v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let role_color = if roles.is_admin() {
        Color::LightYellow
    } else {
        Color::LightBlue
    };
    let session_line = Line::from(vec![
        Span::styled("API ", Style::default().fg(Color::DarkGray)),
        Span::styled(api_url.to_string(), Style::default().fg(Color::White)),
        Span::styled("  Roles ", Style::default().fg(Color::DarkGray)),
        Span::styled(roles.to_string(), Style::default().fg(role_color)),
        Span::styled("  Route ", Style::default().fg(Color::DarkGray)),
        Span::styled(route.to_string(), Style::default().fg(Color::LightGreen)),
    ]);
    f.render_widget(
        Paragraph::new(session_line).alignment(Alignment::Center),
        header_chunks[1],
    );
}
