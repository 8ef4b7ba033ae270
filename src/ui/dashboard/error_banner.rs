//! Error banner shown above the table when a fetch failed

use crate::api::error::ReportedError;
use crate::ui::utils::clean_http_error_message;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Lines describing an error: the user-facing message, then the details.
pub fn error_lines(error: &ReportedError) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        error.to_string(),
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    ))];
    if error.user_message().is_some() {
        lines.push(Line::from(Span::styled(
            clean_http_error_message(&error.error().to_string()),
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}

pub fn render_error_banner(f: &mut Frame, area: Rect, errors: &[&ReportedError]) {
    let lines: Vec<Line> = errors.iter().flat_map(|e| error_lines(e)).collect();
    let banner = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("ERROR")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(banner, area);
}
