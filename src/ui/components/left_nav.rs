//! Left navigation component

use crate::navigation::{NavEntry, Route};
use crate::ui::utils::icon_glyph;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState};

pub fn render_left_nav(
    f: &mut Frame,
    area: Rect,
    entries: &[NavEntry],
    selected: usize,
    current: &Route,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let is_current = Route::from_path(entry.url) == *current;
            let style = if is_current {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon_glyph(entry.icon))),
                Span::styled(entry.name, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("NAVIGATION")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
