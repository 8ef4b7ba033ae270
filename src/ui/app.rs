//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, ui::TICK_RATE_MS};
use crate::dashboard::{DashboardView, LoaderFactory};
use crate::events::Event as ConsoleEvent;
use crate::navigation::{NavEntry, Route, Router, build_nav_links, on_link_click};
use crate::roles::RoleSet;
use crate::ui::components::{
    footer::render_footer, header::render_header, left_nav::render_left_nav,
    logs::render_logs_panel, pages::render_page,
};
use crate::ui::dashboard::render_dashboard;
use crossterm::event::{self, Event, KeyCode};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal, backend::Backend};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub api_url: String,
}

impl UIConfig {
    pub fn new(with_background_color: bool, api_url: impl Into<String>) -> Self {
        Self {
            with_background_color,
            api_url: api_url.into(),
        }
    }
}

/// Application state
pub struct App {
    /// Roles of the signed-in user; they decide which links are shown.
    roles: RoleSet,

    /// Navigation entries built from `roles`.
    nav_links: Vec<NavEntry>,

    /// Index of the highlighted navigation entry.
    selected: usize,

    router: Router,

    /// Builds a fresh loader each time the dashboard is mounted.
    loader_factory: LoaderFactory,

    /// The mounted dashboard, present only while the dashboard route is active.
    dashboard: Option<DashboardView>,

    /// Receives events from the dashboard loaders.
    event_receiver: mpsc::Receiver<ConsoleEvent>,

    activity_logs: VecDeque<ConsoleEvent>,

    /// Animation tick for loading placeholders.
    tick: usize,

    ui_config: UIConfig,
}

impl App {
    /// Creates the application and mounts the initial route.
    /// Must be called from within a tokio runtime.
    pub fn new(
        roles: RoleSet,
        initial_route: Route,
        loader_factory: LoaderFactory,
        event_receiver: mpsc::Receiver<ConsoleEvent>,
        ui_config: UIConfig,
    ) -> Self {
        let nav_links = build_nav_links(&roles);
        let selected = nav_links
            .iter()
            .position(|entry| Route::from_path(entry.url) == initial_route)
            .unwrap_or(0);
        let mut app = Self {
            roles,
            nav_links,
            selected,
            router: Router::new(initial_route),
            loader_factory,
            dashboard: None,
            event_receiver,
            activity_logs: VecDeque::with_capacity(MAX_ACTIVITY_LOGS),
            tick: 0,
            ui_config,
        };
        app.sync_view();
        app
    }

    pub fn current_route(&self) -> &Route {
        self.router.current()
    }

    pub fn dashboard(&self) -> Option<&DashboardView> {
        self.dashboard.as_ref()
    }

    /// Handles a key press. Returns `true` when the application should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            _ => {}
        }
        false
    }

    fn select_previous(&mut self) {
        if self.nav_links.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.nav_links.len() - 1);
    }

    fn select_next(&mut self) {
        if self.nav_links.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.nav_links.len();
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.nav_links.get(self.selected).cloned() else {
            return;
        };
        if Route::from_path(entry.url) == *self.router.current() {
            return;
        }
        on_link_click(&entry, &mut self.router);
        self.loader_factory
            .events()
            .try_send_navigation_event(format!("Opened {}", self.router.current()));
        self.sync_view();
    }

    /// Remounts the dashboard so both fetches start over.
    fn reload(&mut self) {
        if self.dashboard.take().is_some() {
            self.loader_factory
                .events()
                .try_send_navigation_event("Reloading dashboard".to_string());
            self.sync_view();
        }
    }

    /// Mounts the dashboard when its route becomes active and unmounts it
    /// when the route is left.
    fn sync_view(&mut self) {
        let on_dashboard = *self.router.current() == Route::Dashboard;
        match (on_dashboard, self.dashboard.is_some()) {
            (true, false) => {
                self.dashboard = Some(DashboardView::mount(
                    &self.loader_factory,
                    self.roles.clone(),
                ));
            }
            (false, true) => {
                if let Some(mut view) = self.dashboard.take() {
                    view.unmount();
                }
            }
            _ => {}
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
                self.activity_logs.pop_front();
            }
            self.activity_logs.push_back(event);
        }
    }

    /// Unmounts whatever is on screen before the UI exits.
    pub fn shutdown(&mut self) {
        if let Some(mut view) = self.dashboard.take() {
            view.unmount();
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the current route.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        app.drain_events();
        app.tick = app.tick.wrapping_add(1);
        terminal.draw(|f| render(f, &app))?;

        // Poll for key events
        if event::poll(Duration::from_millis(TICK_RATE_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key.code) {
                    app.shutdown();
                    return Ok(());
                }
            }
        }
    }
}

fn render(f: &mut Frame, app: &App) {
    if app.ui_config.with_background_color {
        let background_block = Block::default().style(Style::default().bg(Color::Rgb(18, 18, 24)));
        f.render_widget(background_block, f.area());
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and session line
            Constraint::Min(0),    // Body
            Constraint::Length(2), // Footer
        ])
        .split(f.area());

    render_header(
        f,
        chunks[0],
        &app.ui_config.api_url,
        &app.roles,
        app.router.current(),
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(body[1]);

    render_left_nav(
        f,
        body[0],
        &app.nav_links,
        app.selected,
        app.router.current(),
    );

    match &app.dashboard {
        Some(view) => render_dashboard(f, main[0], view, app.tick),
        None => render_page(f, main[0], app.router.current(), app.roles.is_admin()),
    }

    render_logs_panel(f, main[1], &app.activity_logs);
    render_footer(f, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiEndpoint, MockApiCall};
    use crate::dashboard::test_support::{costs_body, factory_with, workspaces_body};
    use crate::dashboard::{CostsContext, LoadingState};
    use crate::events::Source;

    fn healthy_api() -> MockApiCall {
        let mut api = MockApiCall::new();
        api.expect_call().returning(|request| match request.endpoint {
            ApiEndpoint::Workspaces => Ok(workspaces_body(&["ws-1"])),
            ApiEndpoint::Costs => Ok(costs_body()),
        });
        api
    }

    fn admin_app(costs: CostsContext) -> App {
        let (factory, receiver) = factory_with(healthy_api(), costs);
        App::new(
            RoleSet::new(["TREAdmin"]),
            Route::Workspaces,
            factory,
            receiver,
            UIConfig::new(false, "http://localhost:8000"),
        )
    }

    #[tokio::test]
    async fn test_opening_dashboard_mounts_and_leaving_unmounts() {
        let costs = CostsContext::new();
        let mut app = admin_app(costs.clone());
        assert!(app.dashboard().is_none());

        // Workspaces, Shared Services, Dashboard
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert_eq!(*app.current_route(), Route::Dashboard);
        assert!(app.dashboard().is_some());

        if let Some(view) = app.dashboard.as_mut() {
            view.wait().await;
        }
        assert_eq!(costs.loading_state(), LoadingState::Ok);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert_eq!(*app.current_route(), Route::Workspaces);
        assert!(app.dashboard().is_none());
        assert!(costs.snapshot().costs.is_empty());
    }

    #[tokio::test]
    async fn test_initial_dashboard_route_mounts_immediately() {
        let (factory, receiver) = factory_with(healthy_api(), CostsContext::new());
        let app = App::new(
            RoleSet::new(["TREAdmin"]),
            Route::Dashboard,
            factory,
            receiver,
            UIConfig::new(false, "http://localhost:8000"),
        );
        assert!(app.dashboard().is_some());
        assert_eq!(app.selected, 2);
    }

    #[tokio::test]
    async fn test_selection_wraps_around() {
        let mut app = admin_app(CostsContext::new());
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected, 2);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_navigation_is_logged() {
        let mut app = admin_app(CostsContext::new());
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        app.drain_events();
        let last = app.activity_logs.back().map(|e| (e.source, e.msg.clone()));
        assert_eq!(
            last,
            Some((Source::Navigation, "Opened /shared-services".to_string()))
        );
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = admin_app(CostsContext::new());
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }
}
