//! Left navigation and client-side routing
//!
//! The navigation menu is rebuilt from the viewer's roles on every render.
//! Selecting an entry never follows a link directly; it asks a [`Navigator`]
//! to change the current route.

use crate::roles::{RoleName, RoleSet};
use std::fmt::{Display, Formatter};

/// A single entry of the left navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub url: &'static str,
    pub key: &'static str,
    pub icon: &'static str,
}

const WORKSPACES: NavEntry = NavEntry {
    name: "Workspaces",
    url: "/",
    key: "/",
    icon: "WebAppBuilderFragment",
};

const SHARED_SERVICES: NavEntry = NavEntry {
    name: "Shared Services",
    url: "/shared-services",
    key: "shared-services",
    icon: "Puzzle",
};

const DASHBOARD: NavEntry = NavEntry {
    name: "Dashboard",
    url: "/dashboard",
    key: "dashboard",
    icon: "Info",
};

/// Builds the ordered navigation entries visible to the given roles.
pub fn build_nav_links(roles: &RoleSet) -> Vec<NavEntry> {
    let mut links = vec![WORKSPACES];

    if roles.contains(RoleName::TREAdmin) {
        links.push(SHARED_SERVICES);
        links.push(DASHBOARD);
    }

    links
}

/// Performs client-side route changes.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// Handles a click on a navigation entry by routing to its target path.
pub fn on_link_click(entry: &NavEntry, navigator: &mut dyn Navigator) {
    navigator.navigate(entry.url);
}

/// Pages the console can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Workspaces,
    SharedServices,
    Dashboard,
    NotFound(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match normalized {
            "/" => Route::Workspaces,
            "/shared-services" => Route::SharedServices,
            "/dashboard" => Route::Dashboard,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Workspaces => WORKSPACES.url,
            Route::SharedServices => SHARED_SERVICES.url,
            Route::Dashboard => DASHBOARD.url,
            Route::NotFound(path) => path,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Holds the current route.
#[derive(Debug, Default)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }
}

impl Navigator for Router {
    fn navigate(&mut self, path: &str) {
        self.current = Route::from_path(path);
    }
}
