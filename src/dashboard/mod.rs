//! Dashboard data: models, loading state machine and view lifetime

pub mod loader;
pub mod models;
pub mod state;
pub mod view;

pub use loader::{DashboardLoader, LoaderFactory, LoaderOptions};
pub use state::{CostsContext, CostsState, DashboardData, LoadingState};
pub use view::DashboardView;
