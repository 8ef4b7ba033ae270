//! Dashboard page: workspace table with costs and error banner

pub mod error_banner;
pub mod renderer;
pub mod rows;
pub mod table;

pub use renderer::render_dashboard;
