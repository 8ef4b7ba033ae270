// Module declarations
mod app;
mod components;
pub mod dashboard;
pub mod utils;
// Re-exports for external use
pub use app::{App, UIConfig, run};
