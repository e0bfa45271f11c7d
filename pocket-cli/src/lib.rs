pub mod app;
pub mod checklist;
pub mod config;
pub mod display;
pub mod logging;
pub mod script;

pub use app::DisplayOptions;
pub use config::Config;
