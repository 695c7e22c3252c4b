pub mod app;
pub mod charts;
pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod pdf;
pub mod render;
pub mod report;
pub mod sample;
pub mod spreadsheet;
pub mod state;
pub mod storage;
pub mod ui;
pub mod webhook;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use storage::load_data;
