pub mod app;
pub mod calculator;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod examples;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod ui;

pub use app::router;
pub use calculator::{Calculator, SubmitOutcome};
pub use client::ApiClient;
pub use config::Config;
pub use dashboard::Dashboard;
pub use examples::ExamplePicker;
pub use state::AppState;
