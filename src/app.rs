use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calculate", post(handlers::calculate))
        .route("/examples/open", post(handlers::open_examples))
        .route("/examples/close", post(handlers::close_examples))
        .route("/examples/fill", post(handlers::fill_example))
        .route("/api/calculate", post(handlers::api_calculate))
        .route("/api/calculator", get(handlers::get_calculator))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/dashboard/refresh", post(handlers::refresh_dashboard))
        .with_state(state)
}
