use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::server::handlers::{api_calc, api_simple_loan, show_form, submit_form};
use crate::server::health::health;
use crate::server::request_log::request_logging;
use crate::server::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/calc", post(api_calc))
        .route("/api/simple_loan", post(api_simple_loan))
        .route("/health", get(health))
        .layer(middleware::from_fn(request_logging))
        .with_state(state)
}
