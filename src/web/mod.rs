pub mod analysis;
pub mod chatbot;
pub mod insights;
pub mod profiles;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    let api = Router::new()
        .merge(insights::router(state.clone()))
        .merge(chatbot::router(state.clone()))
        .merge(analysis::router(state.clone()))
        .nest("/profiles", profiles::router(state));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}
