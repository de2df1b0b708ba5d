use crate::middleware::rate_limit::rate_limit_middleware;
use crate::services::assistant::ChatTurn;
use crate::state::SharedState;
use axum::{
    extract::State, http::StatusCode, middleware::from_fn_with_state, routing::post, Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/chatbot", post(chat))
        .route_layer(from_fn_with_state(
            state.chat_limiter.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn chat(
    State(state): State<SharedState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let message = req
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(StatusCode::BAD_REQUEST)?;

    let reply = state.chat.reply(message, &req.history).await;
    Ok(Json(ChatResponse { reply }))
}
