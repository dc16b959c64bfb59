//! Services module - Handler HTTP
//!
//! La superficie HTTP del relay è minima: il traffico vero passa dal
//! WebSocket, qui resta solo l'endpoint di liveness.

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check con payload fisso di conferma
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Relay server is running!")
}
