//! Relay library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod ws;

// Re-export dei tipi principali per facilitare l'import
// (path qualificato: `core` da solo sarebbe ambiguo con la crate builtin)
pub use crate::core::{AppState, Config, RelayError};
pub use crate::services::root;

use axum::{
    Router,
    routing::{any, get},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use ws::ws_handler;

    Router::new()
        .route("/", get(root))
        .route("/ws", any(ws_handler))
        .with_state(state)
}
