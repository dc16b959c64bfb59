//! WebSocket Module - Gestione WebSocket per comunicazione real-time
//!
//! Questo modulo gestisce le connessioni WebSocket del relay:
//! - Upgrade HTTP -> WebSocket (nessuna autenticazione: le connessioni
//!   sono anonime, identificate solo da un id progressivo per i log)
//! - Gestione connessioni (split sender/receiver)
//! - Handler per gli eventi del client (joinRoom, sendMessage)
//! - Mappa dei canali broadcast per room

pub mod connection;
pub mod event_handlers;
pub mod roommap;

// Re-exports pubblici
pub use connection::handle_socket;

use crate::AppState;
use axum::{
    extract::{State, ws::WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Capacità del canale broadcast di ciascuna room
pub const BROADCAST_CHANNEL_CAPACITY: usize = 128;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Entry point per gestire richieste di upgrade WebSocket
/// Operazioni:
/// 1. Assegnare un id progressivo alla connessione (solo per i log)
/// 2. Eseguire upgrade HTTP -> WebSocket
/// 3. Passare la connessione ad handle_socket
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    let connection_id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);

    // Gestisce automaticamente l'upgrade a WebSocket.
    // Se l'upgrade fallisce, ritorna un errore; altrimenti restituisce la
    // nuova connessione al client.
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}
