//! WebSocket Connection Management - Gestione connessioni WebSocket
//!
//! Ogni connessione vive in due task: `listen_ws` consuma gli eventi del
//! client, `write_ws` inoltra al socket i broadcast delle room a cui la
//! connessione si è iscritta. I due task comunicano con un canale interno:
//! un join visto dal listener diventa una nuova sottoscrizione nel writer.
//! Non esiste un'operazione di leave: la membership finisce quando la
//! connessione termina e i task si spengono.

use crate::AppState;
use crate::dtos::{ClientEvent, ServerEvent};
use crate::ws::event_handlers::process_send_message;
use axum::extract::ws::Utf8Bytes;
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_stream::StreamMap;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{error, info, instrument, warn};

/// Segnali dal task di ascolto al task di scrittura
pub enum InternalSignal {
    /// La connessione ha chiesto di entrare in una room
    JoinRoom(String),
    Shutdown,
}

#[instrument(skip(ws, state))]
pub async fn handle_socket(ws: WebSocket, state: Arc<AppState>, connection_id: u64) {
    info!("WebSocket connection established");

    // Dividiamo il WebSocket in due metà: sender e receiver
    let (ws_tx, ws_rx) = ws.split();

    // Canale unbounded per la comunicazione interna tra i due task
    let (int_tx, int_rx) = unbounded_channel::<InternalSignal>();

    // task in ascolto del websocket
    tokio::spawn(listen_ws(connection_id, ws_rx, int_tx, state.clone()));

    // task in ascolto sull'insieme dei canali broadcast delle room
    tokio::spawn(write_ws(connection_id, ws_tx, int_rx, state));
}

#[instrument(skip(websocket_tx, internal_rx, state))]
pub async fn write_ws(
    connection_id: u64,
    mut websocket_tx: SplitSink<WebSocket, Message>,
    mut internal_rx: UnboundedReceiver<InternalSignal>,
    state: Arc<AppState>,
) {
    info!("Write task started");

    // Una connessione parte non iscritta a nulla: le room arrivano solo
    // dai joinRoom espliciti
    let mut stream_map: StreamMap<String, BroadcastStream<Arc<ServerEvent>>> = StreamMap::new();

    'external: loop {
        tokio::select! {
            Some((room_id, result)) = tokio_stream::StreamExt::next(&mut stream_map) => {
                match result {
                    Ok(event) => {
                        let json = match serde_json::to_string(&*event) {
                            Ok(json) => json,
                            Err(e) => {
                                error!("Failed to serialize event: {:?}", e);
                                continue;
                            }
                        };
                        if let Err(e) = websocket_tx.send(Message::Text(Utf8Bytes::from(json))).await {
                            warn!("Failed to send event, closing connection: {:?}", e);
                            break 'external;
                        }
                    }
                    Err(e) => {
                        // ricevitore in ritardo sul canale broadcast: il
                        // trasporto è best effort, si va avanti
                        warn!(%room_id, "Broadcast receiver lagged: {:?}", e);
                    }
                }
            }

            signal = internal_rx.recv() => {
                match signal {
                    Some(InternalSignal::JoinRoom(room_id)) => {
                        // join ripetuto sulla stessa room: già iscritti,
                        // risottoscrivere farebbe perdere messaggi in volo
                        if stream_map.contains_key(&room_id) {
                            info!(%room_id, "Already joined, ignoring");
                            continue;
                        }
                        info!(%room_id, "Adding room subscription");
                        let rx = state.rooms_online.subscribe(&room_id);
                        stream_map.insert(room_id, BroadcastStream::new(rx));
                    }
                    Some(InternalSignal::Shutdown) => {
                        info!("Shutdown signal received");
                        break 'external;
                    }
                    None => {
                        info!("Internal channel closed");
                        break 'external; // listener chiuso, stacca tutto
                    }
                }
            }
        }
    }

    info!("Write task terminated");
}

#[instrument(skip(websocket_rx, internal_tx, state))]
pub async fn listen_ws(
    connection_id: u64,
    mut websocket_rx: SplitStream<WebSocket>,
    internal_tx: UnboundedSender<InternalSignal>,
    state: Arc<AppState>,
) {
    info!("Listen task started");

    while let Some(msg_result) = StreamExt::next(&mut websocket_rx).await {
        let msg = match msg_result {
            Ok(m) => m,
            Err(e) => {
                warn!("WebSocket error: {:?}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(ClientEvent::JoinRoom(room_id)) => {
                    // nessuna validazione del formato del room id al join
                    info!(%room_id, "Join request received");
                    let _ = internal_tx.send(InternalSignal::JoinRoom(room_id));
                }
                Ok(ClientEvent::SendMessage(data)) => {
                    info!("Message received from client");
                    process_send_message(&state, data).await;
                }
                Err(_) => {
                    warn!("Failed to deserialize client event");
                }
            },
            Message::Close(_) => {
                info!("Close message received");
                break;
            }
            _ => {}
        }
    }

    // Cleanup
    info!("Cleaning up connection");
    let _ = internal_tx.send(InternalSignal::Shutdown);
    info!("Listen task terminated");
}
