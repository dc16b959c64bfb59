//! Errori interni del relay
//!
//! Nessun errore viene rimandato al client sul WebSocket: ogni fallimento
//! viene loggato nel punto in cui avviene e interrompe al massimo la
//! gestione del singolo messaggio.

use std::fmt;

#[derive(Debug)]
pub enum RelayError {
    /// Il roomId non è composto da esattamente tre segmenti `_`-separati
    MalformedRoomId(String),
    /// Errore dello store (insert messaggio, upsert riepilogo)
    Store(sqlx::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::MalformedRoomId(room_id) => {
                write!(f, "malformed room id: {:?}", room_id)
            }
            RelayError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RelayError {
    fn from(err: sqlx::Error) -> Self {
        RelayError::Store(err)
    }
}
