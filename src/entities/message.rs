//! Message entity - Entità messaggio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Un messaggio persistito. Immutabile una volta salvato: non esistono
/// percorsi di update o delete.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Message {
    /// Identità assegnata dallo store in fase di insert
    pub message_id: i64,
    /// `<productId>_<sellerId>_<buyerId>`
    pub room_id: String,
    pub sender_id: String,
    /// Id di correlazione lato client, opzionale
    pub local_id: Option<String>,
    pub text: String,
    // il server si aspetta una stringa litterale iso8601 che viene parsata
    // in oggetto DateTime di tipo UTC; la conversione la fa serde
    pub created_at: DateTime<Utc>,
}
