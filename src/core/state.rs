//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository e lo stato condiviso necessario
//! per gestire l'applicazione.

use crate::repositories::{
    ChatRoomRepository, MessageRepository, ProductRepository, UserRepository,
};
use crate::ws::roommap::RoomMap;
use sqlx::MySqlPool;

/// Stato globale dell'applicazione condiviso tra tutte le route e i task WebSocket
pub struct AppState {
    /// Repository per i messaggi persistiti
    pub messages: MessageRepository,

    /// Repository per i riepiloghi delle chat room
    pub chat_rooms: ChatRoomRepository,

    /// Repository read-only per i prodotti (collezione di un altro sistema)
    pub products: ProductRepository,

    /// Repository read-only per gli utenti (collezione di un altro sistema)
    pub users: UserRepository,

    /// Canali broadcast delle room con almeno una connessione iscritta
    pub rooms_online: RoomMap,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            messages: MessageRepository::new(pool.clone()),
            chat_rooms: ChatRoomRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            rooms_online: RoomMap::new(),
        }
    }
}
