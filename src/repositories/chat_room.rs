//! ChatRoomRepository - Repository per i riepiloghi delle chat room
//!
//! L'unica scrittura è l'upsert condizionale: un singolo statement che
//! crea il riepilogo se assente oppure aggiorna i soli campi
//! last-message. L'atomicità del ramo create-vs-update è dello store,
//! non di un lock applicativo: messaggi concorrenti sulla stessa room
//! non possono né duplicare il record né perdere un aggiornamento.

use super::Read;
use crate::entities::{ChatRoomSummary, Message, Product, RoomKey, User};
use sqlx::{Error, MySqlPool};

pub struct ChatRoomRepository {
    connection_pool: MySqlPool,
}

impl ChatRoomRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Aggiorna il riepilogo della room a partire da un messaggio persistito
    /// e dai tre lookup (tutti opzionali, vedi `ChatRoomSummary::derive`).
    ///
    /// Esattamente una scrittura sullo store per chiamata. I campi set-once
    /// vengono applicati solo quando la riga nasce: alla seconda chiamata in
    /// poi lo statement tocca `last_message` e `last_message_at` soltanto,
    /// qualunque cosa contengano ora prodotto e utenti.
    pub async fn upsert(
        &self,
        message: &Message,
        key: &RoomKey,
        product: Option<&Product>,
        buyer: Option<&User>,
        seller: Option<&User>,
    ) -> Result<(), Error> {
        let summary = ChatRoomSummary::derive(message, key, product, buyer, seller);

        sqlx::query(
            r#"
            INSERT INTO chat_rooms (
                room_id, product_id, product_title, product_thumbnail, price,
                seller_id, seller_nickname, seller_image,
                buyer_id, buyer_nickname, buyer_image,
                location, last_message, last_message_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                last_message = VALUES(last_message),
                last_message_at = VALUES(last_message_at)
            "#,
        )
        .bind(&summary.room_id)
        .bind(&summary.product_id)
        .bind(&summary.product_title)
        .bind(&summary.product_thumbnail)
        .bind(&summary.price)
        .bind(&summary.seller_id)
        .bind(&summary.seller_nickname)
        .bind(&summary.seller_image)
        .bind(&summary.buyer_id)
        .bind(&summary.buyer_nickname)
        .bind(&summary.buyer_image)
        .bind(&summary.location)
        .bind(&summary.last_message)
        .bind(summary.last_message_at)
        .execute(&self.connection_pool)
        .await?;

        Ok(())
    }
}

impl Read<ChatRoomSummary, str> for ChatRoomRepository {
    async fn read(&self, room_id: &str) -> Result<Option<ChatRoomSummary>, Error> {
        sqlx::query_as::<_, ChatRoomSummary>(
            r#"
            SELECT room_id, product_id, product_title, product_thumbnail, price,
                   seller_id, seller_nickname, seller_image,
                   buyer_id, buyer_nickname, buyer_image,
                   location, last_message, last_message_at
            FROM chat_rooms
            WHERE room_id = ?
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
