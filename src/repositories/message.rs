//! MessageRepository - Repository per la gestione dei messaggi

use super::{Create, Read};
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use sqlx::{Error, MySqlPool};

pub struct MessageRepository {
    connection_pool: MySqlPool,
}

impl MessageRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (room_id, sender_id, local_id, text, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.room_id)
        .bind(&data.sender_id)
        .bind(&data.local_id)
        .bind(&data.text)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        // L'identità la assegna lo store
        let new_id = result.last_insert_id() as i64;

        Ok(Message {
            message_id: new_id,
            room_id: data.room_id.clone(),
            sender_id: data.sender_id.clone(),
            local_id: data.local_id.clone(),
            text: data.text.clone(),
            created_at: data.created_at,
        })
    }
}

impl Read<Message, i64> for MessageRepository {
    async fn read(&self, id: &i64) -> Result<Option<Message>, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT message_id, room_id, sender_id, local_id, text, created_at
            FROM messages
            WHERE message_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
