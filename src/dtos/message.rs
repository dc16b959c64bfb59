//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload di `sendMessage` così come arriva dal client.
///
/// Lo schema è chiuso: niente campi arbitrari persistiti alla cieca.
/// `room_id` resta opzionale perché un payload senza room va scartato
/// in silenzio, non rifiutato con errore.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InboundMessageDTO {
    pub room_id: Option<String>,
    pub sender_id: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Message text must be between 1 and 5000 characters"
    ))]
    pub text: String,

    pub created_at: DateTime<Utc>,

    /// Id di correlazione generato dal client, riconsegnato nel broadcast
    pub local_id: Option<String>,
}

/// DTO per persistere un nuovo messaggio (senza message_id, con la room
/// già verificata presente)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateMessageDTO {
    pub room_id: String,
    pub sender_id: String,
    pub local_id: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CreateMessageDTO {
    /// Costruisce il DTO di persistenza dal payload inbound, una volta
    /// stabilito che `room_id` è presente.
    pub fn from_inbound(room_id: String, data: InboundMessageDTO) -> Self {
        Self {
            room_id,
            sender_id: data.sender_id,
            local_id: data.local_id,
            text: data.text,
            created_at: data.created_at,
        }
    }
}

/// Messaggio completo in uscita: payload originale più l'identità
/// assegnata dallo store.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub message_id: i64,
    pub room_id: String,
    pub sender_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            message_id: value.message_id,
            room_id: value.room_id,
            sender_id: value.sender_id,
            text: value.text,
            created_at: value.created_at,
            local_id: value.local_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_inbound_accepts_camel_case_wire_format() {
        let raw = r#"{
            "roomId": "p1_s1_b1",
            "senderId": "b1",
            "text": "hello",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let dto: InboundMessageDTO = serde_json::from_str(raw).unwrap();
        assert_eq!(dto.room_id.as_deref(), Some("p1_s1_b1"));
        assert_eq!(dto.sender_id, "b1");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_inbound_without_room_id_still_parses() {
        let raw = r#"{"senderId": "b1", "text": "hi", "createdAt": "2024-05-01T12:00:00Z"}"#;
        let dto: InboundMessageDTO = serde_json::from_str(raw).unwrap();
        assert!(dto.room_id.is_none());
    }

    #[test]
    fn test_inbound_rejects_unknown_fields() {
        let raw = r#"{
            "senderId": "b1",
            "text": "hi",
            "createdAt": "2024-05-01T12:00:00Z",
            "isAdmin": true
        }"#;
        assert!(serde_json::from_str::<InboundMessageDTO>(raw).is_err());
    }

    #[test]
    fn test_empty_text_fails_validation() {
        let raw = r#"{"senderId": "b1", "text": "", "createdAt": "2024-05-01T12:00:00Z"}"#;
        let dto: InboundMessageDTO = serde_json::from_str(raw).unwrap();
        assert!(dto.validate().is_err());
    }
}
