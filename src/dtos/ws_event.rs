//! WebSocket Event DTOs - Buste per gli eventi WebSocket
//!
//! Tagged union in stile socket: serde serializza
//! `{ "event": "joinRoom", "data": "p1_s1_b1" }`
//! oppure
//! `{ "event": "sendMessage", "data": { ... } }`
//! e in uscita
//! `{ "event": "receiveMessage", "data": { ... } }`

use crate::dtos::{InboundMessageDTO, MessageDTO};
use serde::{Deserialize, Serialize};

/// Eventi che il client può inviare al relay
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Iscrive la connessione al gruppo broadcast della room.
    /// Nessuna validazione del formato del room id in fase di join.
    JoinRoom(String),
    SendMessage(InboundMessageDTO),
}

/// Eventi che il relay invia ai client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    ReceiveMessage(MessageDTO),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_room_wire_format() {
        let raw = r#"{"event": "joinRoom", "data": "p1_s1_b1"}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        match event {
            ClientEvent::JoinRoom(room_id) => assert_eq!(room_id, "p1_s1_b1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_send_message_wire_format() {
        let raw = r#"{
            "event": "sendMessage",
            "data": {
                "roomId": "p1_s1_b1",
                "senderId": "b1",
                "text": "hello",
                "createdAt": "2024-05-01T12:00:00Z",
                "localId": "tmp-1"
            }
        }"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        match event {
            ClientEvent::SendMessage(dto) => {
                assert_eq!(dto.text, "hello");
                assert_eq!(dto.local_id.as_deref(), Some("tmp-1"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_receive_message_is_tagged() {
        let event = ServerEvent::ReceiveMessage(MessageDTO {
            message_id: 7,
            room_id: "p1_s1_b1".to_string(),
            sender_id: "b1".to_string(),
            text: "hello".to_string(),
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            local_id: None,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"receiveMessage""#));
        assert!(json.contains(r#""messageId":7"#));
    }
}
