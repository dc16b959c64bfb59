//! ChatRoomSummary entity - Riepilogo denormalizzato per room
//!
//! Un record per `room_id`. I campi si dividono in due classi:
//! - aggiornati ad ogni messaggio: `last_message`, `last_message_at`
//! - set-once: scritti solo alla creazione del record e mai più toccati,
//!   anche se prodotto o utenti cambiano in seguito

use crate::entities::{Message, Product, RoomKey, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct ChatRoomSummary {
    pub room_id: String,

    // --- campi set-once ---
    pub product_id: String,
    pub product_title: Option<String>,
    pub product_thumbnail: Option<String>,
    /// Numero JSON (prezzo) se il prodotto è di tipo "Sale", altrimenti
    /// la stringa litterale "free". Colonna JSON proprio perché il tipo
    /// cambia tra i due rami.
    pub price: Value,
    pub seller_id: String,
    pub seller_nickname: String,
    /// Attenzione: viene dal campo writer-image del *prodotto*, non dal
    /// record del venditore. Asimmetria voluta rispetto a `buyer_image`.
    pub seller_image: Option<String>,
    pub buyer_id: String,
    pub buyer_nickname: String,
    pub buyer_image: Option<String>,
    pub location: String,

    // --- campi aggiornati ad ogni messaggio ---
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
}

impl ChatRoomSummary {
    /// Deriva il riepilogo completo da un messaggio e dai tre lookup.
    ///
    /// Funzione pura: i lookup possono mancare (prodotto rimosso, utente
    /// sconosciuto) e ogni campo derivato ripiega su stringa vuota o null
    /// senza mai fallire.
    pub fn derive(
        message: &Message,
        key: &RoomKey,
        product: Option<&Product>,
        buyer: Option<&User>,
        seller: Option<&User>,
    ) -> Self {
        // prodotto assente => ramo non-Sale => "free"
        let price = match product {
            Some(p) if p.product_type.as_deref() == Some("Sale") => {
                p.price.map(Value::from).unwrap_or(Value::Null)
            }
            _ => Value::String("free".to_string()),
        };

        ChatRoomSummary {
            room_id: message.room_id.clone(),
            product_id: key.product_id.clone(),
            product_title: product.and_then(|p| p.title.clone()),
            product_thumbnail: product.and_then(|p| p.product_image.clone()),
            price,
            seller_id: key.seller_id.clone(),
            seller_nickname: seller
                .and_then(|u| u.nickname.clone())
                .unwrap_or_default(),
            seller_image: product.and_then(|p| p.writer_image.clone()),
            buyer_id: key.buyer_id.clone(),
            buyer_nickname: buyer
                .and_then(|u| u.nickname.clone())
                .unwrap_or_default(),
            buyer_image: buyer.and_then(|u| u.profile_image.clone()),
            location: product
                .and_then(|p| p.location.clone())
                .unwrap_or_default(),
            last_message: message.text.clone(),
            last_message_at: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_message() -> Message {
        Message {
            message_id: 1,
            room_id: "p1_s1_b1".to_string(),
            sender_id: "b1".to_string(),
            local_id: None,
            text: "hello".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample_key() -> RoomKey {
        RoomKey::parse("p1_s1_b1").unwrap()
    }

    fn sample_product() -> Product {
        Product {
            product_id: "p1".to_string(),
            title: Some("Bike".to_string()),
            product_type: Some("Sale".to_string()),
            price: Some(5000),
            product_image: Some("bike.jpg".to_string()),
            writer_image: Some("seller_avatar.jpg".to_string()),
            location: Some("Mapo-gu".to_string()),
        }
    }

    fn sample_user(id: &str, nickname: &str) -> User {
        User {
            user_id: id.to_string(),
            nickname: Some(nickname.to_string()),
            profile_image: Some(format!("{}.jpg", id)),
        }
    }

    #[test]
    fn test_price_for_sale_product_is_the_number() {
        let summary = ChatRoomSummary::derive(
            &sample_message(),
            &sample_key(),
            Some(&sample_product()),
            None,
            None,
        );
        assert_eq!(summary.price, json!(5000));
    }

    #[test]
    fn test_price_for_non_sale_product_is_free() {
        let mut product = sample_product();
        product.product_type = Some("Gift".to_string());
        let summary =
            ChatRoomSummary::derive(&sample_message(), &sample_key(), Some(&product), None, None);
        assert_eq!(summary.price, json!("free"));
    }

    #[test]
    fn test_price_for_absent_product_is_free() {
        let summary =
            ChatRoomSummary::derive(&sample_message(), &sample_key(), None, None, None);
        assert_eq!(summary.price, json!("free"));
    }

    #[test]
    fn test_sale_product_without_price_stores_null() {
        let mut product = sample_product();
        product.price = None;
        let summary =
            ChatRoomSummary::derive(&sample_message(), &sample_key(), Some(&product), None, None);
        assert_eq!(summary.price, Value::Null);
    }

    #[test]
    fn test_absent_buyer_falls_back_to_empty_nickname_and_null_image() {
        let summary = ChatRoomSummary::derive(
            &sample_message(),
            &sample_key(),
            Some(&sample_product()),
            None,
            Some(&sample_user("s1", "venditore")),
        );
        assert_eq!(summary.buyer_nickname, "");
        assert_eq!(summary.buyer_image, None);
    }

    #[test]
    fn test_seller_image_comes_from_product_writer_image() {
        let seller = User {
            user_id: "s1".to_string(),
            nickname: Some("venditore".to_string()),
            profile_image: Some("own_profile.jpg".to_string()),
        };
        let summary = ChatRoomSummary::derive(
            &sample_message(),
            &sample_key(),
            Some(&sample_product()),
            Some(&sample_user("b1", "compratore")),
            Some(&seller),
        );
        // non own_profile.jpg: l'immagine del venditore arriva dal prodotto
        assert_eq!(summary.seller_image.as_deref(), Some("seller_avatar.jpg"));
    }

    #[test]
    fn test_absent_product_falls_back_to_empty_location_and_null_thumbnail() {
        let summary = ChatRoomSummary::derive(
            &sample_message(),
            &sample_key(),
            None,
            Some(&sample_user("b1", "compratore")),
            Some(&sample_user("s1", "venditore")),
        );
        assert_eq!(summary.location, "");
        assert_eq!(summary.product_thumbnail, None);
        assert_eq!(summary.product_title, None);
    }

    #[test]
    fn test_last_message_fields_copy_the_message() {
        let message = sample_message();
        let summary = ChatRoomSummary::derive(
            &message,
            &sample_key(),
            Some(&sample_product()),
            Some(&sample_user("b1", "compratore")),
            Some(&sample_user("s1", "venditore")),
        );
        assert_eq!(summary.last_message, message.text);
        assert_eq!(summary.last_message_at, message.created_at);
        assert_eq!(summary.room_id, "p1_s1_b1");
        assert_eq!(summary.product_id, "p1");
        assert_eq!(summary.seller_id, "s1");
        assert_eq!(summary.buyer_id, "b1");
    }
}
