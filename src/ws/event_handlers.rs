//! WebSocket Event Handlers - Il relay dei messaggi
//!
//! Sequenza per ogni `sendMessage`:
//! 1. Scartare in silenzio i payload senza `roomId` (nessuna persistenza)
//! 2. Persistere il messaggio e ottenere l'id assegnato dallo store
//! 3. Scomporre il room id in productId/sellerId/buyerId
//! 4. Lookup concorrenti di prodotto, compratore e venditore (l'assenza
//!    è tollerata, non fatale)
//! 5. Upsert del riepilogo della room
//! 6-7. Broadcast del messaggio completo (payload + id) a tutti i membri
//! Un fallimento di un passo interrompe i successivi: niente broadcast
//! per un messaggio non persistito o non riepilogato.

use crate::AppState;
use crate::core::RelayError;
use crate::dtos::{CreateMessageDTO, InboundMessageDTO, MessageDTO, ServerEvent};
use crate::entities::RoomKey;
use crate::repositories::{Create, Read};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// Handler per l'evento `sendMessage`. Non restituisce nulla al client:
/// ogni fallimento viene loggato qui e la connessione resta viva.
#[instrument(skip(state, data))]
pub async fn process_send_message(state: &AppState, data: InboundMessageDTO) {
    // roomId assente: scarto silenzioso, nessun tentativo di persistenza
    let Some(room_id) = data.room_id.clone() else {
        warn!("sendMessage without roomId, dropped");
        return;
    };

    if let Err(e) = data.validate() {
        warn!(error = %e, "Invalid sendMessage payload, dropped");
        return;
    }

    if let Err(e) = relay_message(state, room_id, data).await {
        error!(error = %e, "Failed to relay message");
    }
}

async fn relay_message(
    state: &AppState,
    room_id: String,
    data: InboundMessageDTO,
) -> Result<(), RelayError> {
    // 2. persistenza: da qui esce l'identità assegnata dallo store
    let created = state
        .messages
        .create(&CreateMessageDTO::from_inbound(room_id.clone(), data))
        .await?;
    info!(message_id = created.message_id, "Message stored");

    // 3. productId / sellerId / buyerId dal room id
    let key = RoomKey::parse(&room_id)
        .ok_or_else(|| RelayError::MalformedRoomId(room_id.clone()))?;

    // 4. lookup indipendenti; Ok(None) vale "assente" e non ferma nulla
    let (product, buyer, seller) = tokio::join!(
        state.products.read(key.product_id.as_str()),
        state.users.read(key.buyer_id.as_str()),
        state.users.read(key.seller_id.as_str()),
    );
    let (product, buyer, seller) = (product?, buyer?, seller?);
    debug!(
        product_found = product.is_some(),
        buyer_found = buyer.is_some(),
        seller_found = seller.is_some(),
        "Lookups completed"
    );

    // 5. riepilogo della room, upsert atomico
    state
        .chat_rooms
        .upsert(&created, &key, product.as_ref(), buyer.as_ref(), seller.as_ref())
        .await?;

    // 6-7. messaggio completo a tutti i membri correnti della room
    let event = Arc::new(ServerEvent::ReceiveMessage(MessageDTO::from(created)));
    if state.rooms_online.send(&room_id, event).is_err() {
        // nessuna connessione iscritta alla room in questo momento
        debug!(%room_id, "No members currently joined");
    }

    Ok(())
}
