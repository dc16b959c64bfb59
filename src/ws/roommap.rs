use crate::dtos::ServerEvent;
use crate::ws::BROADCAST_CHANNEL_CAPACITY;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::SendError;
use tokio::sync::broadcast::{Receiver, Sender};
use tracing::{info, instrument, warn};

/// Registro globale dei gruppi broadcast: una testa tx per ogni room con
/// almeno una connessione iscritta. È lo stato di membership del
/// trasporto, non dello store: muore con le connessioni.
pub struct RoomMap {
    channels: DashMap<String, Sender<Arc<ServerEvent>>>,
}

impl RoomMap {
    pub fn new() -> Self {
        RoomMap {
            channels: DashMap::new(),
        }
    }

    #[instrument(skip(self))]
    pub fn subscribe(&self, room_id: &str) -> Receiver<Arc<ServerEvent>> {
        // entry atomica: due prime iscrizioni concorrenti alla stessa room
        // devono finire sullo stesso canale, un get-then-insert farebbe
        // sovrascrivere al secondo il sender del primo
        self.channels
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!("Creating new broadcast channel for room");
                // Arc<ServerEvent> per condividere il riferimento, non copiare
                // l'evento su ogni rx
                broadcast::channel::<Arc<ServerEvent>>(BROADCAST_CHANNEL_CAPACITY).0
            })
            .subscribe()
    }

    #[instrument(skip(self, event))]
    pub fn send(
        &self,
        room_id: &str,
        event: Arc<ServerEvent>,
    ) -> Result<usize, SendError<Arc<ServerEvent>>> {
        if let Some(room) = self.channels.get(room_id) {
            match room.send(event.clone()) {
                Ok(n) => {
                    info!(receivers = n, "Message broadcast to receivers");
                    Ok(n)
                }
                Err(e) => {
                    warn!("No active receivers, removing channel");
                    // Nessuno sta ascoltando, rimuovi il channel
                    drop(room); // Rilascia il lock
                    self.channels.remove(room_id);
                    Err(e)
                }
            }
        } else {
            // Room senza alcun iscritto: non è un errore del relay
            Err(SendError(event))
        }
    }

    /// Numero di room con un canale attivo
    pub fn room_count(&self) -> usize {
        self.channels.len()
    }
}

impl Default for RoomMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::MessageDTO;

    fn event_for(room_id: &str, text: &str) -> Arc<ServerEvent> {
        Arc::new(ServerEvent::ReceiveMessage(MessageDTO {
            message_id: 1,
            room_id: room_id.to_string(),
            sender_id: "b1".to_string(),
            text: text.to_string(),
            created_at: chrono::Utc::now(),
            local_id: None,
        }))
    }

    #[tokio::test]
    async fn test_all_room_members_receive_the_event() {
        let map = RoomMap::new();
        let mut rx_a = map.subscribe("p1_s1_b1");
        let mut rx_b = map.subscribe("p1_s1_b1");

        let sent = map.send("p1_s1_b1", event_for("p1_s1_b1", "hello")).unwrap();
        assert_eq!(sent, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            let event = rx.try_recv().expect("member should receive the broadcast");
            let ServerEvent::ReceiveMessage(msg) = event.as_ref();
            assert_eq!(msg.text, "hello");
        }
    }

    #[tokio::test]
    async fn test_fanout_is_scoped_to_the_room() {
        let map = RoomMap::new();
        let mut rx_a = map.subscribe("roomA_s_b");
        let _rx_b = map.subscribe("roomB_s_b");

        map.send("roomB_s_b", event_for("roomB_s_b", "only for B")).unwrap();

        assert!(
            rx_a.try_recv().is_err(),
            "roomA subscriber must never see roomB traffic"
        );
    }

    #[test]
    fn test_concurrent_first_subscribes_share_one_channel() {
        use std::sync::Barrier;

        // due connessioni che fanno la prima iscrizione in contemporanea
        // devono finire sullo stesso canale: nessuna delle due può restare
        // orfana del broadcast
        for _ in 0..500 {
            let map = RoomMap::new();
            let barrier = Barrier::new(2);

            let (mut rx_a, mut rx_b) = std::thread::scope(|s| {
                let a = s.spawn(|| {
                    barrier.wait();
                    map.subscribe("p1_s1_b1")
                });
                let b = s.spawn(|| {
                    barrier.wait();
                    map.subscribe("p1_s1_b1")
                });
                (a.join().unwrap(), b.join().unwrap())
            });

            let delivered = map
                .send("p1_s1_b1", event_for("p1_s1_b1", "hello"))
                .expect("channel should be alive with two receivers");
            assert_eq!(delivered, 2, "a first subscribe overwrote the other");
            assert!(rx_a.try_recv().is_ok(), "first subscriber lost the room");
            assert!(rx_b.try_recv().is_ok(), "second subscriber lost the room");
        }
    }

    #[tokio::test]
    async fn test_send_to_room_without_members_is_an_empty_fanout() {
        let map = RoomMap::new();
        assert!(map.send("p9_s9_b9", event_for("p9_s9_b9", "hi")).is_err());
    }

    #[tokio::test]
    async fn test_channel_removed_once_all_receivers_drop() {
        let map = RoomMap::new();
        let rx = map.subscribe("p1_s1_b1");
        drop(rx);
        assert_eq!(map.room_count(), 1);

        // il primo send senza riceventi fa pulizia
        assert!(map.send("p1_s1_b1", event_for("p1_s1_b1", "hi")).is_err());
        assert_eq!(map.room_count(), 0);
    }
}
