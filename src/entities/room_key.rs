//! RoomKey - Decomposizione dell'identificatore di room

/// I tre identificatori codificati in un `room_id`, nell'ordine litterale
/// `<productId>_<sellerId>_<buyerId>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomKey {
    pub product_id: String,
    pub seller_id: String,
    pub buyer_id: String,
}

impl RoomKey {
    /// Scompone un `room_id` nei suoi tre segmenti `_`-separati.
    /// Ritorna `None` se i segmenti non sono esattamente tre.
    pub fn parse(room_id: &str) -> Option<Self> {
        let mut parts = room_id.split('_');
        let product_id = parts.next()?;
        let seller_id = parts.next()?;
        let buyer_id = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(RoomKey {
            product_id: product_id.to_string(),
            seller_id: seller_id.to_string(),
            buyer_id: buyer_id.to_string(),
        })
    }
}
