//! Product entity - Entità prodotto (lookup read-only)

use serde::{Deserialize, Serialize};

/// Snapshot di un annuncio prodotto, letto dalla collezione `products`
/// di un altro sistema al momento della gestione del messaggio.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub product_id: String,
    pub title: Option<String>,
    /// "Sale" per le vendite; qualunque altro valore (o assenza) vale regalo
    pub product_type: Option<String>,
    pub price: Option<i64>,
    pub product_image: Option<String>,
    /// Immagine profilo di chi ha pubblicato l'annuncio
    pub writer_image: Option<String>,
    pub location: Option<String>,
}
