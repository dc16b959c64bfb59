//! ProductRepository - Lookup read-only sulla collezione prodotti
//!
//! La collezione appartiene ad un altro sistema: il relay la legge
//! fresca ad ogni messaggio, senza cache. Un prodotto assente non è un
//! errore (`Ok(None)`).

use super::Read;
use crate::entities::Product;
use sqlx::{Error, MySqlPool};

pub struct ProductRepository {
    connection_pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl Read<Product, str> for ProductRepository {
    async fn read(&self, product_id: &str) -> Result<Option<Product>, Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, title, product_type, price,
                   product_image, writer_image, location
            FROM products
            WHERE product_id = ?
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
