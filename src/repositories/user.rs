//! UserRepository - Lookup read-only sulla collezione utenti

use super::Read;
use crate::entities::User;
use sqlx::{Error, MySqlPool};

pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl Read<User, str> for UserRepository {
    async fn read(&self, user_id: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, nickname, profile_image
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
