//! User entity - Entità utente (lookup read-only)

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: String,
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
}
