//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di database per una specifica
//! collezione. Le query sono runtime-checked (`sqlx::query` / `query_as`):
//! niente macro compile-time, così la crate si compila anche senza un
//! database raggiungibile.

pub mod chat_room;
pub mod message;
pub mod product;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use chat_room::ChatRoomRepository;
pub use message::MessageRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
