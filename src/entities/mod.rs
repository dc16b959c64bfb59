//! Entities module - Entità persistite e lookup
//!
//! Le entità rispecchiano le collezioni dello store: `messages` e
//! `chat_rooms` sono di proprietà del relay, `products` e `users`
//! appartengono ad un altro sistema e vengono solo lette.

pub mod chat_room;
pub mod message;
pub mod product;
pub mod room_key;
pub mod user;

// Re-exports per facilitare l'import
pub use chat_room::ChatRoomSummary;
pub use message::Message;
pub use product::Product;
pub use room_key::RoomKey;
pub use user::User;
