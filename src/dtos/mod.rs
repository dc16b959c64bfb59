//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (wire, camelCase) dalla
//! rappresentazione interna (entities).

pub mod message;
pub mod ws_event;

// Re-exports per facilitare l'import
pub use message::{CreateMessageDTO, InboundMessageDTO, MessageDTO};
pub use ws_event::{ClientEvent, ServerEvent};
