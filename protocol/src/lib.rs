pub mod chat;
pub mod message;
mod session_id;

pub use session_id::SessionId;
