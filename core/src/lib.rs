//! Conversation core for the concierge chat widget.
//!
//! A [`SessionController`] owns one conversation: it accepts user input,
//! records it in the [`MessageLog`], sends it to the `/chat` endpoint through
//! a [`ChatDispatcher`], and always answers with exactly one assistant
//! message, falling back to a canned reply when the exchange fails.

mod classifier;
pub mod config;
mod controller;
mod dispatcher;
mod endpoint;
mod error;
mod message_log;
mod panel;
mod session_id;

pub use classifier::ErrorKind;
pub use classifier::FallbackMessages;
pub use classifier::classify;
pub use config::ConciergeConfig;
pub use config::DEFAULT_REQUEST_TIMEOUT;
pub use controller::ControllerState;
pub use controller::ConversationObserver;
pub use controller::ConversationSnapshot;
pub use controller::SessionController;
pub use dispatcher::ChatDispatcher;
pub use dispatcher::PendingRequest;
pub use endpoint::ChatEndpoint;
pub use error::ConfigError;
pub use error::DispatchError;
pub use error::SubmitError;
pub use message_log::MessageLog;
pub use panel::ChatPanel;
pub use session_id::new_session_id;

pub use concierge_protocol::SessionId;
pub use concierge_protocol::message::Message;
pub use concierge_protocol::message::MessageId;
pub use concierge_protocol::message::Role;
