use serde::Deserialize;
use serde::Serialize;

use crate::error::DispatchError;

pub const TIMEOUT_FALLBACK: &str =
    "The request is taking too long. Please try a simpler question or try again later.";
pub const CONNECTIVITY_FALLBACK: &str =
    "Sorry, I'm having trouble connecting to our servers. Please try again later.";
pub const GENERIC_FALLBACK: &str = "I'm sorry, I couldn't process your request. Please try again.";
pub const CANCELLED_FALLBACK: &str = "This request was cancelled. Please ask again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    /// The request never reached the endpoint or no response came back.
    TransportFailure,
    /// Non-success HTTP status.
    ServerFailure,
    /// Success status, but the body is not a chat response.
    MalformedResponse,
    /// The exchange was abandoned before it settled.
    Cancelled,
}

/// Assistant-visible text used in place of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackMessages {
    pub timeout: String,
    pub connectivity: String,
    pub generic: String,
    /// Shown when the endpoint succeeds without any reply text.
    pub empty_reply: String,
    pub cancelled: String,
}

impl Default for FallbackMessages {
    fn default() -> Self {
        Self {
            timeout: TIMEOUT_FALLBACK.to_string(),
            connectivity: CONNECTIVITY_FALLBACK.to_string(),
            generic: GENERIC_FALLBACK.to_string(),
            empty_reply: GENERIC_FALLBACK.to_string(),
            cancelled: CANCELLED_FALLBACK.to_string(),
        }
    }
}

impl FallbackMessages {
    pub fn for_kind(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::Timeout => &self.timeout,
            ErrorKind::TransportFailure => &self.connectivity,
            ErrorKind::ServerFailure | ErrorKind::MalformedResponse => &self.generic,
            ErrorKind::Cancelled => &self.cancelled,
        }
    }
}

/// Maps a failed exchange to the text shown to the visitor.
pub fn classify<'a>(err: &DispatchError, messages: &'a FallbackMessages) -> &'a str {
    messages.for_kind(err.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn every_error_maps_to_its_fallback() {
        let messages = FallbackMessages::default();
        let cases = [
            (
                DispatchError::Timeout {
                    after: Duration::from_secs(45),
                },
                TIMEOUT_FALLBACK,
            ),
            (
                DispatchError::Transport("connection refused".to_string()),
                CONNECTIVITY_FALLBACK,
            ),
            (
                DispatchError::Server {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: None,
                    body: None,
                },
                GENERIC_FALLBACK,
            ),
            (
                DispatchError::Malformed("expected value".to_string()),
                GENERIC_FALLBACK,
            ),
            (DispatchError::Cancelled, CANCELLED_FALLBACK),
        ];

        for (err, expected) in cases {
            assert_eq!(classify(&err, &messages), expected, "for {err:?}");
        }
    }

    #[test]
    fn timeout_and_server_fallbacks_differ() {
        let messages = FallbackMessages::default();
        assert_ne!(
            messages.for_kind(ErrorKind::Timeout),
            messages.for_kind(ErrorKind::ServerFailure)
        );
    }

    #[test]
    fn custom_messages_are_used() {
        let messages = FallbackMessages {
            timeout: "slow".to_string(),
            ..FallbackMessages::default()
        };
        let err = DispatchError::Timeout {
            after: Duration::from_millis(1),
        };
        assert_eq!(classify(&err, &messages), "slow");
    }
}
