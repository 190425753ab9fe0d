use http::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::classifier::ErrorKind;

/// Ways a single `/chat` exchange can fail.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no reply within {}ms", after.as_millis())]
    Timeout { after: Duration },
    #[error("request did not reach the chat endpoint: {0}")]
    Transport(String),
    #[error("chat endpoint returned {status}: {}", detail.as_deref().unwrap_or("no error detail"))]
    Server {
        status: StatusCode,
        /// The `error` field of the endpoint's JSON error body, when it sent one.
        detail: Option<String>,
        body: Option<String>,
    },
    #[error("malformed chat response: {0}")]
    Malformed(String),
    #[error("exchange cancelled before a reply arrived")]
    Cancelled,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Timeout { .. } => ErrorKind::Timeout,
            DispatchError::Transport(_) => ErrorKind::TransportFailure,
            DispatchError::Server { .. } => ErrorKind::ServerFailure,
            DispatchError::Malformed(_) => ErrorKind::MalformedResponse,
            DispatchError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Why the controller refused a submission. A refused submission leaves the
/// log untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a reply is still pending for this session")]
    Busy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Invalid { message: String },
}
