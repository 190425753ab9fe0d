use concierge_client::HttpTransport;
use concierge_client::TransportError;
use concierge_protocol::SessionId;
use concierge_protocol::chat::ChatErrorBody;
use concierge_protocol::chat::ChatRequest;
use concierge_protocol::chat::ChatResponse;
use http::Method;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::endpoint::CHAT_PATH;
use crate::endpoint::ChatEndpoint;
use crate::error::DispatchError;
use crate::error::SubmitError;

/// The one outstanding exchange of a session.
///
/// Lives from the moment a submission is accepted until the dispatch
/// settles. Cancelling it, from any clone, aborts the in-flight call; the
/// timeout cancels it too.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    outgoing_text: String,
    session_id: SessionId,
    cancel: CancellationToken,
}

impl PendingRequest {
    pub fn new(text: &str, session_id: SessionId) -> Result<Self, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        Ok(Self {
            outgoing_text: text.to_string(),
            session_id,
            cancel: CancellationToken::new(),
        })
    }

    pub fn outgoing_text(&self) -> &str {
        &self.outgoing_text
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Sends one message to `/chat` and waits at most `timeout` for the reply.
pub struct ChatDispatcher<T: HttpTransport> {
    transport: T,
    endpoint: ChatEndpoint,
    timeout: Duration,
}

impl<T: HttpTransport> ChatDispatcher<T> {
    pub fn new(transport: T, endpoint: ChatEndpoint, timeout: Duration) -> Self {
        Self {
            transport,
            endpoint,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &ChatEndpoint {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs exactly one `execute` on the transport.
    ///
    /// Returns the reply text, which is empty when the endpoint answered
    /// without a `response` field. When the request is cancelled or the timer
    /// wins the race, the in-flight call is dropped, which closes its
    /// connection.
    pub async fn dispatch(&self, request: &PendingRequest) -> Result<String, DispatchError> {
        let body = ChatRequest::new(request.outgoing_text(), request.session_id().clone());
        let req = self
            .endpoint
            .build_request(Method::POST, CHAT_PATH)
            .with_json(&body);

        debug!(
            url = %req.url,
            session_id = %request.session_id(),
            timeout_ms = self.timeout.as_millis(),
            "dispatching chat message"
        );

        let response = tokio::select! {
            biased;
            result = self.transport.execute(req) => result.map_err(|err| self.map_transport_error(err))?,
            () = request.cancel.cancelled() => {
                debug!(session_id = %request.session_id(), "chat dispatch cancelled");
                return Err(DispatchError::Cancelled);
            }
            () = tokio::time::sleep(self.timeout) => {
                request.cancel();
                return Err(DispatchError::Timeout { after: self.timeout });
            }
        };

        let ChatResponse { response: reply } =
            serde_json::from_slice::<ChatResponse>(&response.body).map_err(|err| {
                DispatchError::Malformed(format!(
                    "failed to decode chat response: {err}; body: {}",
                    String::from_utf8_lossy(&response.body)
                ))
            })?;

        Ok(reply.unwrap_or_default())
    }

    fn map_transport_error(&self, err: TransportError) -> DispatchError {
        match err {
            TransportError::Timeout => DispatchError::Timeout {
                after: self.timeout,
            },
            TransportError::Http { status, body, .. } => {
                let detail = body
                    .as_deref()
                    .and_then(|body| serde_json::from_str::<ChatErrorBody>(body).ok())
                    .map(|ChatErrorBody { error }| error);
                DispatchError::Server {
                    status,
                    detail,
                    body,
                }
            }
            TransportError::Network(message) | TransportError::Build(message) => {
                DispatchError::Transport(message)
            }
        }
    }
}
