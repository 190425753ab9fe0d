use concierge_client::HttpTransport;
use concierge_protocol::SessionId;
use concierge_protocol::message::Message;
use concierge_protocol::message::Role;
use serde::Serialize;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use tracing::debug;
use tracing::warn;

use crate::classifier::FallbackMessages;
use crate::classifier::classify;
use crate::config::ConciergeConfig;
use crate::dispatcher::ChatDispatcher;
use crate::dispatcher::PendingRequest;
use crate::endpoint::ChatEndpoint;
use crate::error::SubmitError;
use crate::message_log::MessageLog;
use crate::session_id::new_session_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerState {
    Idle,
    Sending,
}

/// What a presentation layer needs to draw the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSnapshot {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
    pub busy: bool,
}

/// Receives a fresh snapshot after every change to the conversation.
///
/// Called on the task that drove the change, outside of any controller lock.
pub trait ConversationObserver: Send + Sync {
    fn on_update(&self, snapshot: &ConversationSnapshot);
}

struct SessionState {
    log: MessageLog,
    pending: Option<PendingRequest>,
}

impl SessionState {
    fn controller_state(&self) -> ControllerState {
        if self.pending.is_some() {
            ControllerState::Sending
        } else {
            ControllerState::Idle
        }
    }
}

/// Drives one conversation: `Idle --submit--> Sending --reply/failure--> Idle`.
///
/// Clones share the same session, so several tasks may call [`submit`]
/// concurrently; all but one are refused with [`SubmitError::Busy`].
///
/// [`submit`]: SessionController::submit
pub struct SessionController<T: HttpTransport> {
    session_id: SessionId,
    dispatcher: Arc<ChatDispatcher<T>>,
    fallback: Arc<FallbackMessages>,
    state: Arc<Mutex<SessionState>>,
    observers: Vec<Arc<dyn ConversationObserver>>,
}

impl<T: HttpTransport> Clone for SessionController<T> {
    fn clone(&self) -> Self {
        Self {
            session_id: self.session_id.clone(),
            dispatcher: Arc::clone(&self.dispatcher),
            fallback: Arc::clone(&self.fallback),
            state: Arc::clone(&self.state),
            observers: self.observers.clone(),
        }
    }
}

impl<T: HttpTransport> SessionController<T> {
    pub fn new(transport: T, config: &ConciergeConfig) -> Self {
        let dispatcher = ChatDispatcher::new(
            transport,
            ChatEndpoint::new(config.base_url.clone()),
            config.request_timeout(),
        );
        Self::with_dispatcher(dispatcher, config)
    }

    pub fn with_dispatcher(dispatcher: ChatDispatcher<T>, config: &ConciergeConfig) -> Self {
        let mut log = MessageLog::new();
        log.append(Role::Assistant, config.greeting.clone());
        let session_id = new_session_id();
        debug!(%session_id, "chat session created");
        Self {
            session_id,
            dispatcher: Arc::new(dispatcher),
            fallback: Arc::new(config.fallback.clone()),
            state: Arc::new(Mutex::new(SessionState { log, pending: None })),
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> ControllerState {
        self.lock_state().controller_state()
    }

    pub fn is_busy(&self) -> bool {
        self.state() == ControllerState::Sending
    }

    /// The in-flight exchange, if any.
    pub fn pending(&self) -> Option<PendingRequest> {
        self.lock_state().pending.clone()
    }

    /// Aborts the in-flight exchange, if any. The pending `submit` still
    /// settles, answering with the cancelled fallback. Returns whether there
    /// was anything to cancel.
    pub fn cancel_pending(&self) -> bool {
        match &self.lock_state().pending {
            Some(request) => {
                request.cancel();
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        let state = self.lock_state();
        ConversationSnapshot {
            session_id: self.session_id.clone(),
            messages: state.log.snapshot(),
            busy: state.pending.is_some(),
        }
    }

    /// Sends `text` and waits for the assistant's answer.
    ///
    /// On acceptance the log gains the user message immediately and exactly
    /// one assistant message once the dispatch settles; failures become a
    /// fallback message rather than an error. Returns the assistant message.
    pub async fn submit(&self, text: &str) -> Result<Message, SubmitError> {
        let request = {
            let mut state = self.lock_state();
            if state.pending.is_some() {
                debug!(session_id = %self.session_id, "submit refused while sending");
                return Err(SubmitError::Busy);
            }
            let request = PendingRequest::new(text, self.session_id.clone())?;
            state.log.append(Role::User, text);
            state.pending = Some(request.clone());
            request
        };
        self.notify();

        let mut guard = PendingGuard {
            controller: self,
            armed: true,
        };
        let outcome = self.dispatcher.dispatch(&request).await;

        let content = match outcome {
            Ok(reply) if reply.is_empty() => {
                debug!(session_id = %self.session_id, "chat endpoint returned no reply text");
                self.fallback.empty_reply.clone()
            }
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    session_id = %self.session_id,
                    kind = ?err.kind(),
                    error = %err,
                    "chat exchange failed"
                );
                classify(&err, &self.fallback).to_string()
            }
        };

        let message = {
            let mut state = self.lock_state();
            guard.armed = false;
            state.pending = None;
            state.log.append(Role::Assistant, content)
        };
        self.notify();
        Ok(message)
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &self.observers {
            observer.on_update(&snapshot);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles the exchange when a `submit` future is dropped before its dispatch
/// does: the request is cancelled, the cancelled fallback is appended as the
/// assistant message and the session returns to `Idle`.
struct PendingGuard<'a, T: HttpTransport> {
    controller: &'a SessionController<T>,
    armed: bool,
}

impl<T: HttpTransport> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let abandoned = {
            let mut state = self.controller.lock_state();
            let request = state.pending.take();
            if request.is_some() {
                state
                    .log
                    .append(Role::Assistant, self.controller.fallback.cancelled.clone());
            }
            request
        };
        if let Some(request) = abandoned {
            request.cancel();
            debug!(session_id = %request.session_id(), "pending chat exchange abandoned");
            self.controller.notify();
        }
    }
}
