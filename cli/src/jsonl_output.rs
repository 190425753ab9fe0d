use chrono::DateTime;
use chrono::Utc;
use concierge_core::ConversationObserver;
use concierge_core::ConversationSnapshot;
use concierge_core::Message;
use concierge_core::Role;
use serde::Serialize;
use tracing::error;

use crate::output::PrintedUpTo;
use crate::output::TranscriptOutput;
use crate::output::print_stdout_line;

/// One line of `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum TranscriptEvent {
    #[serde(rename = "session.started")]
    SessionStarted {
        session_id: String,
        suggested_prompts: Vec<String>,
    },
    #[serde(rename = "message")]
    MessageAppended {
        id: u64,
        role: Role,
        content: String,
        created_at: DateTime<Utc>,
    },
    /// A user message was accepted and the reply has not arrived yet.
    #[serde(rename = "reply.pending")]
    ReplyPending,
    #[serde(rename = "notice")]
    Notice { message: String },
}

impl From<&Message> for TranscriptEvent {
    fn from(message: &Message) -> Self {
        TranscriptEvent::MessageAppended {
            id: message.id().get(),
            role: message.role(),
            content: message.content().to_string(),
            created_at: message.created_at(),
        }
    }
}

#[derive(Default)]
pub(crate) struct JsonlOutput {
    printed: PrintedUpTo,
}

impl JsonlOutput {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn collect_events(&self, snapshot: &ConversationSnapshot) -> Vec<TranscriptEvent> {
        let mut events: Vec<TranscriptEvent> = self
            .printed
            .take_unseen(snapshot)
            .iter()
            .map(TranscriptEvent::from)
            .collect();
        if snapshot.busy {
            events.push(TranscriptEvent::ReplyPending);
        }
        events
    }

    fn emit(&self, event: &TranscriptEvent) {
        match serde_json::to_string(event) {
            Ok(line) => print_stdout_line(&line),
            Err(err) => error!("failed to serialize transcript event: {err}"),
        }
    }
}

impl ConversationObserver for JsonlOutput {
    fn on_update(&self, snapshot: &ConversationSnapshot) {
        for event in self.collect_events(snapshot) {
            self.emit(&event);
        }
    }
}

impl TranscriptOutput for JsonlOutput {
    fn session_started(&self, snapshot: &ConversationSnapshot, suggested_prompts: &[String]) {
        self.emit(&TranscriptEvent::SessionStarted {
            session_id: snapshot.session_id.to_string(),
            suggested_prompts: suggested_prompts.to_vec(),
        });
        self.on_update(snapshot);
    }

    fn notice(&self, text: &str) {
        self.emit(&TranscriptEvent::Notice {
            message: text.to_string(),
        });
    }
}
