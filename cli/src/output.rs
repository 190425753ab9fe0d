use concierge_core::ConversationObserver;
use concierge_core::ConversationSnapshot;
use concierge_core::Message;
use concierge_core::MessageId;
use std::sync::Mutex;
use std::sync::PoisonError;

/// A way of writing the conversation to the terminal.
///
/// Message output is driven by the controller through
/// [`ConversationObserver::on_update`]; the methods here cover what the
/// controller does not report.
pub(crate) trait TranscriptOutput: ConversationObserver {
    /// Called once after the session is opened. `suggested_prompts` is empty
    /// in one-shot mode.
    fn session_started(&self, snapshot: &ConversationSnapshot, suggested_prompts: &[String]);

    fn notice(&self, text: &str);
}

#[allow(clippy::print_stdout)]
pub(crate) fn print_stdout_line(line: &str) {
    println!("{line}");
}

#[allow(clippy::print_stderr)]
pub(crate) fn print_stderr_line(line: &str) {
    eprintln!("{line}");
}

/// Remembers the last message written so each update prints only new ones.
#[derive(Default)]
pub(crate) struct PrintedUpTo(Mutex<Option<MessageId>>);

impl PrintedUpTo {
    pub(crate) fn take_unseen(&self, snapshot: &ConversationSnapshot) -> Vec<Message> {
        let mut last = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let unseen: Vec<Message> = snapshot
            .messages
            .iter()
            .filter(|message| last.is_none_or(|printed| message.id() > printed))
            .cloned()
            .collect();
        if let Some(message) = unseen.last() {
            *last = Some(message.id());
        }
        unseen
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::TimeZone;
    use chrono::Utc;
    use concierge_core::ConversationSnapshot;
    use concierge_core::Message;
    use concierge_core::MessageId;
    use concierge_core::Role;
    use concierge_core::SessionId;

    pub(crate) fn snapshot(entries: &[(Role, &str)], busy: bool) -> ConversationSnapshot {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let messages = entries
            .iter()
            .enumerate()
            .map(|(i, (role, content))| {
                Message::new(
                    MessageId::new(i as u64 + 1),
                    *role,
                    (*content).to_string(),
                    created_at,
                )
            })
            .collect();
        ConversationSnapshot {
            session_id: SessionId::from_string("session_1700000000000_abc123xyz"),
            messages,
            busy,
        }
    }
}
