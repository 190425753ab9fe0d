use chrono::Utc;
use concierge_protocol::message::Message;
use concierge_protocol::message::MessageId;
use concierge_protocol::message::Role;

/// Append-only record of a conversation.
///
/// Sequence order equals creation order and ids strictly increase. Entries
/// are never edited or removed.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: MessageId::FIRST,
        }
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Message {
        let message = Message::new(self.next_id, role, content.into(), Utc::now());
        self.next_id = self.next_id.next();
        self.messages.push(message.clone());
        message
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
