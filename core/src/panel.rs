use concierge_client::HttpTransport;
use std::sync::Arc;

use crate::config::ConciergeConfig;
use crate::controller::ConversationObserver;
use crate::controller::SessionController;

/// The chat widget as a whole: closed until the visitor first opens it.
///
/// The session is created lazily on the first [`open`](ChatPanel::open) and
/// kept across close/reopen. Dropping the panel tears the session down.
pub struct ChatPanel<T: HttpTransport + Clone> {
    config: ConciergeConfig,
    transport: T,
    observers: Vec<Arc<dyn ConversationObserver>>,
    controller: Option<SessionController<T>>,
    open: bool,
}

impl<T: HttpTransport + Clone> ChatPanel<T> {
    pub fn new(transport: T, config: ConciergeConfig) -> Self {
        Self {
            config,
            transport,
            observers: Vec::new(),
            controller: None,
            open: false,
        }
    }

    /// Observers are attached to the session when it is created.
    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn open(&mut self) -> &SessionController<T> {
        self.open = true;
        let Self {
            config,
            transport,
            observers,
            controller,
            ..
        } = self;
        controller.get_or_insert_with(|| {
            observers.iter().fold(
                SessionController::new(transport.clone(), config),
                |controller, observer| controller.with_observer(Arc::clone(observer)),
            )
        })
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `None` until the panel has been opened once.
    pub fn controller(&self) -> Option<&SessionController<T>> {
        self.controller.as_ref()
    }

    pub fn suggested_prompts(&self) -> &[String] {
        &self.config.suggested_prompts
    }

    pub fn config(&self) -> &ConciergeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_client::Request;
    use concierge_client::Response;
    use concierge_client::TransportError;
    use pretty_assertions::assert_eq;

    #[derive(Clone)]
    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn execute(&self, _req: Request) -> Result<Response, TransportError> {
            Err(TransportError::Network("offline".to_string()))
        }
    }

    #[test]
    fn session_is_created_on_first_open_and_kept() {
        let mut panel = ChatPanel::new(Unreachable, ConciergeConfig::default());
        assert!(panel.controller().is_none());
        assert!(!panel.is_open());

        let first_id = panel.open().session_id().clone();
        panel.close();
        assert!(!panel.is_open());
        assert!(panel.controller().is_some());

        let second_id = panel.open().session_id().clone();
        assert_eq!(first_id, second_id);
        assert!(panel.is_open());
    }

    #[test]
    fn exposes_configured_suggestions() {
        let panel = ChatPanel::new(Unreachable, ConciergeConfig::default());
        assert_eq!(
            panel.suggested_prompts(),
            &[
                "What villa sizes do you offer?".to_string(),
                "What are the prices?".to_string(),
                "Tell me about amenities".to_string(),
                "How can I contact you?".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn failures_are_answered_with_connectivity_fallback() {
        let mut panel = ChatPanel::new(Unreachable, ConciergeConfig::default());
        let reply = panel.open().submit("Tell me about amenities").await.unwrap();
        assert_eq!(
            reply.content(),
            ConciergeConfig::default().fallback.connectivity
        );
    }
}
