use concierge_client::Request;
use http::HeaderMap;
use http::Method;

pub(crate) const CHAT_PATH: &str = "chat";

/// Where outgoing dispatches go.
#[derive(Debug, Clone)]
pub struct ChatEndpoint {
    pub base_url: String,
    pub headers: HeaderMap,
}

impl ChatEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn url_for_path(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn chat_url(&self) -> String {
        self.url_for_path(CHAT_PATH)
    }

    pub(crate) fn build_request(&self, method: Method, path: &str) -> Request {
        let mut req = Request::new(method, self.url_for_path(path));
        req.headers = self.headers.clone();
        req
    }
}
