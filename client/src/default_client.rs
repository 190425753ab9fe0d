use crate::error::TransportError;
use reqwest::IntoUrl;
use reqwest::Method;
use reqwest::Response;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use serde::Serialize;
use std::time::Duration;

/// Builds the `reqwest::Client` shared by every dispatch of a process.
pub fn build_reqwest_client(user_agent: &str) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|err| TransportError::Build(err.to_string()))
}

/// `reqwest::Client` that logs every completed or failed request at debug
/// level, tagged with the backend's `x-request-id` when present.
#[derive(Clone, Debug)]
pub struct ConciergeHttpClient {
    inner: reqwest::Client,
}

impl ConciergeHttpClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    pub fn request<U>(&self, method: Method, url: U) -> ConciergeRequestBuilder
    where
        U: IntoUrl,
    {
        let url_str = url.as_str().to_string();
        ConciergeRequestBuilder::new(self.inner.request(method.clone(), url), method, url_str)
    }
}

#[must_use = "requests are not sent unless `send` is awaited"]
#[derive(Debug)]
pub struct ConciergeRequestBuilder {
    builder: reqwest::RequestBuilder,
    method: Method,
    url: String,
}

impl ConciergeRequestBuilder {
    fn new(builder: reqwest::RequestBuilder, method: Method, url: String) -> Self {
        Self {
            builder,
            method,
            url,
        }
    }

    fn map(self, f: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder) -> Self {
        Self {
            builder: f(self.builder),
            method: self.method,
            url: self.url,
        }
    }

    pub fn headers(self, headers: HeaderMap) -> Self {
        self.map(|builder| builder.headers(headers))
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.map(|builder| builder.timeout(timeout))
    }

    pub fn json<T>(self, value: &T) -> Self
    where
        T: ?Sized + Serialize,
    {
        self.map(|builder| builder.json(value))
    }

    pub async fn send(self) -> Result<Response, reqwest::Error> {
        match self.builder.send().await {
            Ok(response) => {
                tracing::debug!(
                    method = %self.method,
                    url = %self.url,
                    status = %response.status(),
                    request_id = ?Self::extract_request_id(&response),
                    "chat backend request completed"
                );

                Ok(response)
            }
            Err(error) => {
                let status = error.status();
                tracing::debug!(
                    method = %self.method,
                    url = %self.url,
                    status = status.map(|s| s.as_u16()),
                    error = %error,
                    "chat backend request failed"
                );
                Err(error)
            }
        }
    }

    fn extract_request_id(response: &Response) -> Option<String> {
        let value = response
            .headers()
            .get(HeaderName::from_static("x-request-id"))?;
        value.to_str().ok().map(str::to_owned)
    }
}
