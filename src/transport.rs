use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use url::Url;

use crate::types::OdooResult;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivery of one serialized envelope to one endpoint.
///
/// Implementations surface network and HTTP-status failures as
/// [`crate::OdooError::Transport`] and never look inside the body; timeouts,
/// pooling and TLS are entirely their concern. The client takes any
/// implementation, which is also the seam test stubs plug into.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url` and return the raw response body.
    async fn post(&self, url: Url, body: Value) -> OdooResult<String>;
}

/// Default transport backed by a pooled `reqwest` client. The cookie store
/// carries the `session_id` cookie Odoo sets on authentication.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self { http })
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("odoo-web-client/0.1"));
        headers
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: Url, body: Value) -> OdooResult<String> {
        let resp = self
            .http
            .post(url)
            .headers(Self::headers())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.text().await?)
    }
}
