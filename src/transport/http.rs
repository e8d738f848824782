use crate::config::HarnessConfig;
use async_trait::async_trait;
use contract_harness::{CapturedResponse, Method, Transport, TransportError, TransportRequest};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A [`Transport`] that talks to the live API over HTTPS.
///
/// Paths are resolved against `base_url/api_version`. Failed requests are never
/// retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_root: String,
    default_headers: BTreeMap<String, String>,
}

impl HttpTransport {
    pub fn new(config: &HarnessConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                TransportError::InvalidRequest(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            api_root: config.api_root(),
            default_headers: config.default_headers.clone(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// The absolute URL for a resource path.
    pub fn url_for(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        let raw = format!("{}/{}", self.api_root, path.trim_start_matches('/'));
        reqwest::Url::parse(&raw)
            .map_err(|e| TransportError::InvalidRequest(format!("Invalid URL `{raw}`: {e}")))
    }

    fn prepare(
        &self,
        request: &TransportRequest,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.client.request(reqwest_method(request.method), url);

        // Per-request headers win over the defaults.
        let mut headers = self.default_headers.clone();
        headers.extend(request.headers.clone());
        for (key, value) in &headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                TransportError::InvalidRequest(format!("Invalid header key `{key}`: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::InvalidRequest(format!("Invalid header value `{value}`: {e}"))
            })?;
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: TransportRequest) -> Result<CapturedResponse, TransportError> {
        let builder = self.prepare(&request)?;
        debug!(body = ?request.body, "Sending HTTP request");

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!(status, size_bytes = bytes.len(), "HTTP response received");

        let mut captured = CapturedResponse::new(status).with_body(decode_body(&bytes)?);
        for (name, value) in headers {
            captured = captured.with_header(name, value);
        }
        Ok(captured)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}

/// Response bodies must be UTF-8; anything else is a transport failure.
fn decode_body(bytes: &[u8]) -> Result<String, TransportError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| TransportError::Body(format!("Response body is not valid UTF-8: {e}")))
}

/// Repeated headers are joined with `, `.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<binary>");
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}
