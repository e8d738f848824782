//! # Transport Abstraction
//!
//! The harness never speaks HTTP itself. A [`Transport`] is injected into every
//! [`ResourceClient`](crate::client::ResourceClient) and turns a [`TransportRequest`]
//! into a [`CapturedResponse`]. Timeouts and connection handling belong to the
//! transport; the harness performs no retries.
//!
//! Implementors only write [`Transport::send`]. The `get`, `post`, `options` and
//! `delete` helpers are provided on top of it.

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// HTTP methods used by resource clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Options,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Options => "OPTIONS",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headers and payload attached to a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    pub data: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// A request handed to the transport. `path` is relative to the transport root.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl TransportRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.headers.extend(options.headers);
        self.body = options.data;
        self
    }
}

/// A response as captured from the transport.
///
/// Header names are stored lowercased.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl CapturedResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// A response carrying `body` serialized as JSON.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(body.to_string())
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A request-capable client the harness delegates to.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the captured response.
    async fn send(&self, request: TransportRequest) -> Result<CapturedResponse, TransportError>;

    async fn get(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<CapturedResponse, TransportError> {
        self.send(TransportRequest::new(Method::Get, path).with_options(options))
            .await
    }

    async fn post(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<CapturedResponse, TransportError> {
        self.send(TransportRequest::new(Method::Post, path).with_options(options))
            .await
    }

    async fn options(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<CapturedResponse, TransportError> {
        self.send(TransportRequest::new(Method::Options, path).with_options(options))
            .await
    }

    async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<CapturedResponse, TransportError> {
        self.send(TransportRequest::new(Method::Delete, path).with_options(options))
            .await
    }
}
