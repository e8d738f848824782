//! # Generic Resource Client
//!
//! One client type serves every resource. Per-resource behaviour comes from the
//! [`ResourceConfig`] it was built with: the paths it targets and the operations it
//! allows. Requests for an operation outside the capability set fail up front with
//! [`ClientError::UnsupportedOperation`] before anything reaches the transport.
//!
//! Every request that reaches the transport replaces the contents of the client's
//! [`ResponseCapsule`]. A transport failure leaves the capsule empty, so a later read
//! reports "no response" instead of returning the previous response.

use crate::capsule::ResponseCapsule;
use crate::error::ClientError;
use crate::query::RequestBody;
use crate::resource::{Operation, ResourceConfig, ResourceName};
use crate::transport::{Method, RequestOptions, Transport, TransportRequest};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A request shape a client can issue.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestDescriptor {
    List,
    DetailById(String),
    QueryByBody(RequestBody),
    Options(String),
    Delete(String),
}

impl RequestDescriptor {
    pub fn operation(&self) -> Operation {
        match self {
            RequestDescriptor::List => Operation::List,
            RequestDescriptor::DetailById(_) => Operation::ById,
            RequestDescriptor::QueryByBody(_) => Operation::Query,
            RequestDescriptor::Options(_) => Operation::Options,
            RequestDescriptor::Delete(_) => Operation::Delete,
        }
    }
}

/// The client for one active resource.
pub struct ResourceClient {
    config: Arc<ResourceConfig>,
    transport: Arc<dyn Transport>,
    capsule: ResponseCapsule,
}

impl fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("config", &self.config)
            .field("capsule", &self.capsule)
            .finish_non_exhaustive()
    }
}

impl ResourceClient {
    pub fn new(config: Arc<ResourceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            capsule: ResponseCapsule::new(),
        }
    }

    pub fn name(&self) -> &ResourceName {
        &self.config.name
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn capsule(&self) -> &ResponseCapsule {
        &self.capsule
    }

    fn ensure_supported(&self, operation: Operation) -> Result<(), ClientError> {
        if self.config.supports(operation) {
            return Ok(());
        }
        warn!(resource = %self.config.name, %operation, "Operation not supported");
        Err(ClientError::UnsupportedOperation {
            resource: self.config.name.clone(),
            operation,
        })
    }

    /// GET the collection.
    pub async fn list(&mut self) -> Result<(), ClientError> {
        self.execute(RequestDescriptor::List).await
    }

    /// GET one item.
    pub async fn by_id(&mut self, id: &str) -> Result<(), ClientError> {
        self.execute(RequestDescriptor::DetailById(id.to_string()))
            .await
    }

    /// POST a `{ query, options }` body to the query endpoint.
    pub async fn query(&mut self, body: impl Into<RequestBody>) -> Result<(), ClientError> {
        self.execute(RequestDescriptor::QueryByBody(body.into()))
            .await
    }

    /// OPTIONS on `path`, or on the collection when `path` is empty.
    pub async fn options(&mut self, path: &str) -> Result<(), ClientError> {
        self.execute(RequestDescriptor::Options(path.to_string()))
            .await
    }

    /// DELETE one item.
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.execute(RequestDescriptor::Delete(id.to_string()))
            .await
    }

    /// Routes to [`list`](Self::list) without an id and to [`by_id`](Self::by_id) with one.
    pub async fn get(&mut self, id: Option<&str>) -> Result<(), ClientError> {
        match id {
            None => self.list().await,
            Some(id) => self.by_id(id).await,
        }
    }

    /// Issues any request shape.
    #[instrument(skip(self), fields(resource = %self.config.name))]
    pub async fn execute(&mut self, descriptor: RequestDescriptor) -> Result<(), ClientError> {
        self.ensure_supported(descriptor.operation())?;
        let request = self.build_request(descriptor)?;
        debug!(method = %request.method, path = %request.path, "Sending request");

        self.capsule.clear();
        let response = self.transport.send(request).await?;
        info!(status = response.status, "Response captured");
        self.capsule.store(response);
        Ok(())
    }

    fn build_request(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<TransportRequest, ClientError> {
        let request = match descriptor {
            RequestDescriptor::List => TransportRequest::new(Method::Get, self.config.list_path()),
            RequestDescriptor::DetailById(id) => {
                TransportRequest::new(Method::Get, self.config.item_path(&id))
            }
            RequestDescriptor::QueryByBody(body) => {
                let options = RequestOptions::new()
                    .header("content-type", "application/json")
                    .data(body.to_text()?);
                TransportRequest::new(Method::Post, self.config.query_path()).with_options(options)
            }
            RequestDescriptor::Options(path) => {
                let path = path.trim_matches('/');
                let path = if path.is_empty() {
                    self.config.list_path()
                } else {
                    path.to_string()
                };
                TransportRequest::new(Method::Options, path)
            }
            RequestDescriptor::Delete(id) => {
                TransportRequest::new(Method::Delete, self.config.item_path(&id))
            }
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CapsuleError, TransportError};
    use crate::mock::MockTransport;
    use crate::transport::CapturedResponse;
    use serde_json::json;

    fn launches(transport: &MockTransport) -> ResourceClient {
        let config = Arc::new(ResourceConfig::collection("Launches", "launches"));
        ResourceClient::new(config, Arc::new(transport.clone()))
    }

    #[tokio::test]
    async fn test_get_routes_on_id() {
        let mock = MockTransport::new();
        mock.expect_get("launches").return_json(200, json!([]));
        mock.expect_get("launches/5eb87cd9ffd86e000604b32a")
            .return_json(200, json!({"id": "5eb87cd9ffd86e000604b32a"}));

        let mut client = launches(&mock);
        client.get(None).await.unwrap();
        client.get(Some("5eb87cd9ffd86e000604b32a")).await.unwrap();

        let body = client.capsule().body_json().unwrap();
        assert_eq!(body["id"], "5eb87cd9ffd86e000604b32a");
        mock.verify();
    }

    #[tokio::test]
    async fn test_query_serializes_structured_body() {
        let mock = MockTransport::new();
        mock.expect_post("launches/query").return_json(200, json!({"docs": []}));

        let mut client = launches(&mock);
        client
            .query(json!({"query": {"success": true}}))
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"query":{"success":true}}"#));
        assert_eq!(
            requests[0].headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_unsupported_operation_never_reaches_transport() {
        let mock = MockTransport::new();
        let config = Arc::new(ResourceConfig::singleton("Company", "company"));
        let mut client = ResourceClient::new(config, Arc::new(mock.clone()));

        let err = client.query(json!({"query": {}})).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnsupportedOperation {
                operation: Operation::Query,
                ..
            }
        ));
        let err = client.by_id("5eb87cd9ffd86e000604b32a").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnsupportedOperation {
                operation: Operation::ById,
                ..
            }
        ));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_empties_capsule() {
        let mock = MockTransport::new();
        mock.expect_get("launches").return_json(200, json!([]));
        mock.expect_get("launches")
            .return_err(TransportError::Network("connection refused".into()));

        let mut client = launches(&mock);
        client.list().await.unwrap();
        assert_eq!(client.capsule().status().unwrap(), 200);

        let err = client.list().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::Network(_))));
        assert!(matches!(
            client.capsule().status(),
            Err(CapsuleError::NoResponse)
        ));
    }

    #[tokio::test]
    async fn test_options_defaults_to_collection_path() {
        let mock = MockTransport::new();
        mock.expect_options("launches")
            .return_ok(CapturedResponse::new(204).with_header("Allow", "GET,POST"));
        mock.expect_options("launches/latest")
            .return_ok(CapturedResponse::new(204));

        let mut client = launches(&mock);
        client.options("").await.unwrap();
        assert_eq!(client.capsule().header("allow").unwrap(), Some("GET,POST"));
        client.options("/launches/latest").await.unwrap();
        mock.verify();
    }
}
