//! # Scenario Context
//!
//! The state a scenario threads through its steps: the registries, the transport,
//! the one active [`ResourceClient`], and the last query body sent on it. Nothing
//! here is global; each scenario owns its own context and steps run one after the
//! other.
//!
//! ## Step families
//!
//! - **Requests**: [`activate`](ScenarioContext::activate), [`get`](ScenarioContext::get),
//!   [`query`](ScenarioContext::query), [`options`](ScenarioContext::options),
//!   [`delete`](ScenarioContext::delete).
//! - **Reads**: [`status`](ScenarioContext::status), [`body`](ScenarioContext::body),
//!   [`text`](ScenarioContext::text), [`header`](ScenarioContext::header).
//! - **Checks**: `validate`, `evaluate_condition`, `verify_pagination` return the
//!   outcome as a value. Their `assert_*` counterparts turn a failed outcome into
//!   [`HarnessError::Validation`] carrying the diagnostic.
//!
//! Activating a new resource replaces the client, and with it the capsule and the
//! recorded query.

use crate::client::ResourceClient;
use crate::condition::{conditions_from_query, Condition, ConditionReport};
use crate::error::{ContextError, HarnessError};
use crate::pagination::{Envelope, PaginationCheck, PaginationMismatch};
use crate::query::{QueryBody, RequestBody};
use crate::registry::ClientRegistry;
use crate::result_set::{check_selected_fields, check_sorted, items, SortOrder};
use crate::schema::{SchemaRegistry, ValidationOutcome};
use crate::transport::Transport;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ScenarioContext {
    registry: Arc<ClientRegistry>,
    schemas: Arc<SchemaRegistry>,
    transport: Arc<dyn Transport>,
    active: Option<ResourceClient>,
    last_query: Option<QueryBody>,
}

impl std::fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("active", &self.active.as_ref().map(|c| c.name()))
            .field("last_query", &self.last_query)
            .finish_non_exhaustive()
    }
}

impl ScenarioContext {
    pub fn new(
        registry: Arc<ClientRegistry>,
        schemas: Arc<SchemaRegistry>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            registry,
            schemas,
            transport,
            active: None,
            last_query: None,
        }
    }

    // ---- Requests ----

    /// Makes `name` the active resource, discarding the previous client.
    pub fn activate(&mut self, name: &str) -> Result<&mut ResourceClient, HarnessError> {
        let client = self.registry.activate(name, Arc::clone(&self.transport))?;
        info!(resource = %client.name(), "Resource activated");
        self.last_query = None;
        Ok(self.active.insert(client))
    }

    pub fn client(&self) -> Result<&ResourceClient, HarnessError> {
        self.active
            .as_ref()
            .ok_or_else(|| ContextError::NoActiveResource.into())
    }

    pub fn client_mut(&mut self) -> Result<&mut ResourceClient, HarnessError> {
        self.active
            .as_mut()
            .ok_or_else(|| ContextError::NoActiveResource.into())
    }

    /// Lists the active resource, or fetches one item when `id` is given.
    pub async fn get(&mut self, id: Option<&str>) -> Result<(), HarnessError> {
        self.client_mut()?.get(id).await?;
        Ok(())
    }

    /// Sends a query and records it when it is a well-formed `{ query, options }` body.
    pub async fn query(&mut self, body: impl Into<RequestBody>) -> Result<(), HarnessError> {
        let body = body.into();
        let recorded = body.as_query();
        self.client_mut()?.query(body).await?;
        self.last_query = recorded;
        Ok(())
    }

    pub async fn options(&mut self, path: &str) -> Result<(), HarnessError> {
        self.client_mut()?.options(path).await?;
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), HarnessError> {
        self.client_mut()?.delete(id).await?;
        Ok(())
    }

    /// The last query body sent on the active resource.
    pub fn last_query(&self) -> Result<&QueryBody, HarnessError> {
        self.last_query
            .as_ref()
            .ok_or_else(|| ContextError::NoQuery.into())
    }

    // ---- Reads ----

    pub fn status(&self) -> Result<u16, HarnessError> {
        Ok(self.client()?.capsule().status()?)
    }

    pub fn body(&self) -> Result<Value, HarnessError> {
        Ok(self.client()?.capsule().body_json()?)
    }

    pub fn text(&self) -> Result<&str, HarnessError> {
        Ok(self.client()?.capsule().body_text()?)
    }

    pub fn header(&self, name: &str) -> Result<Option<&str>, HarnessError> {
        Ok(self.client()?.capsule().header(name)?)
    }

    // ---- Checks ----

    /// Validates the captured body against `schema_ref`, or against the active
    /// resource's own schema when `None`.
    pub fn validate(&self, schema_ref: Option<&str>) -> Result<ValidationOutcome, HarnessError> {
        let client = self.client()?;
        let schema_ref = schema_ref.unwrap_or(&client.config().schema_ref);
        let body = client.capsule().body_json()?;
        let outcome = self.schemas.validate(schema_ref, &body)?;
        match outcome.diagnostics() {
            None => debug!(schema = schema_ref, "Body matches schema"),
            Some(diagnostics) => warn!(schema = schema_ref, %diagnostics, "Schema mismatch"),
        }
        Ok(outcome)
    }

    pub fn assert_schema(&self, schema_ref: Option<&str>) -> Result<(), HarnessError> {
        match self.validate(schema_ref)? {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid { diagnostics, .. } => {
                Err(HarnessError::Validation(diagnostics))
            }
        }
    }

    /// Evaluates `field <operator> expected` over every item of the captured body.
    ///
    /// `expected` is a test-data literal and is coerced first (`"true"` is a boolean).
    pub fn evaluate_condition(
        &self,
        field: &str,
        operator: &str,
        expected: &str,
    ) -> Result<ConditionReport, HarnessError> {
        let condition = Condition::parse(field, operator, expected)?;
        self.evaluate(&condition)
    }

    pub fn evaluate(&self, condition: &Condition) -> Result<ConditionReport, HarnessError> {
        let body = self.body()?;
        let report = condition.evaluate_result_set(&body)?;
        if !report.passed() {
            warn!(%report, "Condition failed");
        }
        Ok(report)
    }

    pub fn assert_condition(
        &self,
        field: &str,
        operator: &str,
        expected: &str,
    ) -> Result<(), HarnessError> {
        let report = self.evaluate_condition(field, operator, expected)?;
        if report.passed() {
            Ok(())
        } else {
            Err(HarnessError::Validation(report.to_string()))
        }
    }

    /// Checks that every returned item satisfies the filter of the last query.
    pub fn assert_query_filter(&self) -> Result<(), HarnessError> {
        let conditions = conditions_from_query(&self.last_query()?.query)?;
        let failures: Vec<String> = conditions
            .iter()
            .map(|condition| self.evaluate(condition))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|report| !report.passed())
            .map(|report| report.to_string())
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::Validation(failures.join("\n")))
        }
    }

    /// Runs one pagination check against the captured envelope.
    pub fn verify_pagination(&self, check: PaginationCheck) -> Result<(), HarnessError> {
        let body = self.body()?;
        let envelope = Envelope::from_value(&body).map_err(|e| {
            HarnessError::Validation(format!("Body is not a paginated envelope: {e}"))
        })?;
        check.run(&envelope).map_err(|mismatch: PaginationMismatch| {
            warn!(%check, %mismatch, "Pagination check failed");
            HarnessError::Validation(mismatch.to_string())
        })
    }

    pub fn assert_status(&self, expected: u16) -> Result<(), HarnessError> {
        let status = self.status()?;
        if status == expected {
            return Ok(());
        }
        warn!(expected, actual = status, "Unexpected status");
        Err(HarnessError::Validation(format!(
            "status: expected {expected}, got {status}"
        )))
    }

    /// Checks a response header, ignoring the case of its name.
    pub fn assert_header(&self, name: &str, expected: &str) -> Result<(), HarnessError> {
        match self.header(name)? {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(HarnessError::Validation(format!(
                "header `{name}`: expected {expected:?}, got {actual:?}"
            ))),
            None => Err(HarnessError::Validation(format!(
                "header `{name}`: expected {expected:?}, but it is missing"
            ))),
        }
    }

    /// Checks that the returned items are ordered by `field`.
    pub fn assert_sorted(&self, field: &str, order: SortOrder) -> Result<(), HarnessError> {
        let body = self.body()?;
        check_sorted(items(&body)?, field, order)
            .map_err(|mismatch| HarnessError::Validation(mismatch.to_string()))
    }

    /// Checks that the returned items only carry the fields selected by the last query.
    pub fn assert_selected(&self) -> Result<(), HarnessError> {
        let fields = self.last_query()?.options.selected_fields();
        let body = self.body()?;
        check_selected_fields(items(&body)?, &fields)
            .map_err(|mismatch| HarnessError::Validation(mismatch.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CapsuleError, ErrorKind};
    use crate::mock::MockTransport;
    use crate::resource::ResourceConfig;
    use crate::schema::Shape;
    use serde_json::json;

    fn context(mock: &MockTransport) -> ScenarioContext {
        let registry = ClientRegistry::new()
            .with(ResourceConfig::collection("Launches", "launches"))
            .with(ResourceConfig::singleton("Company", "company"));
        let schemas = SchemaRegistry::new()
            .with(
                "launches",
                Shape::object([
                    ("name", Shape::string()),
                    ("success", Shape::boolean().nullable()),
                ]),
            )
            .with("company", Shape::object([("name", Shape::string())]));
        ScenarioContext::new(Arc::new(registry), Arc::new(schemas), Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_steps_before_activation_are_preconditions() {
        let mock = MockTransport::new();
        let mut ctx = context(&mock);
        let err = ctx.get(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(err.to_string().starts_with("Not initialized"));
    }

    #[tokio::test]
    async fn test_body_before_request_is_no_response() {
        let mock = MockTransport::new();
        let mut ctx = context(&mock);
        ctx.activate("launches").unwrap();
        let err = ctx.body().unwrap_err();
        assert!(matches!(err, HarnessError::Capsule(CapsuleError::NoResponse)));
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let mock = MockTransport::new();
        let mut ctx = context(&mock);
        let err = ctx.activate("Moons").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_query_filter_reports_violators() {
        let mock = MockTransport::new();
        mock.expect_post("launches/query").return_json(
            200,
            json!({"docs": [
                {"name": "FalconSat", "success": false},
                {"name": "DemoSat", "success": true}
            ]}),
        );
        let mut ctx = context(&mock);
        ctx.activate("Launches").unwrap();

        assert!(matches!(
            ctx.assert_query_filter(),
            Err(HarnessError::Context(ContextError::NoQuery))
        ));

        ctx.query(json!({"query": {"success": true}})).await.unwrap();
        let err = ctx.assert_query_filter().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Validation failed: 1 of 2 items violate `success` $eq true: [0] = false"
        );
    }

    #[tokio::test]
    async fn test_activation_resets_query() {
        let mock = MockTransport::new();
        mock.expect_post("launches/query").return_json(200, json!({"docs": []}));
        let mut ctx = context(&mock);
        ctx.activate("launches").unwrap();
        ctx.query(json!({"query": {}})).await.unwrap();
        assert!(ctx.last_query().is_ok());

        ctx.activate("company").unwrap();
        assert!(ctx.last_query().is_err());
        assert!(ctx.status().is_err());
    }

    #[tokio::test]
    async fn test_schema_uses_active_resource_by_default() {
        let mock = MockTransport::new();
        mock.expect_get("company").return_json(200, json!({"founder": "Elon Musk"}));
        let mut ctx = context(&mock);
        ctx.activate("company").unwrap();
        ctx.get(None).await.unwrap();

        let outcome = ctx.validate(None).unwrap();
        assert_eq!(outcome.diagnostics(), Some("name: Required"));
        let err = ctx.assert_schema(None).unwrap_err();
        assert!(matches!(err, HarnessError::Validation(ref d) if d == "name: Required"));

        let err = ctx.validate(Some("moons")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_status_and_header_assertions() {
        let mock = MockTransport::new();
        mock.expect_options("launches").return_ok(
            crate::transport::CapturedResponse::new(204)
                .with_header("Access-Control-Allow-Origin", "*"),
        );
        let mut ctx = context(&mock);
        ctx.activate("launches").unwrap();
        ctx.options("").await.unwrap();

        ctx.assert_status(204).unwrap();
        ctx.assert_header("access-control-allow-origin", "*").unwrap();
        assert!(ctx.assert_status(200).is_err());
        assert!(ctx.assert_header("allow", "GET").is_err());
    }
}
