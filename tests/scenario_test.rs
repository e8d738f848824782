use contract_harness::mock::MockTransport;
use contract_harness::{
    CapsuleError, ConditionError, ErrorKind, HarnessError, PaginationCheck, QueryBody,
};
use serde_json::{json, Value};
use spacex_api_contract::lifecycle::ContractSystem;
use std::sync::Arc;

/// Creates a system whose transport is a mock, plus the mock to program it.
fn setup() -> (MockTransport, ContractSystem) {
    let mock = MockTransport::new();
    let system = ContractSystem::with_transport(Arc::new(mock.clone()));
    (mock, system)
}

fn launch(flight_number: u64, success: Option<bool>) -> Value {
    json!({
        "id": format!("5eb87cd9ffd86e000604b3{:02x}", flight_number),
        "flight_number": flight_number,
        "name": format!("Mission {flight_number}"),
        "date_utc": "2020-01-07T02:19:00.000Z",
        "date_unix": 1578363540,
        "date_local": "2020-01-06T21:19:00-05:00",
        "date_precision": "hour",
        "static_fire_date_utc": null,
        "static_fire_date_unix": null,
        "net": false,
        "window": 0,
        "rocket": "5e9d0d95eda69973a809d1ec",
        "success": success,
        "failures": [],
        "upcoming": false,
        "details": null,
        "fairings": {"reused": true, "recovery_attempt": true, "recovered": false, "ships": []},
        "crew": [],
        "ships": [],
        "capsules": [],
        "payloads": ["5eb0e4d0b6c3bb0006eeb253"],
        "launchpad": "5e9e4501f509094ba4566f84",
        "cores": [{
            "core": "5e9e28a6f35918c0803b265c", "flight": 4, "gridfins": true, "legs": true,
            "reused": true, "landing_attempt": true, "landing_success": true,
            "landing_type": "ASDS", "landpad": "5e9e3032383ecb6bb234e7ca"
        }],
        "links": {
            "patch": {"small": "https://images2.imgbox.com/9a/96/nLppz9HW_o.png", "large": null},
            "reddit": {"campaign": null, "launch": null, "media": null, "recovery": null},
            "flickr": {"small": [], "original": []},
            "presskit": null,
            "webcast": "https://youtu.be/pIDuv0Ta0XQ",
            "youtube_id": "pIDuv0Ta0XQ",
            "article": null, "wikipedia": null
        },
        "auto_update": true,
        "tbd": false,
        "launch_library_id": null
    })
}

fn envelope(docs: Vec<Value>, total_docs: u64, limit: u64, page: u64) -> Value {
    let total_pages = total_docs.div_ceil(limit);
    let offset = (page - 1) * limit;
    json!({
        "docs": docs,
        "totalDocs": total_docs,
        "offset": offset,
        "limit": limit,
        "totalPages": total_pages,
        "page": page,
        "pagingCounter": offset + 1,
        "hasPrevPage": page > 1,
        "hasNextPage": page < total_pages,
        "prevPage": if page > 1 { json!(page - 1) } else { Value::Null },
        "nextPage": if page < total_pages { json!(page + 1) } else { Value::Null },
    })
}

/// A query filter on `success` reports every violating item by index.
#[tokio::test]
async fn test_query_filter_lists_violating_indices() {
    let (mock, system) = setup();
    let successes = [true, true, false, true, true, false, true, true, true, false];
    let docs = successes
        .iter()
        .enumerate()
        .map(|(i, s)| launch(i as u64 + 1, Some(*s)))
        .collect();
    mock.expect_post("launches/query")
        .return_json(200, envelope(docs, 10, 10, 1));

    let mut ctx = system.scenario();
    ctx.activate("Launches").unwrap();
    ctx.query(json!({"query": {"success": true}})).await.unwrap();

    ctx.assert_schema(None).unwrap();
    let report = ctx.evaluate_condition("success", "", "true").unwrap();
    assert!(!report.passed());
    assert_eq!(report.violating_indices(), vec![2, 5, 9]);

    let err = ctx.assert_query_filter().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("3 of 10 items violate `success` $eq true"));
    mock.verify();
}

/// Page 3 of 6 (105 docs, 20 per page) has a next page and starts at position 41.
#[tokio::test]
async fn test_envelope_arithmetic_on_middle_page() {
    let (mock, system) = setup();
    let docs = (41..=60).map(|n| launch(n, Some(true))).collect();
    mock.expect_post("launches/query")
        .return_json(200, envelope(docs, 105, 20, 3));

    let mut ctx = system.scenario();
    ctx.activate("launches").unwrap();
    ctx.query(QueryBody::new().limit(20).page(3)).await.unwrap();

    ctx.verify_pagination(PaginationCheck::HasNextPage).unwrap();
    ctx.verify_pagination(PaginationCheck::OffsetPosition { expected_first_position: 41 })
        .unwrap();
    ctx.verify_pagination(PaginationCheck::TotalPages).unwrap();
    ctx.verify_pagination(PaginationCheck::MaxDocs { limit: 20 }).unwrap();
    ctx.verify_pagination(PaginationCheck::HasPrevPage { expected_page: 3 }).unwrap();

    let body = ctx.body().unwrap();
    assert_eq!(body["offset"], 40);
    assert_eq!(body["totalPages"], 6);
}

/// A corrupted envelope fails with the field, the expected and the actual value.
#[tokio::test]
async fn test_envelope_mismatch_is_descriptive() {
    let (mock, system) = setup();
    let mut body = envelope(vec![launch(1, Some(true))], 105, 20, 6);
    body["hasNextPage"] = json!(true);
    mock.expect_post("launches/query").return_json(200, body);

    let mut ctx = system.scenario();
    ctx.activate("launches").unwrap();
    ctx.query(QueryBody::new().limit(20).page(6)).await.unwrap();

    let err = ctx.verify_pagination(PaginationCheck::HasNextPage).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation failed: hasNextPage: expected false, got true"
    );
}

/// Reading the body before any request is a precondition failure.
#[tokio::test]
async fn test_body_before_any_request() {
    let (mock, system) = setup();
    let mut ctx = system.scenario();
    ctx.activate("Rockets").unwrap();

    let err = ctx.body().unwrap_err();
    assert!(matches!(err, HarnessError::Capsule(CapsuleError::NoResponse)));
    assert!(err.to_string().to_lowercase().contains("no response available"));
    assert!(err.is_fatal());
    assert!(mock.requests().is_empty());
}

/// An operator outside the table is fatal, not a silent `false`.
#[tokio::test]
async fn test_between_is_unsupported() {
    let (mock, system) = setup();
    mock.expect_get("launches").return_json(200, json!([launch(5, Some(true))]));

    let mut ctx = system.scenario();
    ctx.activate("Launches").unwrap();
    ctx.get(None).await.unwrap();

    let err = ctx.evaluate_condition("flight_number", "$between", "10").unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Condition(ConditionError::UnsupportedOperator(ref op)) if op == "$between"
    ));
    assert!(err.to_string().to_lowercase().contains("unsupported operator"));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// A single item missing a required field names that field.
#[tokio::test]
async fn test_missing_required_field() {
    let (mock, system) = setup();
    let mut item = launch(1, Some(true));
    if let Some(map) = item.as_object_mut() {
        map.remove("rocket");
    }
    mock.expect_get("launches/5eb87cd9ffd86e000604b301")
        .return_json(200, item);

    let mut ctx = system.scenario();
    ctx.activate("Launches").unwrap();
    ctx.get(Some("5eb87cd9ffd86e000604b301")).await.unwrap();

    let outcome = ctx.validate(None).unwrap();
    assert!(!outcome.is_valid());
    assert!(outcome.diagnostics().unwrap_or_default().contains("rocket: Required"));
}

/// Only the second of two responses survives in the capsule.
#[tokio::test]
async fn test_capsule_keeps_latest_response_only() {
    let (mock, system) = setup();
    mock.expect_get("launches").return_json(200, json!([launch(1, Some(false))]));
    mock.expect_get("launches/5eb87cd9ffd86e000604b3ff")
        .return_text(404, "Not Found");

    let mut ctx = system.scenario();
    ctx.activate("Launches").unwrap();
    ctx.get(None).await.unwrap();
    ctx.get(Some("5eb87cd9ffd86e000604b3ff")).await.unwrap();

    ctx.assert_status(404).unwrap();
    assert_eq!(ctx.text().unwrap(), "Not Found");
    assert!(ctx.body().is_err());
}

/// Singletons refuse item-level operations before anything is sent.
#[tokio::test]
async fn test_company_is_a_singleton() {
    let (mock, system) = setup();
    let mut ctx = system.scenario();
    ctx.activate("Company").unwrap();

    let err = ctx.query(json!({"query": {}})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(
        err.to_string(),
        "Operation `query` is not supported for resource `Company`"
    );
    assert!(mock.requests().is_empty());
}

/// Delete is sent for collections and the refusal is observable.
#[tokio::test]
async fn test_anonymous_delete_is_refused_upstream() {
    let (mock, system) = setup();
    mock.expect_delete("capsules/5e9e2c5bf35918ed873b2664")
        .return_text(401, "Unauthorized");

    let mut ctx = system.scenario();
    ctx.activate("capsules").unwrap();
    ctx.delete("5e9e2c5bf35918ed873b2664").await.unwrap();
    ctx.assert_status(401).unwrap();
    mock.verify();
}

/// OPTIONS exposes the CORS headers of a collection.
#[tokio::test]
async fn test_options_exposes_cors_headers() {
    let (mock, system) = setup();
    mock.expect_options("starlink").return_ok(
        contract_harness::CapturedResponse::new(204)
            .with_header("Access-Control-Allow-Origin", "*")
            .with_header("Access-Control-Allow-Methods", "GET,HEAD,PUT,PATCH,POST,DELETE"),
    );

    let mut ctx = system.scenario();
    ctx.activate("Starlink").unwrap();
    ctx.options("").await.unwrap();
    ctx.assert_status(204).unwrap();
    ctx.assert_header("access-control-allow-origin", "*").unwrap();
    assert!(ctx
        .header("Access-Control-Allow-Methods")
        .unwrap()
        .is_some_and(|m| m.contains("POST")));
}

/// Scenarios from one system do not share state.
#[tokio::test]
async fn test_scenarios_are_isolated() {
    let (mock, system) = setup();
    mock.expect_get("ships").return_json(200, json!([]));

    let mut first = system.scenario();
    first.activate("Ships").unwrap();
    first.get(None).await.unwrap();

    let second = system.scenario();
    assert!(matches!(second.status(), Err(HarnessError::Context(_))));
    assert_eq!(first.status().unwrap(), 200);
}
