//! # SpaceX API Contract Tests
//!
//! A smoke run against the live API. It demonstrates:
//! 1.  Setting up the [`ContractSystem`] from the environment.
//! 2.  Listing the company document and validating it.
//! 3.  Querying launches with paging options, then checking the filter, the sort
//!     order and the envelope arithmetic.
//! 4.  Probing an operation a singleton does not offer.

use contract_harness::{HarnessError, PaginationCheck, QueryBody, SortOrder};
use serde_json::json;
use spacex_api_contract::lifecycle::tracing::setup_tracing;
use spacex_api_contract::lifecycle::ContractSystem;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let system = ContractSystem::from_env().map_err(|e| e.to_string())?;
    info!(?system, "Starting smoke scenarios");

    let mut failures = 0;

    let span = tracing::info_span!("company");
    let result = async {
        let mut ctx = system.scenario();
        ctx.activate("Company")?;
        ctx.get(None).await?;
        ctx.assert_status(200)?;
        ctx.assert_schema(None)?;

        // Singletons have no items to fetch by id.
        match ctx.get(Some("5eb75edc42fea42237d7f3ed")).await {
            Err(e) if e.kind() == contract_harness::ErrorKind::UnsupportedOperation => Ok(()),
            Err(e) => Err(e),
            Ok(()) => Err(HarnessError::Validation(
                "Company accepted a by-id request".to_string(),
            )),
        }
    }
    .instrument(span)
    .await;
    failures += report("company", result);

    let span = tracing::info_span!("launches");
    let result = async {
        let mut ctx = system.scenario();
        ctx.activate("Launches")?;
        let body = QueryBody::new()
            .filter("upcoming", json!(false))
            .filter("date_utc", json!({"$gte": "2020-01-01T00:00:00.000Z"}))
            .sort("flight_number", "asc")
            .limit(20)
            .page(2);
        ctx.query(body).await?;
        ctx.assert_status(200)?;
        ctx.assert_schema(None)?;
        ctx.assert_query_filter()?;
        ctx.assert_sorted("flight_number", SortOrder::Ascending)?;
        for check in [
            PaginationCheck::TotalPages,
            PaginationCheck::MaxDocs { limit: 20 },
            PaginationCheck::OffsetPosition { expected_first_position: 21 },
            PaginationCheck::HasNextPage,
            PaginationCheck::HasPrevPage { expected_page: 2 },
        ] {
            ctx.verify_pagination(check)?;
        }
        Ok::<_, HarnessError>(())
    }
    .instrument(span)
    .await;
    failures += report("launches", result);

    if failures > 0 {
        return Err(format!("{failures} scenario(s) failed"));
    }
    info!("All scenarios passed");
    Ok(())
}

fn report(name: &str, result: Result<(), HarnessError>) -> usize {
    match result {
        Ok(()) => {
            info!(scenario = name, "Scenario passed");
            0
        }
        Err(e) => {
            error!(scenario = name, kind = ?e.kind(), error = %e, "Scenario failed");
            1
        }
    }
}
