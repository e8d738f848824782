//! # Pagination Verifier
//!
//! Pure checks over the paging metadata of an [`Envelope`]. Each check is a
//! predicate returning a [`PaginationMismatch`] that names the field and embeds the
//! actual and expected values. Any single inequality fails the check.
//!
//! The laws enforced, for any valid envelope:
//!
//! - `totalPages == ceil(totalDocs / limit)`
//! - `docs.len() <= limit`
//! - `hasNextPage == (page < totalPages)`
//! - `hasPrevPage == (page > 1)`
//! - `offset == (page - 1) * limit`, so the first item sits at position `offset + 1`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};

/// A paginated response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub docs: Vec<Value>,
    pub total_docs: u64,
    pub offset: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub page: u64,
    #[serde(default)]
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    #[serde(default)]
    pub prev_page: Option<u64>,
    #[serde(default)]
    pub next_page: Option<u64>,
}

impl Envelope {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// A failed pagination check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: expected {expected}, got {actual}")]
pub struct PaginationMismatch {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl PaginationMismatch {
    fn new(field: &'static str, expected: impl Display, actual: impl Display) -> Self {
        Self {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

fn expect_eq<T: PartialEq + Display>(
    field: &'static str,
    expected: T,
    actual: T,
) -> Result<(), PaginationMismatch> {
    if expected == actual {
        Ok(())
    } else {
        Err(PaginationMismatch::new(field, expected, actual))
    }
}

/// `totalPages == ceil(totalDocs / limit)`.
pub fn check_total_pages(env: &Envelope) -> Result<(), PaginationMismatch> {
    if env.limit == 0 {
        return Err(PaginationMismatch::new("limit", "a positive limit", env.limit));
    }
    expect_eq(
        "totalPages",
        env.total_docs.div_ceil(env.limit),
        env.total_pages,
    )
}

/// `limit` echoes the requested limit and `docs` holds no more than it.
pub fn check_max_docs(env: &Envelope, limit: u64) -> Result<(), PaginationMismatch> {
    expect_eq("limit", limit, env.limit)?;
    let count = env.docs.len() as u64;
    if count > limit {
        return Err(PaginationMismatch::new(
            "docs.length",
            format!("at most {limit}"),
            count,
        ));
    }
    Ok(())
}

/// The first item of the page sits at `expected_first_position` (1-based).
pub fn check_offset_position(
    env: &Envelope,
    expected_first_position: u64,
) -> Result<(), PaginationMismatch> {
    match env.offset.checked_add(1) {
        Some(position) => expect_eq("offset + 1", expected_first_position, position),
        None => Err(PaginationMismatch::new(
            "offset + 1",
            expected_first_position,
            format!("overflow (offset {})", env.offset),
        )),
    }
}

/// `offset == (page - 1) * limit`.
pub fn check_offset_matches_page(env: &Envelope) -> Result<(), PaginationMismatch> {
    match env.page.saturating_sub(1).checked_mul(env.limit) {
        Some(expected) => expect_eq("offset", expected, env.offset),
        None => Err(PaginationMismatch::new(
            "offset",
            format!("(page - 1) * limit, which overflows for page {}", env.page),
            env.offset,
        )),
    }
}

/// `hasNextPage == (page < totalPages)`.
pub fn check_has_next_page(env: &Envelope) -> Result<(), PaginationMismatch> {
    expect_eq(
        "hasNextPage",
        env.page < env.total_pages,
        env.has_next_page,
    )
}

/// The envelope is on `expected_page`, and `hasPrevPage` is `false` on page 1 and
/// `true` after it.
pub fn check_has_prev_page(env: &Envelope, expected_page: u64) -> Result<(), PaginationMismatch> {
    expect_eq("page", expected_page, env.page)?;
    expect_eq("hasPrevPage", env.page > 1, env.has_prev_page)
}

/// One of the pagination checks, with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationCheck {
    TotalPages,
    MaxDocs { limit: u64 },
    OffsetPosition { expected_first_position: u64 },
    OffsetMatchesPage,
    HasNextPage,
    HasPrevPage { expected_page: u64 },
}

impl PaginationCheck {
    pub fn run(&self, env: &Envelope) -> Result<(), PaginationMismatch> {
        match *self {
            PaginationCheck::TotalPages => check_total_pages(env),
            PaginationCheck::MaxDocs { limit } => check_max_docs(env, limit),
            PaginationCheck::OffsetPosition {
                expected_first_position,
            } => check_offset_position(env, expected_first_position),
            PaginationCheck::OffsetMatchesPage => check_offset_matches_page(env),
            PaginationCheck::HasNextPage => check_has_next_page(env),
            PaginationCheck::HasPrevPage { expected_page } => {
                check_has_prev_page(env, expected_page)
            }
        }
    }
}

impl Display for PaginationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationCheck::TotalPages => f.write_str("total pages"),
            PaginationCheck::MaxDocs { limit } => write!(f, "at most {limit} docs"),
            PaginationCheck::OffsetPosition {
                expected_first_position,
            } => write!(f, "first item at position {expected_first_position}"),
            PaginationCheck::OffsetMatchesPage => f.write_str("offset matches page"),
            PaginationCheck::HasNextPage => f.write_str("hasNextPage"),
            PaginationCheck::HasPrevPage { expected_page } => {
                write!(f, "hasPrevPage on page {expected_page}")
            }
        }
    }
}

/// Runs every law that needs no caller-supplied argument.
pub fn check_envelope(env: &Envelope) -> Result<(), PaginationMismatch> {
    check_total_pages(env)?;
    check_max_docs(env, env.limit)?;
    check_offset_matches_page(env)?;
    check_has_next_page(env)?;
    check_has_prev_page(env, env.page)
}
