//! # Response Capsule
//!
//! A single-slot holder for the most recent response of a client. Every request
//! overwrites the slot; nothing is queued or appended, so after two requests only
//! the second response can be read.

use crate::error::CapsuleError;
use crate::transport::CapturedResponse;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ResponseCapsule {
    slot: Option<CapturedResponse>,
}

impl ResponseCapsule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever the capsule held.
    pub fn store(&mut self, response: CapturedResponse) {
        self.slot = Some(response);
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn response(&self) -> Result<&CapturedResponse, CapsuleError> {
        self.slot.as_ref().ok_or(CapsuleError::NoResponse)
    }

    pub fn status(&self) -> Result<u16, CapsuleError> {
        Ok(self.response()?.status)
    }

    pub fn body_text(&self) -> Result<&str, CapsuleError> {
        Ok(&self.response()?.body)
    }

    /// Parses the body as JSON.
    ///
    /// An empty (or whitespace-only) body and an unparsable body are reported as
    /// different errors; neither yields `null`.
    pub fn body_json(&self) -> Result<Value, CapsuleError> {
        let response = self.response()?;
        if response.body.trim().is_empty() {
            return Err(CapsuleError::EmptyBody {
                status: response.status,
            });
        }
        serde_json::from_str(&response.body).map_err(|source| CapsuleError::InvalidJson {
            status: response.status,
            source,
        })
    }

    pub fn raw_headers(&self) -> Result<&BTreeMap<String, String>, CapsuleError> {
        Ok(&self.response()?.headers)
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Result<Option<&str>, CapsuleError> {
        Ok(self
            .raw_headers()?
            .get(&name.to_ascii_lowercase())
            .map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_capsule_reports_no_response() {
        let capsule = ResponseCapsule::new();
        assert!(matches!(capsule.status(), Err(CapsuleError::NoResponse)));
        assert!(matches!(capsule.body_json(), Err(CapsuleError::NoResponse)));
        assert!(matches!(capsule.body_text(), Err(CapsuleError::NoResponse)));
        assert!(matches!(capsule.raw_headers(), Err(CapsuleError::NoResponse)));
    }

    #[test]
    fn test_store_overwrites() {
        let mut capsule = ResponseCapsule::new();
        capsule.store(CapturedResponse::json(200, &json!({"name": "first"})));
        capsule.store(CapturedResponse::json(404, &json!({"name": "second"})));

        assert_eq!(capsule.status().unwrap(), 404);
        assert_eq!(capsule.body_json().unwrap()["name"], "second");
    }

    #[test]
    fn test_empty_body_is_distinct_from_invalid_body() {
        let mut capsule = ResponseCapsule::new();
        capsule.store(CapturedResponse::new(200).with_body("  "));
        assert!(matches!(
            capsule.body_json(),
            Err(CapsuleError::EmptyBody { status: 200 })
        ));

        capsule.store(CapturedResponse::new(200).with_body("Not Found"));
        assert!(matches!(
            capsule.body_json(),
            Err(CapsuleError::InvalidJson { status: 200, .. })
        ));
        assert_eq!(capsule.body_text().unwrap(), "Not Found");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut capsule = ResponseCapsule::new();
        capsule.store(CapturedResponse::new(204).with_header("Access-Control-Allow-Origin", "*"));
        assert_eq!(
            capsule.header("access-control-allow-origin").unwrap(),
            Some("*")
        );
        assert_eq!(capsule.header("Allow").unwrap(), None);
    }
}
