//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Every failed request is answered with a `application/problem+json` body.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use powerplan_lib::{Error as LibError, ErrorKind};

/// Problem type URI for malformed or out-of-range requests.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for loads above the fleet's available capacity.
pub const PROBLEM_INSUFFICIENT_CAPACITY: &str = "/problems/insufficient-capacity";

/// Problem type URI for forced minimum output that cannot be trimmed to the load.
pub const PROBLEM_EXCESS_MINIMUM_OUTPUT: &str = "/problems/excess-minimum-output";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use powerplan_service_shared::{ProblemDetails, PROBLEM_INSUFFICIENT_CAPACITY};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_INSUFFICIENT_CAPACITY,
///     "Insufficient Capacity",
///     StatusCode::UNPROCESSABLE_ENTITY,
/// )
/// .with_detail("load of 1000 MW exceeds total available capacity of 800 MW")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for payloads that fail parsing or validation.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 422 when every unit at maximum still falls short of the load.
    pub fn insufficient_capacity(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INSUFFICIENT_CAPACITY,
            "Insufficient Capacity",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 422 when minimum output forced by the dispatch cannot be absorbed.
    pub fn excess_minimum_output(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_EXCESS_MINIMUM_OUTPUT,
            "Excess Minimum Output",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 500 for anything the caller could not have prevented.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.title, detail),
            None => f.write_str(&self.title),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Convert library errors to ProblemDetails by error kind.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    let detail = error.to_string();
    match error.kind() {
        ErrorKind::Validation => ProblemDetails::bad_request(detail, request_id),
        ErrorKind::InfeasibleLowCapacity => {
            ProblemDetails::insufficient_capacity(detail, request_id)
        }
        ErrorKind::InfeasibleHighMinimum => {
            ProblemDetails::excess_minimum_output(detail, request_id)
        }
        ErrorKind::Io => ProblemDetails::internal_error(detail, request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_INSUFFICIENT_CAPACITY,
            "Insufficient Capacity",
            StatusCode::UNPROCESSABLE_ENTITY,
        );
        assert_eq!(problem.type_uri, PROBLEM_INSUFFICIENT_CAPACITY);
        assert_eq!(problem.status, 422);
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_into_response_sets_problem_content_type() {
        let response = ProblemDetails::internal_error("boom", "req-1").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }

    #[test]
    fn test_from_lib_error_low_capacity() {
        let error = LibError::InfeasibleLowCapacity {
            load: 1000.0,
            capacity: 800.0,
        };
        let problem = from_lib_error(&error, "req-cap");

        assert_eq!(problem.type_uri, PROBLEM_INSUFFICIENT_CAPACITY);
        assert_eq!(problem.status, 422);
        assert!(problem.detail.as_deref().unwrap().contains("800"));
        assert_eq!(problem.instance.as_deref(), Some("req-cap"));
    }

    #[test]
    fn test_from_lib_error_high_minimum() {
        let error = LibError::InfeasibleHighMinimum {
            load: 50.0,
            excess: 50.0,
        };
        let problem = from_lib_error(&error, "req-min");
        assert_eq!(problem.type_uri, PROBLEM_EXCESS_MINIMUM_OUTPUT);
        assert_eq!(problem.status, 422);
    }

    #[test]
    fn test_from_lib_error_validation() {
        let error = LibError::DuplicateUnitName {
            name: "gas1".to_string(),
        };
        let problem = from_lib_error(&error, "req-dup");
        assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
        assert_eq!(problem.status, 400);
    }
}
