//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use powerplan_lib::DispatchEntry;

/// Wrapper for successful responses with content type metadata.
///
/// # Example
///
/// ```
/// use powerplan_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Totals {
///     load: f64,
///     units: usize,
/// }
///
/// let response = ServiceResponse::new(Totals { load: 480.0, units: 6 });
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a `POST /api/v1/merit-order` response.
#[derive(Debug, Clone, Serialize)]
pub struct MeritOrderResponse {
    /// Load from the request, in MW.
    pub load: f64,
    /// Sum of effective maxima over all units, in MW.
    pub available_capacity: f64,
    /// Units cheapest first.
    pub merit_order: Vec<DispatchEntry>,
}

impl MeritOrderResponse {
    pub fn new(load: f64, merit_order: Vec<DispatchEntry>) -> Self {
        Self {
            load,
            available_capacity: merit_order.iter().map(|e| e.max).sum(),
            merit_order,
        }
    }
}
