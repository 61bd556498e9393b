use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use powerplan_lib::{rank_units, run_dispatch, PlanEntry, PlanRequest};
use powerplan_service_shared::{
    from_lib_error, record_overshoot_corrected, record_plan_calculated, record_plan_failed,
    record_units_dispatched, AppState, MeritOrderResponse, ProblemDetails, ProductionPlanRequest,
    RequestId, ServiceResponse,
};

const VALIDATION_FAILURE: &str = "validation_error";

/// Handle `POST /productionplan`.
///
/// Responds with `[{"name": ..., "p": ...}, ...]` in merit order.
pub async fn production_plan(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<Json<Vec<PlanEntry>>, ProblemDetails> {
    let request = parse_request(&state, &request_id, payload)?;

    info!(
        request_id = %request_id,
        load = request.load,
        units = request.units.len(),
        "handling production plan request"
    );

    let result = run_dispatch(&request, state.config()).map_err(|e| {
        warn!(request_id = %request_id, error = %e, "production plan failed");
        record_plan_failed(e.kind().as_str(), state.service());
        from_lib_error(&e, request_id.as_str())
    })?;

    if let Some(excess) = result.corrected_overshoot {
        record_overshoot_corrected(excess);
    }
    record_units_dispatched(result.plan.dispatched_count());
    record_plan_calculated("productionplan", state.service());

    info!(
        request_id = %request_id,
        total = result.plan.total(),
        dispatched = result.plan.dispatched_count(),
        corrected = result.corrected_overshoot.is_some(),
        "production plan computed"
    );

    Ok(Json(result.plan.into_entries()))
}

/// Handle `POST /api/v1/merit-order`.
pub async fn merit_order(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<ServiceResponse<MeritOrderResponse>, ProblemDetails> {
    let request = parse_request(&state, &request_id, payload)?;
    let entries = rank_units(&request.units, &request.fuels, state.config());

    record_plan_calculated("merit-order", state.service());
    info!(request_id = %request_id, units = entries.len(), "merit order computed");

    Ok(ServiceResponse::new(MeritOrderResponse::new(
        request.load,
        entries,
    )))
}

/// Decode and validate a payload, counting failures.
fn parse_request(
    state: &AppState,
    request_id: &RequestId,
    payload: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<PlanRequest, ProblemDetails> {
    let Json(body) = payload.map_err(|rejection| {
        record_plan_failed(VALIDATION_FAILURE, state.service());
        ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
    })?;

    body.validated(request_id.as_str()).map_err(|problem| {
        record_plan_failed(VALIDATION_FAILURE, state.service());
        *problem
    })
}
