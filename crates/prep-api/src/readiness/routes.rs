use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::Utc;
use prep_core::{ReadinessReport, compute_readiness_at};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ApiState;

/// Create the readiness routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/subjects/{id}/readiness", get(subject_readiness))
}

/// Compute the readiness report for a subject from its current topics
async fn subject_readiness(
    State(state): State<ApiState>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<ReadinessReport>, ApiError> {
    let subject = state.store.get_subject(subject_id)?;
    let topics = state.store.list_topics(subject_id)?;

    let now = Utc::now();
    let exam_date = subject.exam_date_or(now);
    let report = compute_readiness_at(&topics, Some(exam_date), now, &state.readiness);
    Ok(Json(report))
}
