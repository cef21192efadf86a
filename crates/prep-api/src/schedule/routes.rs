use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use prep_ai::GenerationRecord;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ApiState;
use crate::store::SavedSchedule;

/// Default number of audit records returned by `GET /generations`.
const DEFAULT_GENERATION_LIMIT: usize = 20;

/// Create the schedule routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/subjects/{id}/schedule",
            get(get_schedule).post(generate_schedule),
        )
        .route("/generations", get(list_generations))
}

#[derive(Deserialize, Default)]
struct GenerationQuery {
    limit: Option<usize>,
}

/// Get the stored schedule for a subject
async fn get_schedule(
    State(state): State<ApiState>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<SavedSchedule>, ApiError> {
    Ok(Json(state.store.schedule_for_subject(subject_id)?))
}

/// Generate a schedule for a subject and store it, replacing any previous
/// one. The AI path is attempted when configured; the local planner covers
/// everything else, so this endpoint cannot fail to produce a schedule.
async fn generate_schedule(
    State(state): State<ApiState>,
    Path(subject_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let subject = state.store.get_subject(subject_id)?;
    let topics = state.store.list_topics(subject_id)?;

    let now = Utc::now();
    let exam_date = subject.exam_date_or(now);
    let generated = state
        .schedule_generator
        .generate(&topics, exam_date, subject.daily_study_hours)
        .await;

    if let Some(prompt) = &generated.prompt {
        let output = serde_json::to_value(&generated.schedule).unwrap_or(Value::Null);
        state.generation_log.record(Some(subject_id), prompt.clone(), output);
    }

    let saved = SavedSchedule {
        schedule: generated.schedule,
        source: generated.source,
        generated_at: now,
    };
    state.store.save_schedule(subject_id, saved.clone())?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Get recent AI generation audit records, newest first
async fn list_generations(
    State(state): State<ApiState>,
    Query(query): Query<GenerationQuery>,
) -> Json<Vec<GenerationRecord>> {
    let limit = query.limit.unwrap_or(DEFAULT_GENERATION_LIMIT);
    Json(state.generation_log.recent(limit))
}
