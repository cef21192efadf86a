use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ApiState;
use crate::store::{NewSubject, SubjectUpdate};
use crate::validation::{validate_daily_hours, validate_name};

use super::model::Subject;

/// Create the subject routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/subjects", get(list_subjects).post(create_subject))
        .route(
            "/subjects/{id}",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
}

#[derive(Deserialize)]
struct CreateSubject {
    name: String,
    exam_date: String,
    daily_study_hours: f64,
}

#[derive(Deserialize, Default)]
struct UpdateSubject {
    name: Option<String>,
    exam_date: Option<String>,
    daily_study_hours: Option<f64>,
}

/// Get all subjects, newest first
async fn list_subjects(State(state): State<ApiState>) -> Json<Vec<Subject>> {
    Json(state.store.list_subjects())
}

/// Get a subject by ID
async fn get_subject(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Subject>, ApiError> {
    Ok(Json(state.store.get_subject(id)?))
}

/// Create a new subject
async fn create_subject(
    State(state): State<ApiState>,
    Json(payload): Json<CreateSubject>,
) -> Result<impl IntoResponse, ApiError> {
    validate_name(&payload.name)?;
    validate_daily_hours(payload.daily_study_hours)?;

    let subject = state.store.create_subject(NewSubject {
        name: payload.name.trim().to_string(),
        exam_date: payload.exam_date,
        daily_study_hours: payload.daily_study_hours,
    });
    Ok((StatusCode::CREATED, Json(subject)))
}

/// Update an existing subject
async fn update_subject(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubject>,
) -> Result<Json<Subject>, ApiError> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    if let Some(hours) = payload.daily_study_hours {
        validate_daily_hours(hours)?;
    }

    let subject = state.store.update_subject(
        id,
        SubjectUpdate {
            name: payload.name.map(|name| name.trim().to_string()),
            exam_date: payload.exam_date,
            daily_study_hours: payload.daily_study_hours,
        },
    )?;
    Ok(Json(subject))
}

/// Delete a subject (cascades to topics, attempts, and its schedule)
async fn delete_subject(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_subject(id)?;
    Ok(StatusCode::NO_CONTENT)
}
