use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use prep_core::Topic;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ApiState;
use crate::store::{QuizAttempt, TopicUpdate};
use crate::validation::{validate_accuracy, validate_name};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/subjects/{id}/topics", get(list_topics).post(create_topic))
        .route(
            "/topics/{id}",
            get(get_topic).put(update_topic).delete(delete_topic),
        )
        .route("/topics/{id}/attempts", get(list_attempts).post(record_attempt))
}

#[derive(Deserialize)]
struct CreateTopic {
    name: String,
}

#[derive(Deserialize, Default)]
struct UpdateTopic {
    name: Option<String>,
    mastery_score: Option<i32>,
    total_attempts: Option<i32>,
    last_accuracy: Option<i32>,
}

#[derive(Deserialize)]
struct RecordAttempt {
    accuracy: i32,
    time_taken_seconds: Option<i64>,
}

/// A recorded attempt together with the topic's updated mastery state.
#[derive(Serialize)]
struct AttemptResponse {
    attempt: QuizAttempt,
    topic: Topic,
}

/// Get all topics for a subject, oldest first
async fn list_topics(
    State(state): State<ApiState>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<Topic>>, ApiError> {
    Ok(Json(state.store.list_topics(subject_id)?))
}

/// Add a topic to a subject
async fn create_topic(
    State(state): State<ApiState>,
    Path(subject_id): Path<Uuid>,
    Json(payload): Json<CreateTopic>,
) -> Result<impl IntoResponse, ApiError> {
    validate_name(&payload.name)?;
    let topic = state.store.create_topic(subject_id, payload.name.trim().to_string())?;
    Ok((StatusCode::CREATED, Json(topic)))
}

/// Get a topic by ID
async fn get_topic(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Topic>, ApiError> {
    Ok(Json(state.store.get_topic(id)?))
}

/// Update a topic's name or mastery fields
async fn update_topic(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTopic>,
) -> Result<Json<Topic>, ApiError> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    if let Some(accuracy) = payload.last_accuracy {
        validate_accuracy(accuracy)?;
    }

    let topic = state.store.update_topic(
        id,
        TopicUpdate {
            name: payload.name.map(|name| name.trim().to_string()),
            mastery_score: payload.mastery_score,
            total_attempts: payload.total_attempts,
            last_accuracy: payload.last_accuracy,
        },
    )?;
    Ok(Json(topic))
}

/// Delete a topic and its recorded attempts
async fn delete_topic(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_topic(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the recorded attempts for a topic
async fn list_attempts(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuizAttempt>>, ApiError> {
    Ok(Json(state.store.attempts_for_topic(id)?))
}

/// Record a quiz attempt, folding its accuracy into the topic's mastery
async fn record_attempt(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordAttempt>,
) -> Result<impl IntoResponse, ApiError> {
    validate_accuracy(payload.accuracy)?;
    let (attempt, topic) =
        state.store.record_attempt(id, payload.accuracy, payload.time_taken_seconds)?;
    Ok((StatusCode::CREATED, Json(AttemptResponse { attempt, topic })))
}
