use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use prep_ai::QuizQuestion;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ApiState;

/// Create the quiz routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/topics/{id}/quiz", post(generate_quiz))
}

/// Generate a multiple-choice quiz for a topic. Falls back to the static
/// question bank when no AI client is configured or the model misbehaves.
async fn generate_quiz(
    State(state): State<ApiState>,
    Path(topic_id): Path<Uuid>,
) -> Result<Json<Vec<QuizQuestion>>, ApiError> {
    let topic = state.store.get_topic(topic_id)?;
    let quiz = state.quiz_generator.generate(&topic.name).await;
    Ok(Json(quiz))
}
