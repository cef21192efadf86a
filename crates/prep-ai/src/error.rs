use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model response contained no content")]
    EmptyResponse,
    #[error("no JSON object in model response")]
    NoJson,
    #[error("failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model returned an invalid schedule")]
    InvalidSchedule,
    #[error("model returned an invalid quiz")]
    InvalidQuiz,
}
