//! AI quiz generation with a static fallback.
//!
//! Asks the model for a five-question multiple-choice quiz on a topic and
//! validates the response; on any failure (or with no client configured)
//! the static question bank answers instead.

use serde::{Deserialize, Serialize};

use crate::client::GroqClient;
use crate::error::AiError;
use crate::question_bank;
use crate::schedule::extract_json;

/// Questions per generated quiz.
pub const QUIZ_LEN: usize = 5;

/// Options per question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text (`q` on the wire)
    #[serde(rename = "q")]
    pub question: String,
    /// Exactly four answer options
    pub options: Vec<String>,
    /// Zero-based index of the correct option
    pub answer: usize,
}

const QUIZ_SYSTEM_PROMPT: &str = "Act as an expert tutor. Create exactly 5 high-quality, \
multiple-choice questions testing the academic topic provided by the user.\n\
\n\
Requirements:\n\
1. Questions should test real conceptual understanding, not just trivia.\n\
2. Provide exactly 4 plausible options for each question.\n\
3. The 'answer' field must be the zero-based index of the correct option (0, 1, 2, or 3).\n\
4. Do NOT include any markdown formatting or extra text.\n\
\n\
Return your response as a valid JSON object with a single root key called \"quiz\", which \
contains the array of question objects, like this EXACT format:\n\
{\n\
  \"quiz\": [\n\
    {\n\
      \"q\": \"Question text here?\",\n\
      \"options\": [\"Option 1\", \"Option 2\", \"Option 3\", \"Option 4\"],\n\
      \"answer\": 2\n\
    }\n\
  ]\n\
}";

/// Quiz generator: remote model when configured, static bank otherwise and
/// on every remote failure.
#[derive(Debug, Clone, Default)]
pub struct QuizGenerator {
    client: Option<GroqClient>,
}

impl QuizGenerator {
    pub fn new(client: Option<GroqClient>) -> Self {
        Self { client }
    }

    /// Generate a quiz for a topic. Never fails; the question bank is the
    /// unconditional fallback.
    pub async fn generate(&self, topic_name: &str) -> Vec<QuizQuestion> {
        if let Some(client) = &self.client {
            match self.generate_remote(client, topic_name).await {
                Ok(quiz) => return quiz,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        topic = topic_name,
                        "AI quiz generation failed, using question bank"
                    );
                }
            }
        }
        question_bank::questions_for(topic_name)
    }

    async fn generate_remote(
        &self,
        client: &GroqClient,
        topic_name: &str,
    ) -> Result<Vec<QuizQuestion>, AiError> {
        let user = format!("Topic: \"{topic_name}\"");
        let text = client.chat_json(QUIZ_SYSTEM_PROMPT, &user).await?;
        let json = extract_json(&text).ok_or(AiError::NoJson)?;
        let value: serde_json::Value = serde_json::from_str(json)?;
        validate_quiz(&value).ok_or(AiError::InvalidQuiz)
    }
}

/// Validate a raw model response into a question list.
///
/// The root object must carry a non-empty `quiz` array; every question
/// needs non-empty text, exactly four options, and an in-range answer
/// index. The list is truncated to [`QUIZ_LEN`].
pub fn validate_quiz(value: &serde_json::Value) -> Option<Vec<QuizQuestion>> {
    let raw = value.get("quiz")?.as_array()?;
    if raw.is_empty() {
        return None;
    }

    let mut quiz = Vec::with_capacity(raw.len().min(QUIZ_LEN));
    for item in raw.iter().take(QUIZ_LEN) {
        let question = item.get("q")?.as_str()?.trim();
        let options = item.get("options")?.as_array()?;
        let answer = item.get("answer")?.as_u64()? as usize;

        if question.is_empty() || options.len() != OPTIONS_PER_QUESTION {
            return None;
        }
        let options: Option<Vec<String>> =
            options.iter().map(|o| o.as_str().map(str::to_string)).collect();
        let options = options?;
        if answer >= OPTIONS_PER_QUESTION {
            return None;
        }

        quiz.push(QuizQuestion { question: question.to_string(), options, answer });
    }
    Some(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_well_formed_quiz() {
        let value = json!({
            "quiz": [
                {"q": "2 + 2?", "options": ["3", "4", "5", "6"], "answer": 1},
                {"q": "3 * 3?", "options": ["6", "7", "8", "9"], "answer": 3}
            ]
        });
        let quiz = validate_quiz(&value).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].question, "2 + 2?");
        assert_eq!(quiz[0].answer, 1);
    }

    #[test]
    fn test_validate_truncates_to_quiz_len() {
        let question = json!({"q": "Q?", "options": ["a", "b", "c", "d"], "answer": 0});
        let value = json!({ "quiz": vec![question; 8] });
        assert_eq!(validate_quiz(&value).unwrap().len(), QUIZ_LEN);
    }

    #[test]
    fn test_validate_rejects_malformed_quizzes() {
        assert!(validate_quiz(&json!({})).is_none());
        assert!(validate_quiz(&json!({"quiz": []})).is_none());
        assert!(
            validate_quiz(&json!({"quiz": [{"q": "Q?", "options": ["a", "b"], "answer": 0}]}))
                .is_none()
        );
        assert!(
            validate_quiz(
                &json!({"quiz": [{"q": "Q?", "options": ["a", "b", "c", "d"], "answer": 4}]})
            )
            .is_none()
        );
        assert!(
            validate_quiz(&json!({"quiz": [{"q": "", "options": ["a", "b", "c", "d"], "answer": 0}]}))
                .is_none()
        );
    }

    #[test]
    fn test_quiz_question_wire_shape() {
        let question = QuizQuestion {
            question: "Q?".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer: 2,
        };
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["q"], "Q?");
        assert_eq!(json["answer"], 2);
    }

    #[tokio::test]
    async fn test_no_client_uses_question_bank() {
        let generator = QuizGenerator::new(None);
        let quiz = generator.generate("Mechanics").await;
        assert_eq!(quiz.len(), QUIZ_LEN);
        for question in &quiz {
            assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
            assert!(question.answer < OPTIONS_PER_QUESTION);
        }
    }
}
