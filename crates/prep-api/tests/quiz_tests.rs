mod common;

use axum::http::StatusCode;
use common::{test_client, test_data};

#[tokio::test]
async fn test_generate_quiz_from_question_bank() {
    let client = test_client();
    let subject_id = test_data::create_subject(&client, "Physics", "2026-10-15").await;
    let topic_id = test_data::create_topic(&client, &subject_id, "Mechanics").await;

    let response = client.post(&format!("/topics/{topic_id}/quiz")).await;
    response.assert_status(StatusCode::OK);

    let quiz: Vec<serde_json::Value> = response.json();
    assert_eq!(quiz.len(), 5);
    for question in &quiz {
        assert!(!question["q"].as_str().unwrap().is_empty());
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
        let answer = question["answer"].as_u64().unwrap();
        assert!(answer < 4);
    }
}

#[tokio::test]
async fn test_generate_quiz_for_unfamiliar_topic_uses_generic_bank() {
    let client = test_client();
    let subject_id = test_data::create_subject(&client, "Physics", "2026-10-15").await;
    let topic_id = test_data::create_topic(&client, &subject_id, "Underwater Basket Weaving").await;

    let response = client.post(&format!("/topics/{topic_id}/quiz")).await;
    response.assert_status(StatusCode::OK);

    let quiz: Vec<serde_json::Value> = response.json();
    assert_eq!(quiz.len(), 5);
    // Generic questions are templated on the topic name.
    assert!(quiz[0]["q"].as_str().unwrap().contains("Underwater Basket Weaving"));
}

#[tokio::test]
async fn test_generate_quiz_for_unknown_topic_is_404() {
    let client = test_client();
    let response = client
        .post("/topics/00000000-0000-0000-0000-000000000000/quiz")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
