mod common;

use axum::http::StatusCode;
use common::{test_client, test_data};
use serde_json::json;

#[tokio::test]
async fn test_generate_schedule_locally() {
    let client = test_client();
    let exam = test_data::exam_date_in_days(3);
    let subject_id = test_data::create_subject(&client, "Physics", &exam).await;
    let topic_id = test_data::create_topic(&client, &subject_id, "Optics").await;

    // One weak attempt so the planner has something to prioritize.
    client
        .post_json(&format!("/topics/{topic_id}/attempts"), &json!({"accuracy": 40}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = client.post(&format!("/subjects/{subject_id}/schedule")).await;
    response.assert_status(StatusCode::CREATED);

    let saved: serde_json::Value = response.json();
    // No AI client configured in tests: always the local planner.
    assert_eq!(saved["source"], "local");

    let days = saved["schedule"].as_object().unwrap();
    assert_eq!(days.len(), 3);
    assert!(days.contains_key("Day 1"));
    assert!(days.contains_key("Day 3"));

    // Mastery 20 is critical tier: a 60-minute session, reason mentions
    // the days remaining.
    let first = &days["Day 1"][0];
    assert_eq!(first["topic"], "Optics");
    assert_eq!(first["duration"], 60);
    assert!(first["reason"].as_str().unwrap().starts_with("Critical:"));
}

#[tokio::test]
async fn test_schedule_is_stored_and_replaced() {
    let client = test_client();
    let exam = test_data::exam_date_in_days(5);
    let subject_id = test_data::create_subject(&client, "Physics", &exam).await;
    test_data::create_topic(&client, &subject_id, "Optics").await;

    // Nothing stored yet.
    let response = client.get(&format!("/subjects/{subject_id}/schedule")).await;
    response.assert_status(StatusCode::NOT_FOUND);

    client
        .post(&format!("/subjects/{subject_id}/schedule"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = client.get(&format!("/subjects/{subject_id}/schedule")).await;
    response.assert_status(StatusCode::OK);
    let first: serde_json::Value = response.json();

    // Regeneration replaces the stored schedule.
    client
        .post(&format!("/subjects/{subject_id}/schedule"))
        .await
        .assert_status(StatusCode::CREATED);
    let response = client.get(&format!("/subjects/{subject_id}/schedule")).await;
    response.assert_status(StatusCode::OK);
    let second: serde_json::Value = response.json();
    assert_eq!(first["schedule"], second["schedule"]);
    assert_eq!(second["source"], "local");
}

#[tokio::test]
async fn test_generate_schedule_with_no_topics() {
    let client = test_client();
    let exam = test_data::exam_date_in_days(5);
    let subject_id = test_data::create_subject(&client, "Physics", &exam).await;

    let response = client.post(&format!("/subjects/{subject_id}/schedule")).await;
    response.assert_status(StatusCode::CREATED);

    // Day keys exist, each with an empty session list.
    let saved: serde_json::Value = response.json();
    let days = saved["schedule"].as_object().unwrap();
    assert_eq!(days.len(), 5);
    for sessions in days.values() {
        assert_eq!(sessions.as_array().unwrap().len(), 0);
    }
}

#[tokio::test]
async fn test_generate_schedule_for_unknown_subject_is_404() {
    let client = test_client();
    let response = client
        .post("/subjects/00000000-0000-0000-0000-000000000000/schedule")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generations_log_empty_for_local_planner() {
    let client = test_client();
    let exam = test_data::exam_date_in_days(5);
    let subject_id = test_data::create_subject(&client, "Physics", &exam).await;
    test_data::create_topic(&client, &subject_id, "Optics").await;

    client
        .post(&format!("/subjects/{subject_id}/schedule"))
        .await
        .assert_status(StatusCode::CREATED);

    // Only AI generations are audited; the local planner leaves no trace.
    let response = client.get("/generations").await;
    response.assert_status(StatusCode::OK);
    let records: Vec<serde_json::Value> = response.json();
    assert!(records.is_empty());
}
