#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use prep_api::ApiState;
use prep_api::store::InMemoryStore;
use serde::Deserialize;
use tower::ServiceExt;

/// Build a fresh, isolated test state: in-memory store, no AI client.
pub fn test_state() -> ApiState {
    ApiState::with_store(Arc::new(InMemoryStore::new()), None)
}

/// Build a test client over the full router.
pub fn test_client() -> TestClient {
    TestClient::new(prep_api::router::router().with_state(test_state()))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with no body
    pub async fn post(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a PUT request with JSON body
    pub async fn put_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a DELETE request
    pub async fn delete(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}

/// Test data helpers
pub mod test_data {
    use super::{StatusCode, TestClient};
    use serde_json::json;

    /// Create a subject and return its id as a string.
    pub async fn create_subject(client: &TestClient, name: &str, exam_date: &str) -> String {
        let body = json!({
            "name": name,
            "exam_date": exam_date,
            "daily_study_hours": 2.0
        });
        let response = client.post_json("/subjects", &body).await;
        response.assert_status(StatusCode::CREATED);
        let json: serde_json::Value = response.json();
        json["id"].as_str().expect("subject id").to_string()
    }

    /// Create a topic under a subject and return its id as a string.
    pub async fn create_topic(client: &TestClient, subject_id: &str, name: &str) -> String {
        let body = json!({ "name": name });
        let response = client
            .post_json(&format!("/subjects/{subject_id}/topics"), &body)
            .await;
        response.assert_status(StatusCode::CREATED);
        let json: serde_json::Value = response.json();
        json["id"].as_str().expect("topic id").to_string()
    }

    /// An exam date `days` from now, in `YYYY-MM-DD` form.
    pub fn exam_date_in_days(days: i64) -> String {
        (chrono::Utc::now() + chrono::Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }
}
