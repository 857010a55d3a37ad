pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // CV extraction
        .route("/api/v1/cv/extract", post(extraction::handle_extract_text))
        .route("/api/v1/cv/upload", post(extraction::handle_upload))
        // Matching
        .route("/api/v1/matches/rank", post(matching::handle_rank))
        // Skill profile
        .route("/api/v1/skills/merge", post(profile::handle_merge_skills))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::pipeline::CvExtractionPipeline;
    use crate::extraction::vocabulary::SkillVocabulary;

    const BOUNDARY: &str = "careerlens-test-boundary";
    const SCENARIO: &str =
        "Jane Doe\njane@x.com\nSKILLS\nPython, advanced, 5 years\nEXPERIENCE\nEngineer - Acme Corp - 2019-2022";

    fn app_with(config: Config) -> Router {
        let pipeline = CvExtractionPipeline::new(Arc::new(SkillVocabulary::builtin()), None);
        build_router(AppState::new(config, pipeline))
    }

    fn app() -> Router {
        app_with(Config::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_multipart(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match filename {
                Some(f) => format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n"),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/cv/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "careerlens");
    }

    #[tokio::test]
    async fn test_extract_text_end_to_end() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/cv/extract",
                json!({ "raw_text": SCENARIO, "current_year": 2024 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "complete");
        assert_eq!(body["result"]["personal_info"]["email"], "jane@x.com");
        assert_eq!(body["result"]["skills"][0]["name"], "Python");
        assert_eq!(body["result"]["skills"][0]["level"], "advanced");
        assert_eq!(body["result"]["skills"][0]["years"], 5);
        assert_eq!(body["result"]["experience"][0]["company"], "Acme Corp");
        assert_eq!(body["result"]["experience"][0]["duration_years"], 3);
        assert!(body["extraction_id"].is_string());
        assert!(body["readiness"]["overall_score"].is_number());
    }

    #[tokio::test]
    async fn test_extract_empty_text_is_not_an_error() {
        let response = app()
            .oneshot(post_json("/api/v1/cv/extract", json!({ "raw_text": "" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "complete");
        assert_eq!(body["result"]["total_skills"], 0);
        assert_eq!(body["result"]["total_experience_years"], 0);
    }

    #[tokio::test]
    async fn test_upload_text_file() {
        let response = app()
            .oneshot(post_multipart(&[
                ("file", Some("jane.txt"), SCENARIO.as_bytes()),
                ("current_year", None, b"2024"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["result"]["total_experience_years"], 3);
    }

    #[tokio::test]
    async fn test_upload_unsupported_extension_is_415() {
        let response = app()
            .oneshot(post_multipart(&[("file", Some("cv.odt"), SCENARIO.as_bytes())]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_upload_without_file_is_400() {
        let response = app()
            .oneshot(post_multipart(&[("current_year", None, b"2024")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_near_empty_document_is_422() {
        let response = app()
            .oneshot(post_multipart(&[("file", Some("cv.txt"), b"   hi   ")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let config = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        let big = "x".repeat(4096);
        let response = app_with(config)
            .oneshot(post_multipart(&[("file", Some("cv.txt"), big.as_bytes())]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_rank_orders_postings() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/matches/rank",
                json!({
                    "candidate_vector": [1.0, 0.0],
                    "postings": [
                        { "posting": { "title": "A" }, "vector": [1.0, 0.0] },
                        { "posting": { "title": "B" }, "vector": [0.0, 1.0] }
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["matches"][0]["posting"]["title"], "A");
        assert_eq!(body["matches"][0]["similarity_score"], 100.0);
        assert_eq!(body["matches"][1]["posting"]["title"], "B");
    }

    #[tokio::test]
    async fn test_rank_paginates() {
        let postings: Vec<Value> = (0..5)
            .map(|i| json!({ "posting": { "title": format!("P{i}") }, "vector": [1.0, i as f32] }))
            .collect();
        let response = app()
            .oneshot(post_json(
                "/api/v1/matches/rank",
                json!({ "candidate_vector": [1.0, 0.0], "postings": postings, "limit": 2, "offset": 1 }),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["total"], 5);
        assert_eq!(body["matches"].as_array().unwrap().len(), 2);
        assert_eq!(body["matches"][0]["posting"]["title"], "P1");
    }

    #[tokio::test]
    async fn test_rank_dimension_mismatch_is_400() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/matches/rank",
                json!({
                    "candidate_vector": [1.0, 0.0],
                    "postings": [{ "posting": { "title": "A" }, "vector": [1.0] }]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rank_rejects_oversized_limit() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/matches/rank",
                json!({ "candidate_vector": [1.0], "postings": [], "limit": 1000 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_merge_skills_keeps_manual() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/skills/merge",
                json!({
                    "existing": [
                        { "name": "Rust", "level": "advanced", "years": 6, "source": "manual" },
                        { "name": "Go", "level": "beginner", "years": 0, "source": "cv" }
                    ],
                    "extracted": [
                        { "name": "rust", "level": "beginner", "years": 0 },
                        { "name": "go", "level": "intermediate", "years": 2 },
                        { "name": "Kafka", "level": "beginner", "years": 0 }
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["level"], "advanced");
        assert_eq!(body[1]["level"], "intermediate");
        assert_eq!(body[2]["name"], "Kafka");
        assert_eq!(body[2]["source"], "cv");
    }
}
