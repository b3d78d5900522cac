pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::status_handler))
        .route("/health", get(health::health_handler))
        .route("/evaluate-answer", post(handlers::handle_evaluate_answer))
        .route("/rank-candidates", post(handlers::handle_rank_candidates))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::evaluation::evaluator::testing::{scored, CannedModel};
    use crate::evaluation::evaluator::Evaluator;
    use crate::llm_client::Provider;

    fn state_with(provider: Provider) -> AppState {
        let config = Config {
            groq_api_key: None,
            port: 0,
            rust_log: "info".to_string(),
            max_concurrent_evaluations: 2,
        };
        AppState {
            evaluator: Evaluator::new(provider, config.max_concurrent_evaluations),
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_reports_provider_available() {
        let (provider, _) = CannedModel::new().into_provider();
        let router = build_router(state_with(provider));

        let (status, body) = send(router, Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["provider_available"], true);
        assert_eq!(body["provider_status"], "connected");
        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["endpoints"], json!(["/evaluate-answer", "/rank-candidates"]));
    }

    #[tokio::test]
    async fn test_status_reports_provider_unavailable() {
        let router = build_router(state_with(Provider::Unavailable("no key".to_string())));

        let (_, body) = send(router, Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(body["provider_available"], false);
        assert_eq!(body["provider_status"], "not available: no key");
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(state_with(Provider::Unavailable(String::new())));
        let (status, body) =
            send(router, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_evaluate_answer_success() {
        let (provider, _) = CannedModel::new()
            .respond(
                "hash table",
                "```json\n{\"score\": \"4\", \"summary\": \"Good\", \"improvement\": \"Add examples\"}\n```",
            )
            .into_provider();
        let router = build_router(state_with(provider));

        let (status, body) = send(
            router,
            post_json(
                "/evaluate-answer",
                json!({
                    "candidate_says": "I would use a hash table for O(1) lookup time.",
                    "question_context": "What data structure would you use for a cache implementation?"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"score": 4, "summary": "Good", "improvement": "Add examples"})
        );
    }

    #[tokio::test]
    async fn test_evaluate_answer_rejects_blank_before_model_call() {
        let (provider, model) = CannedModel::new().into_provider();
        let router = build_router(state_with(provider));

        let (status, body) = send(
            router,
            post_json("/evaluate-answer", json!({"candidate_says": "   "})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_evaluate_answer_missing_field_is_client_error() {
        let (provider, model) = CannedModel::new().into_provider();
        let router = build_router(state_with(provider));

        let (status, _) = send(
            router,
            post_json("/evaluate-answer", json!({"question_context": "Why?"})),
        )
        .await;

        assert!(status.is_client_error());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_evaluate_answer_unparseable_output_is_server_error() {
        let (provider, _) = CannedModel::new()
            .respond("Arrays", "I would rate this a two out of five.")
            .into_provider();
        let router = build_router(state_with(provider));

        let (status, body) = send(
            router,
            post_json("/evaluate-answer", json!({"candidate_says": "Arrays are good"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MODEL_OUTPUT_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("I would rate this a two out of five."));
    }

    #[tokio::test]
    async fn test_evaluate_answer_without_provider() {
        let router = build_router(state_with(Provider::Unavailable("no key".to_string())));

        let (status, body) = send(
            router,
            post_json("/evaluate-answer", json!({"candidate_says": "Arrays are good"})),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "PROVIDER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_rank_candidates_rejects_empty_list() {
        let (provider, model) = CannedModel::new().into_provider();
        let router = build_router(state_with(provider));

        let (status, body) =
            send(router, post_json("/rank-candidates", json!({"candidates": []}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Candidates list cannot be empty");
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rank_candidates_partial_failure() {
        let (provider, _) = CannedModel::new()
            .respond("component-based", &scored(2))
            .respond("virtual DOM", &scored(5))
            .into_provider();
        let router = build_router(state_with(provider));

        let (status, body) = send(
            router,
            post_json(
                "/rank-candidates",
                json!({
                    "candidates": [
                        {"candidate_id": "C001", "answer": "React is component-based", "question_context": "Why use React?"},
                        {"candidate_id": "C002", "answer": "React provides reusability, virtual DOM", "question_context": "Why use React?"},
                        {"candidate_id": "C003", "answer": "I don't know"}
                    ]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let ranked = body["ranked_candidates"].as_array().unwrap();
        assert_eq!(ranked.len(), 3);

        assert_eq!(ranked[0]["candidate_id"], "C002");
        assert_eq!(ranked[0]["score"], 5);
        assert_eq!(ranked[0]["rank"], 1);

        assert_eq!(ranked[1]["candidate_id"], "C001");
        assert_eq!(ranked[1]["rank"], 2);

        assert_eq!(ranked[2]["candidate_id"], "C003");
        assert_eq!(ranked[2]["answer"], "I don't know");
        assert_eq!(ranked[2]["score"], 0);
        assert_eq!(ranked[2]["rank"], 3);
        assert_eq!(ranked[2]["improvement"], "Please retry evaluation");
    }
}
