//! End-to-end tests for the HTTP API, with wiremock standing in for the
//! search engine and the completion provider.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use docsearch_rs::config::{EngineSettings, LlmSettings, Settings};
use docsearch_rs::engine::EsClient;
use docsearch_rs::llm::LlmClient;
use docsearch_rs::services::NO_RESULTS_ANSWER;
use docsearch_rs::web::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_settings_for(uri: &str) -> EngineSettings {
    let uri = url::Url::parse(uri).unwrap();
    EngineSettings {
        host: uri.host_str().unwrap().to_string(),
        port: uri.port().unwrap(),
        max_retries: 0,
        ..Default::default()
    }
}

fn state_for(engine: EngineSettings, llm: LlmSettings) -> AppState {
    let settings = Settings {
        engine,
        llm,
        ..Default::default()
    };
    let engine = EsClient::new(&settings.engine).unwrap();
    let llm = LlmClient::new(&settings.llm);
    AppState::new(settings, engine, llm)
}

fn state_with_llm(es: &MockServer, llm: &MockServer) -> AppState {
    state_for(
        engine_settings_for(&es.uri()),
        LlmSettings {
            api_base: llm.uri(),
            api_key: "test-key".to_string(),
            ..Default::default()
        },
    )
}

fn state_without_llm(es: &MockServer) -> AppState {
    state_for(engine_settings_for(&es.uri()), LlmSettings::default())
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn mock_search_response(hits: Value, total: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "hits": {
            "total": {"value": total, "relation": "eq"},
            "hits": hits
        }
    }))
}

#[tokio::test]
async fn health_is_liveness_only() {
    let es = MockServer::start().await;
    let (status, body) = send(state_without_llm(&es), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn create_then_fetch_round_trips_text() {
    let es = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_doc"))
        .and(body_partial_json(json!({"text": "Test document content"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "doc-1",
            "result": "created"
        })))
        .expect(1)
        .mount(&es)
        .await;
    Mock::given(method("GET"))
        .and(path("/documents/_doc/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "doc-1",
            "found": true,
            "_source": {"text": "Test document content"}
        })))
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        post_json("/api/v1/documents", json!({"text": "Test document content"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_id"], "doc-1");
    assert_eq!(body["text"], "Test document content");

    let (status, body) = send(state_without_llm(&es), get("/api/v1/documents/doc-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Test document content");
}

#[tokio::test]
async fn empty_text_is_rejected_before_any_engine_call() {
    let es = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_doc"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        post_json("/api/v1/documents", json!({"text": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn missing_body_fields_yield_422_not_5xx() {
    let es = MockServer::start().await;

    for (uri, body) in [
        ("/api/v1/documents", json!({"invalid_field": "test"})),
        ("/api/v1/search", json!({"invalid_field": "test"})),
        ("/api/v1/search/llm", json!({})),
    ] {
        let (status, body) = send(state_without_llm(&es), post_json(uri, body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "uri {}", uri);
        assert_eq!(body["kind"], "validation_error");
    }
}

#[tokio::test]
async fn missing_document_is_not_found_never_another_kind() {
    let es = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/_doc/nonexistent_id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"found": false})))
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        get("/api/v1/documents/nonexistent_id"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn search_returns_hits_sorted_by_descending_score() {
    let es = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .and(body_partial_json(json!({
            "query": {"match": {"text": "Python"}},
            "size": 5
        })))
        .respond_with(mock_search_response(
            json!([
                {"_id": "a", "_score": 1.9, "_source": {"text": "Python is great for data science"}},
                {"_id": "c", "_score": 1.2, "_source": {"text": "Python powers many backends"}}
            ]),
            2,
        ))
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        post_json("/api/v1/search", json!({"query": "Python", "max_results": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let results = body["results"].as_array().unwrap();
    assert_eq!(body["total"], 2);
    assert!(results.len() <= 5);
    assert!(body["total"].as_u64().unwrap() >= results.len() as u64);
    let scores: Vec<f64> = results
        .iter()
        .map(|r| r["score"].as_f64().unwrap())
        .collect();
    assert!(scores.iter().all(|s| *s >= 0.0));
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(results
        .iter()
        .all(|r| r["text"].as_str().unwrap().contains("Python")));
}

#[tokio::test]
async fn search_with_no_matches_is_empty_success_not_error() {
    let es = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .respond_with(mock_search_response(json!([]), 0))
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        post_json(
            "/api/v1/search",
            json!({"query": "nonexistent content xyz123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn zero_max_results_is_a_validation_error() {
    let es = MockServer::start().await;
    let (status, body) = send(
        state_without_llm(&es),
        post_json("/api/v1/search", json!({"query": "x", "max_results": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn engine_fault_maps_to_engine_error_with_upstream_status() {
    let es = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("shard failure"))
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        post_json("/api/v1/search", json!({"query": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "engine_error");
    assert_eq!(body["upstream_status"], 500);
    assert!(body["error"].as_str().unwrap().contains("shard failure"));
}

#[tokio::test]
async fn unreachable_engine_maps_to_connectivity_error() {
    // Nothing listens on port 1; connection is refused immediately.
    let engine = EngineSettings {
        host: "127.0.0.1".to_string(),
        port: 1,
        max_retries: 0,
        ..Default::default()
    };
    let state = state_for(engine, LlmSettings::default());

    let (status, body) = send(state, post_json("/api/v1/search", json!({"query": "x"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "connectivity_error");
}

#[tokio::test]
async fn llm_search_short_circuits_on_zero_hits() {
    let es = MockServer::start().await;
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .respond_with(mock_search_response(json!([]), 0))
        .mount(&es)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&llm)
        .await;

    let (status, body) = send(
        state_with_llm(&es, &llm),
        post_json("/api/v1/search/llm", json!({"query": "anything"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], NO_RESULTS_ANSWER);
}

#[tokio::test]
async fn llm_search_sends_labeled_context_and_returns_answer() {
    let es = MockServer::start().await;
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .respond_with(mock_search_response(
            json!([
                {"_id": "a", "_score": 2.0, "_source": {"text": "Python is great for data science"}},
                {"_id": "b", "_score": 1.5, "_source": {"text": "Python powers many backends"}}
            ]),
            2,
        ))
        .mount(&es)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Document 1:"))
        .and(body_string_contains("Question: What can Python be used for?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Data science and backends."}}]
        })))
        .expect(1)
        .mount(&llm)
        .await;

    let (status, body) = send(
        state_with_llm(&es, &llm),
        post_json(
            "/api/v1/search/llm",
            json!({"query": "What can Python be used for?"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Data science and backends.");
}

#[tokio::test]
async fn provider_failure_maps_to_dependency_error() {
    let es = MockServer::start().await;
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .respond_with(mock_search_response(
            json!([{"_id": "a", "_score": 1.0, "_source": {"text": "something"}}]),
            1,
        ))
        .mount(&es)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&llm)
        .await;

    let (status, body) = send(
        state_with_llm(&es, &llm),
        post_json("/api/v1/search/llm", json!({"query": "q"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "dependency_error");
    assert_eq!(body["upstream_status"], 429);
}

#[tokio::test]
async fn missing_api_key_is_a_dependency_error_without_provider_call() {
    let es = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/_search"))
        .respond_with(mock_search_response(
            json!([{"_id": "a", "_score": 1.0, "_source": {"text": "something"}}]),
            1,
        ))
        .mount(&es)
        .await;

    let (status, body) = send(
        state_without_llm(&es),
        post_json("/api/v1/search/llm", json!({"query": "q"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "dependency_error");
}
