use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use xhs_api::{routes, state::AppState};
use xhs_service::SearchService;
use xhs_testkit::{
	EnvFile, FaultyProvider, StubProvider, note_card_record, test_config, unconfigured_config,
};

fn test_app(service: SearchService) -> axum::Router {
	routes::router(AppState::with_service(service))
}

fn search_request(payload: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/search")
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

#[tokio::test]
async fn health_reports_cookie_state() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let stub = Arc::new(StubProvider::success(vec![]));
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), stub));
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;

	assert_eq!(json["status"], "healthy");
	assert_eq!(json["cookie_configured"], true);
}

#[tokio::test]
async fn search_without_credential_is_500() {
	let stub = Arc::new(StubProvider::success(vec![note_card_record("n1", "t1")]));
	let app = test_app(SearchService::with_provider(unconfigured_config(), stub));
	let response = app
		.oneshot(search_request(serde_json::json!({ "keyword": "coffee", "max_posts": 1 })))
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let json = body_json(response).await;
	let detail = json["detail"].as_str().expect("Expected a detail message.");

	assert!(detail.contains("credential"), "Unexpected detail: {detail}");
}

#[tokio::test]
async fn search_upstream_failure_is_500_with_message() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let stub = Arc::new(StubProvider::failure("rate limited"));
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), stub));
	let response = app
		.oneshot(search_request(serde_json::json!({ "keyword": "coffee" })))
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let json = body_json(response).await;
	let detail = json["detail"].as_str().expect("Expected a detail message.");

	assert!(detail.contains("rate limited"), "Unexpected detail: {detail}");
}

#[tokio::test]
async fn search_empty_result_is_404() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let stub = Arc::new(StubProvider::success(vec![]));
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), stub));
	let response = app
		.oneshot(search_request(serde_json::json!({ "keyword": "coffee" })))
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let json = body_json(response).await;

	assert_eq!(json["detail"], "No matching posts found.");
}

#[tokio::test]
async fn search_normalizes_note_card_records() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let stub = Arc::new(StubProvider::success(vec![note_card_record("64f0a9", "Pour-over")]));
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), stub));
	let response = app
		.oneshot(search_request(serde_json::json!({ "keyword": "coffee", "max_posts": 1 })))
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;
	let posts = json.as_array().expect("Expected an array.");

	assert_eq!(posts.len(), 1);
	assert_eq!(posts[0]["url"], "https://www.xiaohongshu.com/explore/64f0a9");
	assert_eq!(posts[0]["title"], "Pour-over");
	assert_eq!(posts[0]["keyword"], "coffee");
	assert_eq!(posts[0]["sentiment_label"], "neutral");
}

#[tokio::test]
async fn search_applies_request_defaults() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let stub = Arc::new(StubProvider::success(vec![note_card_record("n1", "t1")]));
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), stub.clone()));
	let response = app
		.oneshot(search_request(serde_json::json!({ "keyword": "coffee" })))
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::OK);
	// max_posts defaults to 20.
	assert_eq!(stub.last_require_num(), 20);
}

#[tokio::test]
async fn blank_keyword_is_422() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let stub = Arc::new(StubProvider::success(vec![]));
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), stub));
	let response = app
		.oneshot(search_request(serde_json::json!({ "keyword": "  " })))
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_connection_never_errors() {
	let env_file = EnvFile::with_cookie("cookie").expect("Failed to write env file.");
	let faulty = Arc::new(FaultyProvider { message: "boom".to_string() });
	let app = test_app(SearchService::with_provider(test_config(env_file.path()), faulty));
	let response = app
		.oneshot(
			Request::builder()
				.uri("/test-connection")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /test-connection.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;

	assert_eq!(json["success"], false);
	assert!(json.get("test_post").is_none());
}
