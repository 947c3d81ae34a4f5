use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;
use xhs_domain::Post;
use xhs_service::{
	Error as ServiceError, HealthResponse, SearchRequest, TestConnectionResponse,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/search", post(search))
		.route("/test-connection", get(test_connection))
		.with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(state.service.health())
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<Vec<Post>>, ApiError> {
	let posts = state.service.search(payload).await?;

	Ok(Json(posts))
}

async fn test_connection(State(state): State<AppState>) -> Json<TestConnectionResponse> {
	Json(state.service.test_connection().await)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	detail: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	detail: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let status = match &err {
			ServiceError::NoResults => StatusCode::NOT_FOUND,
			ServiceError::InvalidRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			ServiceError::CredentialMissing
			| ServiceError::Upstream { .. }
			| ServiceError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		};

		Self { status, detail: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { detail: self.detail })).into_response()
	}
}
