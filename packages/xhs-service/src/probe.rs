use serde::Serialize;
use serde_json::Value;

use crate::SearchService;
use xhs_domain::normalize::normalize;

/// Fixed keyword for the connectivity probe; one result is enough to prove
/// the sidecar and credential work.
const PROBE_KEYWORD: &str = "test";

#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub service: &'static str,
	pub cookie_configured: bool,
}

/// Lighter-weight projection used by the connectivity probe.
#[derive(Clone, Debug, Serialize)]
pub struct TestPost {
	pub title: String,
	pub id: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct TestConnectionResponse {
	pub success: bool,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub test_post: Option<TestPost>,
}
impl TestConnectionResponse {
	fn failure(message: impl Into<String>) -> Self {
		Self { success: false, message: message.into(), test_post: None }
	}
}

impl SearchService {
	/// Never fails. Re-resolves the credential so rotation shows up here
	/// immediately.
	pub fn health(&self) -> HealthResponse {
		HealthResponse {
			status: "healthy",
			service: "xhs-api",
			cookie_configured: self.resolver().resolve().is_some(),
		}
	}

	/// One-result probe against the sidecar. Internal faults are folded
	/// into `success: false`; this never surfaces an error status.
	pub async fn test_connection(&self) -> TestConnectionResponse {
		let Some(credential) = self.resolver().resolve() else {
			return TestConnectionResponse::failure("Cookie credential not configured.");
		};
		let outcome = self
			.provider
			.search_notes(&self.cfg.upstream, PROBE_KEYWORD, 1, &credential, 0)
			.await;

		match outcome {
			Ok(outcome) if outcome.success => {
				let Some(first) = outcome.records.as_ref().and_then(|records| records.first())
				else {
					return TestConnectionResponse::failure("Sidecar returned no test data.");
				};

				TestConnectionResponse {
					success: true,
					message: "Sidecar connection OK.".to_string(),
					test_post: Some(test_post(first)),
				}
			},
			Ok(outcome) =>
				TestConnectionResponse::failure(format!("Connection test failed: {}", outcome.msg)),
			Err(err) =>
				TestConnectionResponse::failure(format!("Connection test failed: {err}")),
		}
	}
}

/// Title and id from the first record, using the same precedence as full
/// normalization.
fn test_post(record: &Value) -> TestPost {
	let post = normalize(record, PROBE_KEYWORD);
	let id = if post.post_id.is_empty() { "unknown".to_string() } else { post.post_id };

	TestPost { title: post.title, id }
}
