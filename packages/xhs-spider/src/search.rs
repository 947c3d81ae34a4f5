// std
use std::time::Duration;

// crates.io
use reqwest::Client;
use serde_json::Value;

use crate::{BoxFuture, Error, Result};
use xhs_config::{Credential, Upstream};

/// One tri-state reply from the sidecar. `records` is `None` when the
/// payload was omitted or was not an array; interpreting that (and an empty
/// array) is the orchestrator's job.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
	pub success: bool,
	pub msg: String,
	pub records: Option<Vec<Value>>,
}

/// Seam between the orchestrator and the crawler sidecar. Tests substitute
/// stub implementations; production uses [`Sidecar`].
pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search_notes<'a>(
		&'a self,
		cfg: &'a Upstream,
		keyword: &'a str,
		require_num: u32,
		credential: &'a Credential,
		sort_code: u8,
	) -> BoxFuture<'a, Result<SearchOutcome>>;
}

/// HTTP client for the crawler sidecar, which owns signing and anti-bot
/// evasion. This side only ships parameters and interprets the reply.
pub struct Sidecar;

impl SearchProvider for Sidecar {
	fn search_notes<'a>(
		&'a self,
		cfg: &'a Upstream,
		keyword: &'a str,
		require_num: u32,
		credential: &'a Credential,
		sort_code: u8,
	) -> BoxFuture<'a, Result<SearchOutcome>> {
		Box::pin(search_notes(cfg, keyword, require_num, credential, sort_code))
	}
}

/// Run one keyword search against the sidecar. No retries; the configured
/// timeout is the only bound on the call.
pub async fn search_notes(
	cfg: &Upstream,
	keyword: &str,
	require_num: u32,
	credential: &Credential,
	sort_code: u8,
) -> Result<SearchOutcome> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.search_path);
	let body = serde_json::json!({
		"keyword": keyword,
		"require_num": require_num,
		"cookies_str": credential.token(),
		"sort_type_choice": sort_code,
	});

	tracing::debug!(%url, keyword, require_num, sort_code, "Calling sidecar.");

	let res = client.post(url).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn parse_search_response(json: Value) -> Result<SearchOutcome> {
	let success = json.get("success").and_then(Value::as_bool).ok_or_else(|| {
		Error::InvalidResponse { message: "Sidecar reply is missing the success flag.".to_string() }
	})?;
	let msg = json.get("msg").and_then(Value::as_str).unwrap_or_default().to_string();
	let records =
		json.get("data").or_else(|| json.get("result")).and_then(Value::as_array).cloned();

	Ok(SearchOutcome { success, msg, records })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_tri_state_reply() {
		let json = serde_json::json!({
			"success": true,
			"msg": "ok",
			"data": [{ "id": "n1" }]
		});
		let outcome = parse_search_response(json).expect("parse failed");

		assert!(outcome.success);
		assert_eq!(outcome.msg, "ok");
		assert_eq!(outcome.records.expect("records missing").len(), 1);
	}

	#[test]
	fn accepts_result_as_records_key() {
		let json = serde_json::json!({ "success": true, "msg": "", "result": [] });
		let outcome = parse_search_response(json).expect("parse failed");

		assert_eq!(outcome.records, Some(vec![]));
	}

	#[test]
	fn non_array_records_become_none() {
		let json = serde_json::json!({ "success": true, "msg": "", "data": "oops" });
		let outcome = parse_search_response(json).expect("parse failed");

		assert!(outcome.records.is_none());
	}

	#[test]
	fn missing_success_flag_is_invalid() {
		let json = serde_json::json!({ "msg": "ok" });

		assert!(parse_search_response(json).is_err());
	}
}
