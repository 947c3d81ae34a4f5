use serde::Deserialize;
use serde_json::Value;

use crate::{Error, MAX_POSTS_CEILING, Result, SearchService};
use xhs_domain::{Post, normalize::normalize, sort::sort_code};

#[derive(Clone, Debug, Deserialize)]
pub struct SearchRequest {
	pub keyword: String,
	#[serde(default = "default_max_posts")]
	pub max_posts: u32,
	#[serde(default = "default_sort_type")]
	pub sort_type: String,
}

fn default_max_posts() -> u32 {
	20
}

fn default_sort_type() -> String {
	"general".to_string()
}

impl SearchService {
	/// One keyword search: validate, resolve the credential, call the
	/// sidecar, interpret its tri-state reply, normalize. Records come back
	/// in upstream order; any ordering guarantee comes from the sort code
	/// sent along, never from local re-sorting.
	pub async fn search(&self, request: SearchRequest) -> Result<Vec<Post>> {
		let keyword = request.keyword.trim();

		if keyword.is_empty() {
			return Err(Error::InvalidRequest {
				message: "keyword must be non-empty.".to_string(),
			});
		}
		if request.max_posts == 0 {
			return Err(Error::InvalidRequest {
				message: "max_posts must be greater than zero.".to_string(),
			});
		}

		let max_posts = request.max_posts.min(MAX_POSTS_CEILING);
		let Some(credential) = self.resolver().resolve() else {
			return Err(Error::CredentialMissing);
		};

		tracing::info!(keyword, max_posts, sort_type = %request.sort_type, "Search started.");

		let outcome = self
			.provider
			.search_notes(
				&self.cfg.upstream,
				keyword,
				max_posts,
				&credential,
				sort_code(&request.sort_type),
			)
			.await?;

		if !outcome.success {
			tracing::warn!(keyword, msg = %outcome.msg, "Sidecar reported failure.");

			return Err(Error::Upstream { message: outcome.msg });
		}

		let records = match outcome.records {
			Some(records) if !records.is_empty() => records,
			_ => {
				tracing::info!(keyword, "Sidecar returned no records.");

				return Err(Error::NoResults);
			},
		};

		if let Some(first) = records.first() {
			tracing::debug!(keys = ?record_keys(first), "First raw record shape.");
		}

		let posts: Vec<Post> = records
			.iter()
			.take(max_posts as usize)
			.map(|record| normalize(record, keyword))
			.collect();

		tracing::info!(keyword, returned = posts.len(), "Search finished.");

		Ok(posts)
	}
}

fn record_keys(record: &Value) -> Vec<&str> {
	record.as_object().map(|map| map.keys().map(String::as_str).collect()).unwrap_or_default()
}
