use serde::Serialize;

pub const EXPLORE_URL_PREFIX: &str = "https://www.xiaohongshu.com/explore/";

/// Placeholder sentiment. Real scores are filled in by the analysis worker
/// downstream; this service only echoes a neutral stand-in.
pub const SENTIMENT_SCORE_PLACEHOLDER: f32 = 0.5;
pub const SENTIMENT_LABEL_PLACEHOLDER: &str = "neutral";

/// Canonical, schema-stable post shape returned by the service. Every text
/// field has a terminal default; none is ever null on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Post {
	pub post_id: String,
	pub title: String,
	pub content: String,
	pub author: String,
	pub url: String,
	pub keyword: String,
	pub sentiment_score: f32,
	pub sentiment_label: String,
	pub likes: u64,
	pub created_at: String,
}

/// The post URL is a pure function of the note id.
pub fn explore_url(post_id: &str) -> String {
	format!("{EXPLORE_URL_PREFIX}{post_id}")
}
