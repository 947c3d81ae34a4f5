use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub upstream: Upstream,
	pub credential: CredentialSources,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { http_bind: "0.0.0.0:8000".to_string(), log_level: "info".to_string() }
	}
}

/// The crawler sidecar this service delegates the authenticated search call
/// to. The sidecar owns signing and anti-bot evasion; only its address and
/// the request timeout are configured here.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Upstream {
	pub api_base: String,
	pub search_path: String,
	pub timeout_ms: u64,
}
impl Default for Upstream {
	fn default() -> Self {
		Self {
			api_base: "http://127.0.0.1:5005".to_string(),
			search_path: "/api/search".to_string(),
			timeout_ms: 30_000,
		}
	}
}

/// Where the session cookie may come from. `env_var` is checked first, then
/// `env_file` is scanned for the recognized keys.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CredentialSources {
	pub env_var: String,
	pub env_file: PathBuf,
}
impl Default for CredentialSources {
	fn default() -> Self {
		Self { env_var: "XHS_COOKIE".to_string(), env_file: PathBuf::from(".env") }
	}
}
