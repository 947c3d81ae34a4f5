use std::{env, fmt, fs, path::PathBuf};

use crate::types::CredentialSources;

/// Primary key recognized in the env file.
const FILE_KEY_PRIMARY: &str = "XHS_COOKIE";
/// Legacy alias still present in older deployments.
const FILE_KEY_LEGACY: &str = "COOKIES";

/// Which source produced the credential. Diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSource {
	Environment,
	EnvFile,
}

/// Opaque session cookie for the crawler sidecar. The value stays out of
/// logs and responses; `Debug` prints its length only.
#[derive(Clone)]
pub struct Credential {
	token: String,
	source: CredentialSource,
}
impl Credential {
	pub fn token(&self) -> &str {
		&self.token
	}

	pub fn source(&self) -> CredentialSource {
		self.source
	}
}
impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credential")
			.field("source", &self.source)
			.field("len", &self.token.len())
			.finish()
	}
}

/// Resolves the active credential from an ordered set of sources: the
/// environment variable first, then the env file. Holds no state beyond the
/// source names, so callers re-resolve on every request and a rotated cookie
/// takes effect without a restart.
#[derive(Clone, Debug)]
pub struct CredentialResolver {
	env_var: String,
	env_file: PathBuf,
}
impl CredentialResolver {
	pub fn new(env_var: impl Into<String>, env_file: impl Into<PathBuf>) -> Self {
		Self { env_var: env_var.into(), env_file: env_file.into() }
	}

	pub fn from_sources(sources: &CredentialSources) -> Self {
		Self::new(sources.env_var.clone(), sources.env_file.clone())
	}

	pub fn resolve(&self) -> Option<Credential> {
		if let Some(token) = env_value(&self.env_var) {
			tracing::info!(source = "environment", len = token.len(), "Credential resolved.");

			return Some(Credential { token, source: CredentialSource::Environment });
		}
		if let Some(token) = self.file_value() {
			tracing::info!(source = "env_file", len = token.len(), "Credential resolved.");

			return Some(Credential { token, source: CredentialSource::EnvFile });
		}

		tracing::error!(
			env_var = %self.env_var,
			env_file = %self.env_file.display(),
			"Credential not configured."
		);

		None
	}

	/// Scan the env file for `KEY=VALUE` lines. The primary key is preferred
	/// over the legacy alias regardless of line order; within one key the
	/// first non-empty value wins.
	fn file_value(&self) -> Option<String> {
		let raw = fs::read_to_string(&self.env_file).ok()?;
		let mut primary = None;
		let mut legacy = None;

		for line in raw.lines() {
			let Some((key, value)) = line.split_once('=') else {
				continue;
			};
			let value = unquote(value.trim());

			if value.is_empty() {
				continue;
			}

			match key.trim() {
				FILE_KEY_PRIMARY if primary.is_none() => primary = Some(value.to_string()),
				FILE_KEY_LEGACY if legacy.is_none() => legacy = Some(value.to_string()),
				_ => {},
			}
		}

		primary.or(legacy)
	}
}

fn env_value(key: &str) -> Option<String> {
	env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Strip one level of matching surrounding quotes.
fn unquote(value: &str) -> &str {
	for quote in ['"', '\''] {
		if let Some(inner) =
			value.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote))
		{
			return inner;
		}
	}

	value
}
