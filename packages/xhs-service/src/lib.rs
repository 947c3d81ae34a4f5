pub mod probe;
pub mod search;

mod error;

pub use error::{Error, Result};
pub use probe::{HealthResponse, TestConnectionResponse, TestPost};
pub use search::SearchRequest;

use std::sync::Arc;

use xhs_config::{Config, CredentialResolver};
use xhs_spider::{SearchProvider, Sidecar};

/// Practical upper bound on posts returned by one search; larger requests
/// are clamped, not rejected.
pub const MAX_POSTS_CEILING: u32 = 50;

/// Stateless per-request search over the crawler sidecar. Holds only
/// process-immutable configuration and the injected provider; every request
/// re-resolves the credential.
pub struct SearchService {
	pub cfg: Config,
	pub provider: Arc<dyn SearchProvider>,
}
impl SearchService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, provider: Arc::new(Sidecar) }
	}

	pub fn with_provider(cfg: Config, provider: Arc<dyn SearchProvider>) -> Self {
		Self { cfg, provider }
	}

	/// Fresh resolver per call so credential rotation never requires a
	/// restart.
	pub(crate) fn resolver(&self) -> CredentialResolver {
		CredentialResolver::from_sources(&self.cfg.credential)
	}
}
