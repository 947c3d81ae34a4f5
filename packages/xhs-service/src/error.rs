pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Local and non-retryable; the operator must configure a cookie.
	#[error(
		"Cookie credential not configured. Set the XHS_COOKIE environment variable or add XHS_COOKIE=... to the env file."
	)]
	CredentialMissing,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	/// The sidecar explicitly reported failure; its message is forwarded
	/// verbatim.
	#[error("Search failed: {message}")]
	Upstream { message: String },
	/// The sidecar succeeded but returned nothing usable. A not-found case,
	/// not a service fault.
	#[error("No matching posts found.")]
	NoResults,
	/// Transport faults, malformed sidecar replies, anything else.
	#[error("Search failed: {message}")]
	Unexpected { message: String },
}
impl From<xhs_spider::Error> for Error {
	fn from(err: xhs_spider::Error) -> Self {
		Self::Unexpected { message: err.to_string() }
	}
}
