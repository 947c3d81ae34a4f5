mod credential;
mod error;
mod types;

pub use credential::{Credential, CredentialResolver, CredentialSource};
pub use error::{Error, Result};
pub use types::{Config, CredentialSources, Service, Upstream};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a valid socket address.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.upstream.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "upstream.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.upstream.search_path.trim().is_empty() {
		return Err(Error::Validation {
			message: "upstream.search_path must be non-empty.".to_string(),
		});
	}
	if cfg.upstream.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "upstream.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.credential.env_var.trim().is_empty() {
		return Err(Error::Validation {
			message: "credential.env_var must be non-empty.".to_string(),
		});
	}
	if cfg.credential.env_file.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "credential.env_file must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.upstream.api_base.ends_with('/') {
		cfg.upstream.api_base.pop();
	}
}
