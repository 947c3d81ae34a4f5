mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU32, AtomicUsize, Ordering},
};

use serde_json::{Value, json};
use uuid::Uuid;

use xhs_config::{Config, Credential, Upstream};
use xhs_spider::{BoxFuture, SearchOutcome, SearchProvider};

/// Temp env file for credential tests; removed again on drop.
pub struct EnvFile {
	path: PathBuf,
}
impl EnvFile {
	pub fn write(payload: &str) -> Result<Self> {
		let path = env::temp_dir().join(format!("xhs_test_{}.env", Uuid::new_v4().simple()));

		fs::write(&path, payload)
			.map_err(|err| Error::Message(format!("Failed to write test env file: {err}.")))?;

		Ok(Self { path })
	}

	/// An env file carrying one valid cookie under the primary key.
	pub fn with_cookie(token: &str) -> Result<Self> {
		Self::write(&format!("XHS_COOKIE={token}\n"))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}
impl Drop for EnvFile {
	fn drop(&mut self) {
		let _ = fs::remove_file(&self.path);
	}
}

/// Default config pointed at the given env file, with a unique credential
/// env var name so an ambient `XHS_COOKIE` on the host never leaks into a
/// test.
pub fn test_config(env_file: &Path) -> Config {
	let mut cfg = Config::default();

	cfg.credential.env_var = format!("XHS_COOKIE_TEST_{}", Uuid::new_v4().simple());
	cfg.credential.env_file = env_file.to_path_buf();

	cfg
}

/// Like [`test_config`], but with a path no file exists at, so no
/// credential resolves.
pub fn unconfigured_config() -> Config {
	let missing = env::temp_dir().join(format!("xhs_missing_{}.env", Uuid::new_v4().simple()));

	test_config(&missing)
}

/// Canned sidecar outcomes plus call/argument recording.
pub struct StubProvider {
	outcome: SearchOutcome,
	calls: AtomicUsize,
	last_require_num: AtomicU32,
}
impl StubProvider {
	pub fn with_outcome(outcome: SearchOutcome) -> Self {
		Self { outcome, calls: AtomicUsize::new(0), last_require_num: AtomicU32::new(0) }
	}

	pub fn success(records: Vec<Value>) -> Self {
		Self::with_outcome(SearchOutcome {
			success: true,
			msg: "ok".to_string(),
			records: Some(records),
		})
	}

	pub fn failure(msg: impl Into<String>) -> Self {
		Self::with_outcome(SearchOutcome { success: false, msg: msg.into(), records: None })
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_require_num(&self) -> u32 {
		self.last_require_num.load(Ordering::SeqCst)
	}
}
impl SearchProvider for StubProvider {
	fn search_notes<'a>(
		&'a self,
		_cfg: &'a Upstream,
		_keyword: &'a str,
		require_num: u32,
		_credential: &'a Credential,
		_sort_code: u8,
	) -> BoxFuture<'a, xhs_spider::Result<SearchOutcome>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.last_require_num.store(require_num, Ordering::SeqCst);

		let outcome = self.outcome.clone();

		Box::pin(async move { Ok(outcome) })
	}
}

/// Always fails with a transport-level fault.
pub struct FaultyProvider {
	pub message: String,
}
impl SearchProvider for FaultyProvider {
	fn search_notes<'a>(
		&'a self,
		_cfg: &'a Upstream,
		_keyword: &'a str,
		_require_num: u32,
		_credential: &'a Credential,
		_sort_code: u8,
	) -> BoxFuture<'a, xhs_spider::Result<SearchOutcome>> {
		let message = self.message.clone();

		Box::pin(async move { Err(xhs_spider::Error::InvalidResponse { message }) })
	}
}

// Raw-record fixtures, one per observed upstream schema generation.

pub fn note_card_record(id: &str, title: &str) -> Value {
	json!({
		"id": id,
		"note_card": {
			"display_title": title,
			"desc": "fixture",
			"user": { "nickname": "tester" },
			"interact_info": { "liked_count": 3 },
			"time": "2024-01-01"
		}
	})
}

pub fn model_nested_record(id: &str, title: &str) -> Value {
	json!({
		"id": id,
		"model": {
			"note_card": {
				"display_title": title,
				"desc": "fixture",
				"user": { "nickname": "tester" },
				"interact_info": { "liked_count": 3 },
				"time": "2024-01-01"
			}
		}
	})
}

pub fn flat_record(id: &str, title: &str) -> Value {
	json!({
		"id": id,
		"display_title": title,
		"desc": "fixture",
		"user": { "nickname": "tester" },
		"interact_info": { "liked_count": 3 },
		"time": "2024-01-01"
	})
}
