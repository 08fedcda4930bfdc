//! Access token held by the client.

use crate::config::ConfigStore;
use crate::error::ConfigError;

/// Configuration key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Credentials read from the configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
	access_token: Option<String>,
}

impl Credentials {
	/// Reads the stored token. A missing or blank value means "no token yet".
	pub fn load(config: &ConfigStore) -> Self {
		Self {
			access_token: config
				.get(ACCESS_TOKEN_KEY)
				.map(str::trim)
				.filter(|token| !token.is_empty())
				.map(str::to_string),
		}
	}

	pub fn access_token(&self) -> Option<&str> {
		self.access_token.as_deref()
	}

	pub fn has_token(&self) -> bool {
		self.access_token.is_some()
	}

	/// Writes `token` through to `config`, then adopts it in memory.
	///
	/// Nothing changes in memory if the write fails.
	pub fn persist(&mut self, config: &mut ConfigStore, token: &str) -> Result<(), ConfigError> {
		config.set(ACCESS_TOKEN_KEY, token)?;
		self.access_token = Some(token.to_string());
		Ok(())
	}

	/// Removes the stored token. Returns whether one was stored.
	pub fn clear(&mut self, config: &mut ConfigStore) -> Result<bool, ConfigError> {
		let removed = config.remove(ACCESS_TOKEN_KEY)?;
		self.access_token = None;
		Ok(removed)
	}
}
