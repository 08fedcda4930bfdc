//! Error types for bootstrap and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Fatal bootstrap failures. Each one aborts the remaining steps.
#[derive(Debug, Error)]
pub enum BootstrapError {
	/// Host is not Windows, Linux or macOS.
	#[error("{app} supports only Windows, Linux and macOS (host reports {system:?})")]
	UnsupportedPlatform { app: String, system: String },

	/// Data or browser directory could not be created.
	#[error("failed to create directory {}: {source}", path.display())]
	DirectoryProvisioning {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Configuration file could not be opened or created.
	#[error("failed to load configuration: {0}")]
	ConfigLoad(#[source] ConfigError),

	/// A freshly issued access token could not be written back.
	#[error("failed to save access token: {0}")]
	ConfigPersist(#[source] ConfigError),

	/// The user closed the login prompt without signing in.
	#[error("login was cancelled")]
	AuthenticationAborted,

	/// Browser/driver installation failed or left the pair incomplete.
	#[error("browser installation failed: {0}")]
	DependencyInstall(#[source] InstallFailure),
}

/// Why the dependency step failed.
#[derive(Debug, Error)]
pub enum InstallFailure {
	/// Installer ran but the executables are still missing.
	#[error("installer finished without producing the browser and driver executables")]
	Incomplete,

	#[error(transparent)]
	Runtime(#[from] rocket_runtime::Error),
}

/// Errors raised by the configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("cannot read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Keys must be non-empty and free of `=`, whitespace and `#`.
	#[error("invalid configuration key: {0:?}")]
	InvalidKey(String),
}

/// Errors raised by identity service calls.
#[derive(Debug, Error)]
pub enum ClientError {
	/// API base URL could not be parsed.
	#[error("invalid API URL {url:?}: {message}")]
	InvalidUrl { url: String, message: String },

	/// HTTP client could not be constructed.
	#[error("failed to create HTTP client: {0}")]
	Build(#[source] reqwest::Error),

	/// Request failed before a response was received.
	#[error("identity service unreachable: {0}")]
	Transport(#[from] reqwest::Error),

	/// Service answered with an unexpected status.
	#[error("identity service returned status {status}{}", if body.is_empty() { String::new() } else { format!(": {body}") })]
	Status { status: u16, body: String },

	/// Response body was not the expected JSON.
	#[error("unexpected response from identity service: {0}")]
	Decode(#[from] serde_json::Error),
}
