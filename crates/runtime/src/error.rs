//! Error types for the browser runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while detecting the host or installing the browser.
#[derive(Debug, Error)]
pub enum Error {
	/// Host operating system is not one of Windows, Linux or macOS.
	#[error("unsupported operating system: {0} (supported: Windows, Linux, Darwin)")]
	UnsupportedPlatform(String),

	/// No browser build is published for this CPU architecture.
	#[error("no Chrome for Testing build for {platform} on {arch}")]
	UnsupportedArchitecture { platform: &'static str, arch: String },

	/// HTTP client could not be constructed.
	#[error("failed to create HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	/// Request failed before a response was received.
	#[error("request to {url} failed: {source}")]
	Http {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	/// Server answered with a non-success status.
	#[error("{url} returned status {status}")]
	HttpStatus { url: String, status: u16 },

	/// Version manifest did not list the requested channel.
	#[error("no {channel} version listed in {url}")]
	VersionNotFound { channel: String, url: String },

	/// Downloaded archive could not be read.
	#[error("archive error: {0}")]
	Archive(#[from] zip::result::ZipError),

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Blocking extraction worker panicked or was cancelled.
	#[error("extraction task failed: {0}")]
	Task(String),
}

impl Error {
	/// Returns true if the failure happened on the network rather than on disk.
	pub fn is_network(&self) -> bool {
		matches!(self, Error::Http { .. } | Error::HttpStatus { .. } | Error::VersionNotFound { .. })
	}
}
