use rocket::{BootstrapError, ClientError, ConfigError, InstallFailure};
use serde_json::json;
use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, RocketError>;

#[derive(Debug, Error)]
pub enum RocketError {
	#[error(transparent)]
	Bootstrap(#[from] BootstrapError),

	#[error(transparent)]
	Client(#[from] ClientError),

	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl RocketError {
	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let message = self.to_string();
		let (code, details) = match self {
			RocketError::Bootstrap(err) => classify_bootstrap(err),
			RocketError::Client(err) => classify_client(err),
			RocketError::Config(_) => (ErrorCode::ConfigError, None),
		};

		CommandError {
			code,
			message,
			details,
		}
	}
}

fn classify_bootstrap(err: &BootstrapError) -> (ErrorCode, Option<serde_json::Value>) {
	match err {
		BootstrapError::UnsupportedPlatform { system, .. } => {
			(ErrorCode::UnsupportedPlatform, Some(json!({ "system": system })))
		}
		BootstrapError::DirectoryProvisioning { path, .. } => {
			(ErrorCode::IoError, Some(json!({ "path": path.display().to_string() })))
		}
		BootstrapError::ConfigLoad(_) | BootstrapError::ConfigPersist(_) => (ErrorCode::ConfigError, None),
		BootstrapError::AuthenticationAborted => (ErrorCode::AuthAborted, None),
		BootstrapError::DependencyInstall(InstallFailure::Runtime(cause)) if cause.is_network() => {
			(ErrorCode::NetworkError, None)
		}
		BootstrapError::DependencyInstall(_) => (ErrorCode::InstallFailed, None),
	}
}

fn classify_client(err: &ClientError) -> (ErrorCode, Option<serde_json::Value>) {
	match err {
		ClientError::InvalidUrl { url, .. } => (ErrorCode::InvalidInput, Some(json!({ "url": url }))),
		ClientError::Transport(_) => (ErrorCode::NetworkError, None),
		ClientError::Status { status, .. } => (ErrorCode::AuthError, Some(json!({ "status": status }))),
		ClientError::Build(_) | ClientError::Decode(_) => (ErrorCode::InternalError, None),
	}
}
