use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use rocket::Credentials;
use serde::Serialize;
use tracing::info;

use super::open_config;
use crate::error::Result;
use crate::output::{OutputFormat, emit_success};
use crate::settings::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutData {
	pub removed: bool,
	pub config_file: PathBuf,
}

impl fmt::Display for LogoutData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.removed {
			write!(f, "Access token removed from {}", self.config_file.display())
		} else {
			write!(f, "No access token stored in {}", self.config_file.display())
		}
	}
}

pub fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let (paths, mut config) = open_config(settings)?;

	let removed = Credentials::load(&config).clear(&mut config)?;
	info!(target = "rocket", removed, "logout");

	let data = LogoutData {
		removed,
		config_file: paths.config_file,
	};
	emit_success("logout", data, started, format);
	Ok(())
}
