use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use rocket::{Connector, Credentials, run_login};
use serde::Serialize;

use super::open_config;
use crate::error::Result;
use crate::output::{OutputFormat, emit_success};
use crate::settings::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
	pub config_file: PathBuf,
}

impl fmt::Display for LoginData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Access token saved to {}", self.config_file.display())
	}
}

/// Shows the login form even when the stored token is still valid.
pub async fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let (paths, mut config) = open_config(settings)?;
	let mut credentials = Credentials::load(&config);
	let client = settings.connector()?.connect(credentials.access_token());
	let mut prompt = settings.prompt();

	run_login(&client, prompt.as_mut(), &mut config, &mut credentials).await?;

	let data = LoginData {
		config_file: paths.config_file,
	};
	emit_success("login", data, started, format);
	Ok(())
}
