use std::fmt;
use std::time::Instant;

use rocket::{Connector, Credentials, DependencyInstaller, PathSet, check_authentication};
use serde::Serialize;

use super::{open_config, write_paths};
use crate::error::Result;
use crate::output::{OutputFormat, emit_success};
use crate::settings::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
	pub paths: PathSet,
	pub has_token: bool,
	pub authenticated: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<String>,
	pub browser_installed: bool,
}

impl fmt::Display for StatusData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let auth = match (&self.user, self.has_token) {
			(Some(user), _) => format!("signed in as {user}"),
			(None, true) => "stored token not accepted".to_string(),
			(None, false) => "not signed in".to_string(),
		};
		let browser = if self.browser_installed { "installed" } else { "not installed" };

		writeln!(f, "Platform: {}", self.paths.platform)?;
		writeln!(f, "Account:  {auth}")?;
		writeln!(f, "Browser:  {browser}")?;
		write_paths(f, &self.paths)
	}
}

/// Never prompts and never installs.
pub async fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let (paths, config) = open_config(settings)?;
	let credentials = Credentials::load(&config);
	let client = settings.connector()?.connect(credentials.access_token());

	let user = check_authentication(&client).await;
	let browser_installed = settings.installer().is_installed(&paths);

	let data = StatusData {
		has_token: credentials.has_token(),
		authenticated: user.is_some(),
		user: user.map(|user| user.display_name()),
		browser_installed,
		paths,
	};
	emit_success("status", data, started, format);
	Ok(())
}
