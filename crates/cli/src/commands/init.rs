use std::fmt;
use std::time::Instant;

use rocket::{Bootstrapper, HttpAuthClient, PathSet, Session};
use serde::Serialize;

use super::write_paths;
use crate::error::Result;
use crate::output::{OutputFormat, emit_success};
use crate::progress::TerminalProgress;
use crate::settings::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitData {
	pub paths: PathSet,
	pub signed_in: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<String>,
}

impl From<&Session<HttpAuthClient>> for InitData {
	fn from(session: &Session<HttpAuthClient>) -> Self {
		Self {
			paths: session.paths().clone(),
			signed_in: session.access_token().is_some(),
			user: session.user().map(|user| user.display_name()),
		}
	}
}

impl fmt::Display for InitData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Ready on {}", self.paths.platform)?;
		match &self.user {
			Some(user) => writeln!(f, "  user:     {user}")?,
			None if self.signed_in => writeln!(f, "  user:     signed in")?,
			None => {}
		}
		write_paths(f, &self.paths)
	}
}

pub async fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let connector = settings.connector()?;
	let mut prompt = settings.prompt();

	let session = Bootstrapper::new(settings.options.clone(), connector, settings.installer(), prompt.as_mut())
		.with_progress(TerminalProgress)
		.run()
		.await
		.into_result()?;

	emit_success("init", InitData::from(&session), started, format);
	Ok(())
}
