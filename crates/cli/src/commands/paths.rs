use std::fmt;
use std::time::Instant;

use rocket::PathSet;
use serde::Serialize;

use super::write_paths;
use crate::error::Result;
use crate::output::{OutputFormat, emit_success};
use crate::settings::Settings;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct PathsData(pub PathSet);

impl fmt::Display for PathsData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Paths for {}", self.0.platform)?;
		write_paths(f, &self.0)
	}
}

/// Nothing is created on disk.
pub fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let platform = settings.options.platform()?;
	let paths = settings.options.resolve_paths(platform)?;

	emit_success("paths", PathsData(paths), started, format);
	Ok(())
}
