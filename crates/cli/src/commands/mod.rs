//! Command implementations.
//!
//! Each command runs a prefix of the bootstrap sequence:
//!
//! * [`init`] - the whole sequence
//! * [`login`] - up to the client, then the login form unconditionally
//! * [`logout`] - up to the configuration, then drops the token
//! * [`paths`] - platform check and path resolution, no side effects
//! * [`status`] - up to the client, then read-only checks

pub mod init;
pub mod login;
pub mod logout;
pub mod paths;
pub mod status;

use std::fmt;

use rocket::{ConfigStore, PathSet, load_config};

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::settings::Settings;

pub async fn dispatch(cli: Cli) -> Result<()> {
	let settings = Settings::resolve(&cli.settings);
	let format = cli.format;

	match cli.command() {
		Commands::Init => init::execute(&settings, format).await,
		Commands::Login => login::execute(&settings, format).await,
		Commands::Logout => logout::execute(&settings, format),
		Commands::Paths => paths::execute(&settings, format),
		Commands::Status => status::execute(&settings, format).await,
	}
}

/// Validates the platform, provisions the directories and opens the
/// configuration file.
fn open_config(settings: &Settings) -> Result<(PathSet, ConfigStore)> {
	let platform = settings.options.platform()?;
	let paths = settings.options.resolve_paths(platform)?;
	paths.provision()?;
	let config = load_config(&paths)?;
	Ok((paths, config))
}

fn write_paths(f: &mut fmt::Formatter<'_>, paths: &PathSet) -> fmt::Result {
	writeln!(f, "  data dir: {}", paths.data_dir.display())?;
	writeln!(f, "  browser:  {}", paths.browser_executable.display())?;
	writeln!(f, "  driver:   {}", paths.driver_executable.display())?;
	write!(f, "  config:   {}", paths.config_file.display())
}
