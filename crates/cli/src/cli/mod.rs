
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Root CLI for rocket.
#[derive(Parser, Debug)]
#[command(name = "rocket")]
#[command(about = "Prepare the automation client: sign in and install the browser")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: text (default), json, or toon
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	#[command(flatten)]
	pub settings: SettingsArgs,

	#[command(subcommand)]
	pub command: Option<Commands>,
}

impl Cli {
	/// Subcommand to run; bare `rocket` means `rocket init`.
	pub fn command(&self) -> Commands {
		self.command.unwrap_or(Commands::Init)
	}
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsArgs {
	/// Application name used for the per-user data directory
	#[arg(long, global = true, value_name = "NAME")]
	pub app_name: Option<String>,

	/// Data directory (overrides the per-user default and ROCKET_DATA_DIR)
	#[arg(long, global = true, value_name = "DIR")]
	pub data_dir: Option<PathBuf>,

	/// Identity service base URL (overrides ROCKET_API_URL)
	#[arg(long, global = true, value_name = "URL")]
	pub api_url: Option<String>,

	/// Browser version to install instead of the latest stable build
	#[arg(long, global = true, value_name = "VERSION")]
	pub browser_version: Option<String>,

	/// Never prompt; a required login fails instead
	#[arg(long, global = true)]
	pub no_input: bool,

	/// Pretend to run on another system (Windows, Linux, Darwin)
	#[arg(long, global = true, hide = true, value_name = "NAME")]
	pub system: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
	/// Run the full startup sequence (default).
	Init,
	/// Sign in again and store the new access token.
	Login,
	/// Forget the stored access token.
	Logout,
	/// Show where data, browser and configuration live.
	Paths,
	/// Report sign-in and browser state without changing anything remote.
	Status,
}

impl Commands {
	pub fn name(self) -> &'static str {
		match self {
			Commands::Init => "init",
			Commands::Login => "login",
			Commands::Logout => "logout",
			Commands::Paths => "paths",
			Commands::Status => "status",
		}
	}
}
