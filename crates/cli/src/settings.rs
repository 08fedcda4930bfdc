//! Effective settings: command-line flag, then environment, then default.

use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use rocket::{
	API_URL_ENV, BROWSER_VERSION_ENV, BootstrapOptions, BrowserInstaller, DATA_DIR_ENV, DEFAULT_API_URL,
	HttpConnector, LoginPrompt,
};

use crate::cli::SettingsArgs;
use crate::error::Result;
use crate::prompt::{NoInputPrompt, TerminalPrompt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub options: BootstrapOptions,
	pub api_url: String,
	pub browser_version: Option<String>,
	pub interactive: bool,
}

impl Settings {
	/// Resolves `args` against the process environment.
	pub fn resolve(args: &SettingsArgs) -> Self {
		Self::resolve_with(args, |key| std::env::var_os(key))
	}

	fn resolve_with(args: &SettingsArgs, env: impl Fn(&str) -> Option<OsString>) -> Self {
		let env_string = |key: &str| {
			env(key)
				.and_then(|value| value.into_string().ok())
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty())
		};

		let mut options = BootstrapOptions::default();
		if let Some(app_name) = &args.app_name {
			options = options.with_app_name(app_name.clone());
		}
		if let Some(system) = &args.system {
			options = options.with_system_name(system.clone());
		}
		let data_dir = args
			.data_dir
			.clone()
			.or_else(|| env(DATA_DIR_ENV).filter(|dir| !dir.is_empty()).map(PathBuf::from));
		options = options.with_data_dir(data_dir);

		Self {
			options,
			api_url: args
				.api_url
				.clone()
				.or_else(|| env_string(API_URL_ENV))
				.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
			browser_version: args.browser_version.clone().or_else(|| env_string(BROWSER_VERSION_ENV)),
			interactive: !args.no_input,
		}
	}

	pub fn connector(&self) -> Result<HttpConnector> {
		Ok(HttpConnector::new(&self.api_url)?)
	}

	pub fn installer(&self) -> BrowserInstaller {
		BrowserInstaller::new().with_version(self.browser_version.clone())
	}

	/// Terminal prompt on stdin/stderr, or one that cancels at once when
	/// input is disabled.
	pub fn prompt(&self) -> Box<dyn LoginPrompt> {
		if self.interactive {
			let mask_password = std::io::stdin().is_terminal();
			Box::new(TerminalPrompt::new(std::io::stdin().lock(), std::io::stderr()).mask_password(mask_password))
		} else {
			Box::new(NoInputPrompt)
		}
	}
}
