//! Per-user file layout.
//!
//! Every path is derived from the platform and the data directory; nothing
//! here depends on the current working directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rocket_runtime::{BROWSER_DIR_NAME, BrowserLayout, Platform};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BootstrapError, Result};

/// Application name used for the data directory when none is configured.
pub const DEFAULT_APP_NAME: &str = "TikTokRocket-core";

/// Name of the key/value configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.env";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "ROCKET_DATA_DIR";

/// Resolved locations of everything the client keeps on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSet {
	pub platform: Platform,
	pub data_dir: PathBuf,
	pub browser_dir: PathBuf,
	pub browser_executable: PathBuf,
	pub driver_executable: PathBuf,
	pub config_file: PathBuf,
}

impl PathSet {
	/// Derives the full layout under `data_dir`. No I/O.
	pub fn new(platform: Platform, data_dir: impl Into<PathBuf>) -> Self {
		let data_dir = data_dir.into();
		let layout = BrowserLayout::new(platform, data_dir.join(BROWSER_DIR_NAME));
		Self {
			platform,
			config_file: data_dir.join(CONFIG_FILE_NAME),
			browser_dir: layout.browser_dir,
			browser_executable: layout.browser_executable,
			driver_executable: layout.driver_executable,
			data_dir,
		}
	}

	/// Derives the layout under the per-user data directory of `app_name`.
	pub fn for_app(platform: Platform, app_name: &str) -> Result<Self> {
		Ok(Self::new(platform, default_data_dir(app_name)?))
	}

	/// Browser/driver part of the layout, as the installer sees it.
	pub fn browser_layout(&self) -> BrowserLayout {
		BrowserLayout {
			browser_dir: self.browser_dir.clone(),
			browser_executable: self.browser_executable.clone(),
			driver_executable: self.driver_executable.clone(),
		}
	}

	/// Creates the data directory, then the browser directory.
	///
	/// Directories that already exist are left alone, so running this twice
	/// is harmless.
	pub fn provision(&self) -> Result<()> {
		for dir in [&self.data_dir, &self.browser_dir] {
			ensure_dir(dir)?;
		}
		Ok(())
	}
}

/// Per-user local data directory for `app_name`.
///
/// Resolves to `~/.local/share/<app>` on Linux, `~/Library/Application
/// Support/<app>` on macOS and `%LOCALAPPDATA%\<app>` on Windows.
pub fn default_data_dir(app_name: &str) -> Result<PathBuf> {
	dirs::data_local_dir()
		.map(|base| base.join(app_name))
		.ok_or_else(|| BootstrapError::DirectoryProvisioning {
			path: PathBuf::from(app_name),
			source: io::Error::new(io::ErrorKind::NotFound, "no per-user data directory on this host"),
		})
}

fn ensure_dir(dir: &Path) -> Result<()> {
	debug!(target = "rocket", dir = %dir.display(), "ensuring directory");
	fs::create_dir_all(dir).map_err(|source| BootstrapError::DirectoryProvisioning {
		path: dir.to_path_buf(),
		source,
	})?;
	info!(target = "rocket", dir = %dir.display(), "directory ready");
	Ok(())
}
