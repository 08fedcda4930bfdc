//! Host platform detection and the per-platform browser layout.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Directory under the data directory that holds the browser and driver.
pub const BROWSER_DIR_NAME: &str = "selenium-browser";

/// Operating systems the client runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	Windows,
	Linux,
	#[serde(rename = "macos")]
	MacOs,
}

impl Platform {
	/// Matches a system name (`Windows`, `Linux`, `Darwin`) case-insensitively.
	///
	/// # Errors
	///
	/// Returns [`Error::UnsupportedPlatform`] for anything else.
	pub fn from_system_name(name: &str) -> Result<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"windows" => Ok(Platform::Windows),
			"linux" => Ok(Platform::Linux),
			"darwin" => Ok(Platform::MacOs),
			_ => Err(Error::UnsupportedPlatform(name.to_string())),
		}
	}

	/// Conventional system name, as reported by `uname -s` and friends.
	pub fn system_name(self) -> &'static str {
		match self {
			Platform::Windows => "Windows",
			Platform::Linux => "Linux",
			Platform::MacOs => "Darwin",
		}
	}

	/// Browser executable, relative to the browser directory.
	pub fn browser_executable(self) -> &'static str {
		match self {
			Platform::Windows => "chrome.exe",
			Platform::Linux => "chrome",
			Platform::MacOs => "Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing",
		}
	}

	/// Driver executable, relative to the browser directory.
	pub fn driver_executable(self) -> &'static str {
		match self {
			Platform::Windows => "chromedriver.exe",
			Platform::Linux | Platform::MacOs => "chromedriver",
		}
	}

	/// Chrome for Testing download target for this platform on `arch`.
	///
	/// `arch` uses the `std::env::consts::ARCH` vocabulary.
	pub fn download_target(self, arch: &str) -> Result<&'static str> {
		match (self, arch) {
			(Platform::Windows, "x86_64") => Ok("win64"),
			(Platform::Windows, "x86") => Ok("win32"),
			(Platform::Linux, "x86_64") => Ok("linux64"),
			(Platform::MacOs, "aarch64") => Ok("mac-arm64"),
			(Platform::MacOs, "x86_64") => Ok("mac-x64"),
			_ => Err(Error::UnsupportedArchitecture {
				platform: self.system_name(),
				arch: arch.to_string(),
			}),
		}
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.system_name())
	}
}

/// System name of the running host.
///
/// Supported hosts map to the names [`Platform::from_system_name`] accepts;
/// anything else is passed through so validation can report it.
pub fn host_system_name() -> String {
	match std::env::consts::OS {
		"windows" => "Windows".to_string(),
		"linux" => "Linux".to_string(),
		"macos" => "Darwin".to_string(),
		other => other.to_string(),
	}
}

/// Resolved on-disk locations of the browser/driver pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserLayout {
	pub browser_dir: PathBuf,
	pub browser_executable: PathBuf,
	pub driver_executable: PathBuf,
}

impl BrowserLayout {
	/// Resolves the executables for `platform` under `browser_dir`. No I/O.
	pub fn new(platform: Platform, browser_dir: impl Into<PathBuf>) -> Self {
		let browser_dir = browser_dir.into();
		Self {
			browser_executable: browser_dir.join(platform.browser_executable()),
			driver_executable: browser_dir.join(platform.driver_executable()),
			browser_dir,
		}
	}

	/// True when both executables exist. Existence only, no version check.
	pub fn is_complete(&self) -> bool {
		exists(&self.browser_executable) && exists(&self.driver_executable)
	}
}

fn exists(path: &Path) -> bool {
	path.try_exists().unwrap_or(false)
}
