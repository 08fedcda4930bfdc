//! Browser/driver dependency contract.

use async_trait::async_trait;
use rocket_runtime::{ChromeInstaller, DownloadSources};
use tracing::debug;

use crate::paths::PathSet;

/// Environment variable that pins the browser version.
pub const BROWSER_VERSION_ENV: &str = "ROCKET_BROWSER_VERSION";

/// Detects and installs the browser/driver pair.
#[async_trait]
pub trait DependencyInstaller: Send + Sync {
	/// True when both executables exist. Versions are not checked.
	fn is_installed(&self, paths: &PathSet) -> bool;

	/// Installs the pair into the browser directory.
	///
	/// Returns whether both executables are present afterwards.
	async fn install(&self, paths: &PathSet) -> rocket_runtime::Result<bool>;
}

/// Chrome for Testing installer.
///
/// The download target is chosen from the platform in the [`PathSet`] at
/// install time, so an unsupported CPU architecture only matters once an
/// install is actually needed.
#[derive(Debug, Clone, Default)]
pub struct BrowserInstaller {
	sources: DownloadSources,
	version: Option<String>,
}

impl BrowserInstaller {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_sources(mut self, sources: DownloadSources) -> Self {
		self.sources = sources;
		self
	}

	/// Pins the version instead of installing the latest stable build.
	pub fn with_version(mut self, version: Option<String>) -> Self {
		self.version = version;
		self
	}
}

#[async_trait]
impl DependencyInstaller for BrowserInstaller {
	fn is_installed(&self, paths: &PathSet) -> bool {
		let installed = paths.browser_layout().is_complete();
		debug!(target = "rocket", installed, dir = %paths.browser_dir.display(), "checked browser");
		installed
	}

	async fn install(&self, paths: &PathSet) -> rocket_runtime::Result<bool> {
		ChromeInstaller::new(paths.platform)?
			.with_sources(self.sources.clone())
			.with_version(self.version.clone())
			.install(&paths.browser_layout())
			.await
	}
}
