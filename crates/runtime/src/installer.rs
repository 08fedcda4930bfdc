//! Browser and driver installation
//!
//! Downloads the Chrome for Testing browser and its matching chromedriver
//! and unpacks both into the browser directory. The version is either pinned
//! by the caller or resolved from the published last-known-good manifest.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::archive::extract_zip;
use crate::error::{Error, Result};
use crate::platform::{BrowserLayout, Platform};
use crate::versions::{self, KnownGoodVersions};

/// Archives fetched by an installation, in order.
pub const PACKAGES: [&str; 2] = ["chrome", "chromedriver"];

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the manifest and the archives are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSources {
	/// URL of `last-known-good-versions.json`.
	pub versions_url: String,
	/// Base URL the `{version}/{target}/{package}-{target}.zip` paths hang off.
	pub download_base: String,
}

impl Default for DownloadSources {
	fn default() -> Self {
		Self {
			versions_url: versions::KNOWN_GOOD_VERSIONS_URL.to_string(),
			download_base: versions::DOWNLOAD_BASE_URL.to_string(),
		}
	}
}

/// Installs Chrome for Testing and chromedriver into a [`BrowserLayout`].
#[derive(Debug, Clone)]
pub struct ChromeInstaller {
	http: reqwest::Client,
	sources: DownloadSources,
	target: &'static str,
	version: Option<String>,
	channel: String,
}

impl ChromeInstaller {
	/// Creates an installer for `platform` on the running CPU architecture.
	///
	/// # Errors
	///
	/// Returns [`Error::UnsupportedArchitecture`] if no build is published for
	/// this host, or [`Error::Client`] if the HTTP client cannot be built.
	pub fn new(platform: Platform) -> Result<Self> {
		let target = platform.download_target(std::env::consts::ARCH)?;
		Self::for_target(target)
	}

	/// Creates an installer for an explicit download target such as `linux64`.
	pub fn for_target(target: &'static str) -> Result<Self> {
		let http = reqwest::Client::builder()
			.connect_timeout(CONNECT_TIMEOUT)
			.user_agent(concat!("rocket/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(Error::Client)?;

		Ok(Self {
			http,
			sources: DownloadSources::default(),
			target,
			version: None,
			channel: versions::STABLE_CHANNEL.to_string(),
		})
	}

	/// Overrides the manifest and archive locations.
	pub fn with_sources(mut self, sources: DownloadSources) -> Self {
		self.sources = sources;
		self
	}

	/// Pins the browser version instead of resolving the channel's latest.
	pub fn with_version(mut self, version: Option<String>) -> Self {
		self.version = version.filter(|v| !v.trim().is_empty());
		self
	}

	/// Returns the pinned version, or looks up the channel in the manifest.
	pub async fn resolve_version(&self) -> Result<String> {
		if let Some(version) = &self.version {
			return Ok(version.clone());
		}

		let url = &self.sources.versions_url;
		debug!(target = "rocket", %url, channel = %self.channel, "resolving browser version");
		let body = self.fetch(url).await?;
		let manifest: KnownGoodVersions = serde_json::from_slice(&body)?;

		manifest
			.version_for(&self.channel)
			.map(str::to_string)
			.ok_or_else(|| Error::VersionNotFound {
				channel: self.channel.clone(),
				url: url.clone(),
			})
	}

	/// Downloads and unpacks browser and driver into `layout.browser_dir`.
	///
	/// Returns whether both executables exist afterwards. The call is not
	/// safe to run concurrently against the same directory.
	pub async fn install(&self, layout: &BrowserLayout) -> Result<bool> {
		let version = self.resolve_version().await?;
		info!(target = "rocket", %version, target_platform = self.target, "installing browser");

		for package in PACKAGES {
			let url = versions::archive_url(&self.sources.download_base, &version, self.target, package);
			info!(target = "rocket", %url, "downloading {package}");
			let body = self.fetch(&url).await?;
			info!(target = "rocket", bytes = body.len(), "downloaded {package}");

			let files = unpack(body, layout.browser_dir.clone()).await?;
			debug!(target = "rocket", files, "unpacked {package}");
		}

		let complete = layout.is_complete();
		if complete {
			info!(target = "rocket", browser = %layout.browser_executable.display(), "browser installed");
		}
		Ok(complete)
	}

	async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
		let response = self.http.get(url).send().await.map_err(|source| Error::Http {
			url: url.to_string(),
			source,
		})?;

		if !response.status().is_success() {
			return Err(Error::HttpStatus {
				url: url.to_string(),
				status: response.status().as_u16(),
			});
		}

		let bytes = response.bytes().await.map_err(|source| Error::Http {
			url: url.to_string(),
			source,
		})?;
		Ok(bytes.into())
	}
}

async fn unpack(body: Vec<u8>, dest: PathBuf) -> Result<usize> {
	tokio::task::spawn_blocking(move || extract_zip(&body, &dest, 1))
		.await
		.map_err(|err| Error::Task(err.to_string()))?
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pinned_version_skips_blank() {
		let installer = ChromeInstaller::for_target("linux64").unwrap().with_version(Some("  ".into()));
		assert!(installer.version.is_none());

		let installer = installer.with_version(Some("135.0.7049.84".into()));
		assert_eq!(installer.version.as_deref(), Some("135.0.7049.84"));
	}

	#[tokio::test]
	async fn pinned_version_resolves_without_network() {
		let installer = ChromeInstaller::for_target("linux64")
			.unwrap()
			.with_sources(DownloadSources {
				versions_url: "http://127.0.0.1:1/unreachable.json".into(),
				download_base: "http://127.0.0.1:1".into(),
			})
			.with_version(Some("1.2.3".into()));

		assert_eq!(installer.resolve_version().await.unwrap(), "1.2.3");
	}

	#[tokio::test]
	async fn unreachable_manifest_is_a_network_error() {
		let installer = ChromeInstaller::for_target("linux64").unwrap().with_sources(DownloadSources {
			versions_url: "http://127.0.0.1:1/versions.json".into(),
			download_base: "http://127.0.0.1:1".into(),
		});

		let err = installer.resolve_version().await.unwrap_err();
		assert!(err.is_network(), "unexpected error: {err}");
	}
}
