//! Chrome for Testing release manifest.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Manifest listing the last known good version of each release channel.
pub const KNOWN_GOOD_VERSIONS_URL: &str =
	"https://googlechromelabs.github.io/chrome-for-testing/last-known-good-versions.json";

/// Bucket the browser and driver archives are published to.
pub const DOWNLOAD_BASE_URL: &str = "https://storage.googleapis.com/chrome-for-testing-public";

/// Channel installed when no version is pinned.
pub const STABLE_CHANNEL: &str = "Stable";

/// Body of `last-known-good-versions.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownGoodVersions {
	#[serde(default)]
	pub timestamp: Option<String>,
	pub channels: HashMap<String, ChannelVersion>,
}

/// One channel entry of the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelVersion {
	#[serde(default)]
	pub channel: Option<String>,
	pub version: String,
	#[serde(default)]
	pub revision: Option<String>,
}

impl KnownGoodVersions {
	/// Version string for `channel`, matched case-insensitively.
	pub fn version_for(&self, channel: &str) -> Option<&str> {
		self.channels
			.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case(channel))
			.map(|(_, entry)| entry.version.as_str())
	}
}

/// Download URL of `package` (`chrome` or `chromedriver`) for a target.
pub fn archive_url(base: &str, version: &str, target: &str, package: &str) -> String {
	format!("{}/{version}/{target}/{package}-{target}.zip", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_manifest_and_finds_stable() {
		let json = r#"{
			"timestamp": "2025-04-09T10:00:00.000Z",
			"channels": {
				"Stable": {"channel": "Stable", "version": "135.0.7049.84", "revision": "1427262"},
				"Beta": {"channel": "Beta", "version": "136.0.7103.25", "revision": "1440670"}
			}
		}"#;
		let manifest: KnownGoodVersions = serde_json::from_str(json).unwrap();

		assert_eq!(manifest.version_for("stable"), Some("135.0.7049.84"));
		assert_eq!(manifest.version_for("Canary"), None);
	}

	#[test]
	fn archive_url_layout() {
		assert_eq!(
			archive_url(DOWNLOAD_BASE_URL, "135.0.7049.84", "linux64", "chromedriver"),
			"https://storage.googleapis.com/chrome-for-testing-public/135.0.7049.84/linux64/chromedriver-linux64.zip"
		);
		assert_eq!(
			archive_url("http://127.0.0.1:9000/", "1.0", "win64", "chrome"),
			"http://127.0.0.1:9000/1.0/win64/chrome-win64.zip"
		);
	}
}
