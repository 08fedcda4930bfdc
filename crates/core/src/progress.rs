//! Bootstrap progress reporting.

use std::fmt;

use serde::Serialize;

/// Step boundary reported to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
	ValidatingPlatform,
	ProvisioningDirectories,
	ResolvingExecutables,
	LoadingConfig,
	InitializingClient,
	CheckingAuthentication,
	WaitingForLogin,
	CheckingBrowser,
	InstallingBrowser,
	Ready,
}

impl Stage {
	pub fn label(self) -> &'static str {
		match self {
			Stage::ValidatingPlatform => "validating platform",
			Stage::ProvisioningDirectories => "provisioning directories",
			Stage::ResolvingExecutables => "resolving executable paths",
			Stage::LoadingConfig => "loading configuration",
			Stage::InitializingClient => "initializing client",
			Stage::CheckingAuthentication => "checking authentication",
			Stage::WaitingForLogin => "waiting for login",
			Stage::CheckingBrowser => "checking browser",
			Stage::InstallingBrowser => "installing browser (this may take a while)",
			Stage::Ready => "ready",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Receives stage updates, synchronously, as the bootstrap advances.
pub trait ProgressSink {
	fn stage(&self, stage: Stage);
}

impl<F: Fn(Stage)> ProgressSink for F {
	fn stage(&self, stage: Stage) {
		self(stage)
	}
}

/// Sink that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
	fn stage(&self, _stage: Stage) {}
}
