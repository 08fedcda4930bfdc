//! Bootstrap orchestration.
//!
//! [`Bootstrapper::run`] drives the startup sequence in a fixed order:
//!
//! 1. validate the host platform
//! 2. provision the data and browser directories
//! 3. resolve the browser/driver executable paths
//! 4. load `config.env`
//! 5. bind an identity client to the stored access token
//! 6. check authentication, falling back to the interactive login
//! 7. make sure the browser/driver pair is installed
//!
//! The first fatal failure ends the sequence. The caller receives either a
//! [`Session`] or the [`BootstrapError`] that stopped it, never both.
//!
//! The individual steps are public so front ends can run a prefix of the
//! sequence (for example to print paths or to log out).

use std::path::PathBuf;

use rocket_protocol::UserProfile;
use rocket_runtime::{Platform, host_system_name};
use tracing::{debug, error, info, warn};

use crate::client::{AuthClient, Connector};
use crate::config::ConfigStore;
use crate::credentials::Credentials;
use crate::error::{BootstrapError, InstallFailure, Result};
use crate::installer::DependencyInstaller;
use crate::login::{LoginPrompt, run_login};
use crate::paths::{DEFAULT_APP_NAME, PathSet};
use crate::progress::{NoProgress, ProgressSink, Stage};

/// Inputs that select which host and data directory to bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
	/// Names the per-user data directory.
	pub app_name: String,
	/// Host system name as reported by the OS (`Windows`, `Linux`, `Darwin`).
	pub system_name: String,
	/// Explicit data directory; overrides the per-user default.
	pub data_dir: Option<PathBuf>,
}

impl Default for BootstrapOptions {
	fn default() -> Self {
		Self {
			app_name: DEFAULT_APP_NAME.to_string(),
			system_name: host_system_name(),
			data_dir: None,
		}
	}
}

impl BootstrapOptions {
	pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
		self.app_name = app_name.into();
		self
	}

	pub fn with_system_name(mut self, system_name: impl Into<String>) -> Self {
		self.system_name = system_name.into();
		self
	}

	pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
		self.data_dir = data_dir;
		self
	}

	/// Step 1.
	pub fn platform(&self) -> Result<Platform> {
		validate_platform(&self.app_name, &self.system_name)
	}

	/// Path layout for `platform`. No I/O beyond locating the per-user
	/// data directory.
	pub fn resolve_paths(&self, platform: Platform) -> Result<PathSet> {
		match &self.data_dir {
			Some(dir) => Ok(PathSet::new(platform, dir.clone())),
			None => PathSet::for_app(platform, &self.app_name),
		}
	}
}

/// Maps a host system name onto a supported [`Platform`].
pub fn validate_platform(app_name: &str, system_name: &str) -> Result<Platform> {
	Platform::from_system_name(system_name).map_err(|_| BootstrapError::UnsupportedPlatform {
		app: app_name.to_string(),
		system: system_name.to_string(),
	})
}

/// Step 4: opens `config.env`, creating it if needed.
pub fn load_config(paths: &PathSet) -> Result<ConfigStore> {
	let config = ConfigStore::open(&paths.config_file).map_err(BootstrapError::ConfigLoad)?;
	debug!(target = "rocket", path = %paths.config_file.display(), "configuration loaded");
	Ok(config)
}

/// Step 6: asks the service who the client's token belongs to.
///
/// An empty answer and a failed call both mean "not authenticated". A
/// failure is logged with its cause and never propagated; the user can
/// still sign in interactively.
pub async fn check_authentication<C>(client: &C) -> Option<UserProfile>
where
	C: AuthClient + ?Sized,
{
	match client.current_user().await {
		Ok(Some(user)) => {
			info!(target = "rocket", user = %user.display_name(), "authenticated");
			Some(user)
		}
		Ok(None) => {
			info!(target = "rocket", "not authenticated");
			None
		}
		Err(err) => {
			warn!(target = "rocket", error = %err, "authentication check failed, treating as not authenticated");
			None
		}
	}
}

/// Step 7: installs the browser/driver pair unless both are present.
///
/// `install` runs at most once. A `false` result or an error is fatal.
pub async fn ensure_dependency<I, S>(installer: &I, paths: &PathSet, progress: &S) -> Result<()>
where
	I: DependencyInstaller + ?Sized,
	S: ProgressSink + ?Sized,
{
	if installer.is_installed(paths) {
		info!(target = "rocket", dir = %paths.browser_dir.display(), "browser already installed");
		return Ok(());
	}

	progress.stage(Stage::InstallingBrowser);
	match installer.install(paths).await {
		Ok(true) => Ok(()),
		Ok(false) => Err(BootstrapError::DependencyInstall(InstallFailure::Incomplete)),
		Err(err) => Err(BootstrapError::DependencyInstall(InstallFailure::Runtime(err))),
	}
}

/// Fully initialised client state handed to the caller.
#[derive(Debug)]
pub struct Session<C> {
	platform: Platform,
	paths: PathSet,
	config: ConfigStore,
	credentials: Credentials,
	client: C,
	user: Option<UserProfile>,
}

impl<C> Session<C> {
	pub fn platform(&self) -> Platform {
		self.platform
	}

	pub fn paths(&self) -> &PathSet {
		&self.paths
	}

	pub fn config(&self) -> &ConfigStore {
		&self.config
	}

	pub fn client(&self) -> &C {
		&self.client
	}

	pub fn access_token(&self) -> Option<&str> {
		self.credentials.access_token()
	}

	/// Profile returned by the authentication check. `None` when the user
	/// had to sign in during this bootstrap.
	pub fn user(&self) -> Option<&UserProfile> {
		self.user.as_ref()
	}
}

/// Terminal state of a bootstrap run.
#[derive(Debug)]
pub enum BootstrapOutcome<C> {
	Ready(Session<C>),
	Failed(BootstrapError),
}

impl<C> BootstrapOutcome<C> {
	pub fn is_ready(&self) -> bool {
		matches!(self, BootstrapOutcome::Ready(_))
	}

	pub fn into_result(self) -> Result<Session<C>> {
		match self {
			BootstrapOutcome::Ready(session) => Ok(session),
			BootstrapOutcome::Failed(err) => Err(err),
		}
	}
}

impl<C> From<Result<Session<C>>> for BootstrapOutcome<C> {
	fn from(result: Result<Session<C>>) -> Self {
		match result {
			Ok(session) => BootstrapOutcome::Ready(session),
			Err(err) => BootstrapOutcome::Failed(err),
		}
	}
}

/// Runs the startup sequence against injected collaborators.
pub struct Bootstrapper<K, I, P, S = NoProgress> {
	options: BootstrapOptions,
	connector: K,
	installer: I,
	prompt: P,
	progress: S,
}

impl<K, I, P> Bootstrapper<K, I, P>
where
	K: Connector,
	I: DependencyInstaller,
	P: LoginPrompt,
{
	pub fn new(options: BootstrapOptions, connector: K, installer: I, prompt: P) -> Self {
		Self {
			options,
			connector,
			installer,
			prompt,
			progress: NoProgress,
		}
	}
}

impl<K, I, P, S> Bootstrapper<K, I, P, S>
where
	K: Connector,
	I: DependencyInstaller,
	P: LoginPrompt,
	S: ProgressSink,
{
	/// Reports each step boundary to `progress`.
	pub fn with_progress<T: ProgressSink>(self, progress: T) -> Bootstrapper<K, I, P, T> {
		Bootstrapper {
			options: self.options,
			connector: self.connector,
			installer: self.installer,
			prompt: self.prompt,
			progress,
		}
	}

	/// Runs every step and resolves to `Ready` or `Failed`.
	pub async fn run(self) -> BootstrapOutcome<K::Client> {
		let outcome = BootstrapOutcome::from(self.execute().await);
		if let BootstrapOutcome::Failed(err) = &outcome {
			error!(target = "rocket", error = %err, "bootstrap failed");
		}
		outcome
	}

	async fn execute(mut self) -> Result<Session<K::Client>> {
		let progress = &self.progress;

		progress.stage(Stage::ValidatingPlatform);
		let platform = self.options.platform()?;
		info!(target = "rocket", %platform, app = %self.options.app_name, "platform supported");

		progress.stage(Stage::ProvisioningDirectories);
		let paths = self.options.resolve_paths(platform)?;
		paths.provision()?;

		progress.stage(Stage::ResolvingExecutables);
		debug!(
			target = "rocket",
			browser = %paths.browser_executable.display(),
			driver = %paths.driver_executable.display(),
			"executable paths resolved"
		);

		progress.stage(Stage::LoadingConfig);
		let mut config = load_config(&paths)?;

		progress.stage(Stage::InitializingClient);
		let mut credentials = Credentials::load(&config);
		debug!(target = "rocket", has_token = credentials.has_token(), "binding identity client");
		let mut client = self.connector.connect(credentials.access_token());

		progress.stage(Stage::CheckingAuthentication);
		let user = check_authentication(&client).await;
		if user.is_none() {
			progress.stage(Stage::WaitingForLogin);
			let token = run_login(&client, &mut self.prompt, &mut config, &mut credentials).await?;
			client = self.connector.connect(Some(&token));
		}

		progress.stage(Stage::CheckingBrowser);
		ensure_dependency(&self.installer, &paths, progress).await?;

		progress.stage(Stage::Ready);
		info!(target = "rocket", data_dir = %paths.data_dir.display(), "bootstrap complete");

		Ok(Session {
			platform,
			paths,
			config,
			credentials,
			client,
			user,
		})
	}
}
