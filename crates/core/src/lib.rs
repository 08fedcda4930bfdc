//! rocket: startup sequence of the automation client.
//!
//! Before any automation can run the client needs a supported host, its
//! per-user data directory, a signed-in account and a browser/driver pair on
//! disk. [`Bootstrapper`] establishes all of that and hands back a
//! [`Session`].
//!
//! # Example
//!
//! ```ignore
//! use rocket::{BootstrapOptions, Bootstrapper, BrowserInstaller, HttpConnector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connector = HttpConnector::new(rocket::DEFAULT_API_URL)?;
//!     let session = Bootstrapper::new(BootstrapOptions::default(), connector, BrowserInstaller::new(), my_prompt())
//!         .with_progress(|stage: rocket::Stage| eprintln!("{stage}"))
//!         .run()
//!         .await
//!         .into_result()?;
//!
//!     println!("browser at {}", session.paths().browser_executable.display());
//!     Ok(())
//! }
//! ```
//!
//! Collaborators sit behind traits so each can be replaced:
//!
//! - [`Connector`] / [`AuthClient`]: identity service
//! - [`DependencyInstaller`]: browser/driver detection and installation
//! - [`LoginPrompt`]: interactive credential entry
//! - [`ProgressSink`]: step notifications

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod installer;
pub mod login;
pub mod paths;
pub mod progress;

pub use bootstrap::{
	BootstrapOptions, BootstrapOutcome, Bootstrapper, Session, check_authentication, ensure_dependency, load_config,
	validate_platform,
};
pub use client::{API_URL_ENV, AuthClient, Connector, DEFAULT_API_URL, HttpAuthClient, HttpConnector};
pub use config::ConfigStore;
pub use credentials::{ACCESS_TOKEN_KEY, Credentials};
pub use error::{BootstrapError, ClientError, ConfigError, InstallFailure, Result};
pub use installer::{BROWSER_VERSION_ENV, BrowserInstaller, DependencyInstaller};
pub use login::{LoginAttempt, LoginFailure, LoginNotice, LoginPrompt, run_login};
pub use paths::{CONFIG_FILE_NAME, DATA_DIR_ENV, DEFAULT_APP_NAME, PathSet, default_data_dir};
pub use progress::{NoProgress, ProgressSink, Stage};
pub use rocket_protocol::UserProfile;
pub use rocket_runtime::{DownloadSources, Platform};
