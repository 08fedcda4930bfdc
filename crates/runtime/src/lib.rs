//! Host platform detection and Chrome for Testing installation.
//!
//! - [`Platform`] validates the host and maps it to the on-disk
//!   [`BrowserLayout`] of the browser/driver pair
//! - [`ChromeInstaller`] fetches and unpacks both into that layout

pub mod archive;
pub mod error;
pub mod installer;
pub mod platform;
pub mod versions;

pub use error::{Error, Result};
pub use installer::{ChromeInstaller, DownloadSources};
pub use platform::{BROWSER_DIR_NAME, BrowserLayout, Platform, host_system_name};
