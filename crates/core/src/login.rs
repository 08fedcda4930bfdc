//! Interactive login.
//!
//! The prompt is pulled for attempts one at a time; [`run_login`] owns the
//! loop, the validation and the persistence of the issued token.

use std::fmt;

use tracing::{info, warn};

use crate::client::AuthClient;
use crate::config::ConfigStore;
use crate::credentials::Credentials;
use crate::error::{BootstrapError, Result};

/// What the user did with the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAttempt {
	Submit { login: String, password: String },
	/// Form closed without signing in.
	Cancel,
}

impl LoginAttempt {
	pub fn submit(login: impl Into<String>, password: impl Into<String>) -> Self {
		LoginAttempt::Submit {
			login: login.into(),
			password: password.into(),
		}
	}
}

/// Why an attempt did not sign the user in. The form stays open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
	/// Login or password left empty.
	MissingFields,
	/// Service refused the credentials.
	Rejected,
	/// Service could not be reached or answered unexpectedly.
	Unavailable(String),
}

impl fmt::Display for LoginFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LoginFailure::MissingFields => f.write_str("Please enter both login and password."),
			LoginFailure::Rejected => f.write_str("Login failed: check your login and password."),
			LoginFailure::Unavailable(cause) => write!(f, "Login failed: {cause}"),
		}
	}
}

/// Message shown to the user after an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginNotice {
	Failed(LoginFailure),
	Succeeded,
}

impl fmt::Display for LoginNotice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LoginNotice::Failed(failure) => failure.fmt(f),
			LoginNotice::Succeeded => f.write_str("Signed in successfully."),
		}
	}
}

/// Collects credentials from a human.
///
/// Both calls block until the user has responded.
pub trait LoginPrompt {
	fn next_attempt(&mut self) -> LoginAttempt;

	fn notify(&mut self, notice: &LoginNotice);
}

impl<P: LoginPrompt + ?Sized> LoginPrompt for &mut P {
	fn next_attempt(&mut self) -> LoginAttempt {
		(**self).next_attempt()
	}

	fn notify(&mut self, notice: &LoginNotice) {
		(**self).notify(notice)
	}
}

/// Loops on `prompt` until the service issues a token or the user cancels.
///
/// The token is written through to `config` and adopted by `credentials`
/// before the success notice is shown. Returns the token.
pub async fn run_login<C, P>(
	client: &C,
	prompt: &mut P,
	config: &mut ConfigStore,
	credentials: &mut Credentials,
) -> Result<String>
where
	C: AuthClient + ?Sized,
	P: LoginPrompt + ?Sized,
{
	loop {
		let (login, password) = match prompt.next_attempt() {
			LoginAttempt::Cancel => {
				info!(target = "rocket", "login cancelled");
				return Err(BootstrapError::AuthenticationAborted);
			}
			LoginAttempt::Submit { login, password } => (login, password),
		};

		if login.is_empty() || password.is_empty() {
			prompt.notify(&LoginNotice::Failed(LoginFailure::MissingFields));
			continue;
		}

		let failure = match client.login(&login, &password).await {
			Ok(Some(token)) if !token.is_empty() => {
				credentials
					.persist(config, &token)
					.map_err(BootstrapError::ConfigPersist)?;
				info!(target = "rocket", login = %login, "signed in");
				prompt.notify(&LoginNotice::Succeeded);
				return Ok(token);
			}
			Ok(_) => LoginFailure::Rejected,
			Err(err) => {
				warn!(target = "rocket", error = %err, "login request failed");
				LoginFailure::Unavailable(err.to_string())
			}
		};
		prompt.notify(&LoginNotice::Failed(failure));
	}
}
