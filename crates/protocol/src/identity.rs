//! Protocol types for the identity service.
//!
//! The client speaks two calls to the service:
//!
//! 1. `POST auth/login` with a [`LoginRequest`], answered by a [`LoginResponse`]
//!    carrying the access token on success
//! 2. `GET auth/me` with `Authorization: Bearer <token>`, answered by the
//!    [`UserProfile`] the token belongs to
//!
//! The service may answer either call with an "empty" payload (JSON `null`,
//! `{}`, or a blank token). Those are treated the same as an explicit refusal,
//! see [`UserProfile::is_empty`] and [`LoginResponse::into_token`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Relative path of the login endpoint under the API base URL.
pub const LOGIN_PATH: &str = "auth/login";

/// Relative path of the "who am I" endpoint under the API base URL.
pub const CURRENT_USER_PATH: &str = "auth/me";

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	/// Account login as typed by the user.
	pub login: String,
	/// Account password as typed by the user.
	pub password: String,
}

impl LoginRequest {
	pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			login: login.into(),
			password: password.into(),
		}
	}
}

/// Body returned by the login endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
	/// Bearer token for subsequent calls, absent when the login was refused.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
}

impl LoginResponse {
	/// Returns the token if the service actually issued one.
	///
	/// Blank tokens count as a refusal.
	pub fn into_token(self) -> Option<String> {
		self.access_token.filter(|token| !token.trim().is_empty())
	}
}

/// Profile of the account that owns an access token.
///
/// Only the commonly used fields are typed; anything else the service sends
/// is preserved in [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub login: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl UserProfile {
	/// True when the payload carries no information at all (`{}`).
	pub fn is_empty(&self) -> bool {
		self.id.as_ref().is_none_or(Value::is_null)
			&& self.login.as_deref().is_none_or(str::is_empty)
			&& self.email.as_deref().is_none_or(str::is_empty)
			&& self.extra.is_empty()
	}

	/// Short human-readable label for logs and status output.
	pub fn display_name(&self) -> String {
		if let Some(login) = self.login.as_deref().filter(|l| !l.is_empty()) {
			return login.to_string();
		}
		if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
			return email.to_string();
		}
		match &self.id {
			Some(Value::String(id)) => id.clone(),
			Some(id) if !id.is_null() => id.to_string(),
			_ => "unknown user".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn login_request_serializes_plain_fields() {
		let json = serde_json::to_string(&LoginRequest::new("alice", "secret")).unwrap();
		assert_eq!(json, r#"{"login":"alice","password":"secret"}"#);
	}

	#[test]
	fn blank_token_counts_as_refusal() {
		let response: LoginResponse = serde_json::from_str(r#"{"access_token":"  "}"#).unwrap();
		assert_eq!(response.into_token(), None);

		let response: LoginResponse = serde_json::from_str("{}").unwrap();
		assert_eq!(response.into_token(), None);

		let response: LoginResponse = serde_json::from_str(r#"{"access_token":"TOKEN123"}"#).unwrap();
		assert_eq!(response.into_token().as_deref(), Some("TOKEN123"));
	}

	#[test]
	fn empty_profile_is_detected() {
		let profile: UserProfile = serde_json::from_str("{}").unwrap();
		assert!(profile.is_empty());

		let profile: UserProfile = serde_json::from_str(r#"{"id":null,"login":""}"#).unwrap();
		assert!(profile.is_empty());
	}

	#[test]
	fn unknown_fields_are_preserved() {
		let profile: UserProfile = serde_json::from_str(r#"{"id":42,"plan":"pro"}"#).unwrap();
		assert!(!profile.is_empty());
		assert_eq!(profile.extra.get("plan"), Some(&Value::from("pro")));
		assert_eq!(profile.display_name(), "42");
	}

	#[test]
	fn display_name_prefers_login() {
		let profile = UserProfile {
			login: Some("alice".into()),
			email: Some("alice@example.com".into()),
			..Default::default()
		};
		assert_eq!(profile.display_name(), "alice");
	}
}
