//! Identity service client.
//!
//! [`AuthClient`] is the contract the bootstrap relies on; [`HttpConnector`]
//! and [`HttpAuthClient`] implement it over HTTP/JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use rocket_protocol::{CURRENT_USER_PATH, LOGIN_PATH, LoginRequest, LoginResponse, UserProfile};
use tracing::debug;

use crate::error::ClientError;

/// Identity service used when no other is configured.
pub const DEFAULT_API_URL: &str = "https://api.tiktokrocket.com/";

/// Environment variable that overrides the identity service URL.
pub const API_URL_ENV: &str = "ROCKET_API_URL";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 200;

/// Calls against the identity service.
///
/// Implementations do not cache: every call reaches the service.
#[async_trait]
pub trait AuthClient: Send + Sync {
	/// Profile of the account the client's token belongs to.
	///
	/// `Ok(None)` means the service does not recognise the token.
	async fn current_user(&self) -> Result<Option<UserProfile>, ClientError>;

	/// Exchanges credentials for an access token.
	///
	/// `Ok(None)` means the service refused the credentials.
	async fn login(&self, login: &str, password: &str) -> Result<Option<String>, ClientError>;
}

/// Builds [`AuthClient`]s bound to an access token.
pub trait Connector {
	type Client: AuthClient;

	fn connect(&self, access_token: Option<&str>) -> Self::Client;
}

/// Connector for the HTTP identity service.
#[derive(Debug, Clone)]
pub struct HttpConnector {
	http: reqwest::Client,
	base: Url,
}

impl HttpConnector {
	/// Creates a connector for the service rooted at `base_url`.
	///
	/// A missing trailing slash is added so relative endpoint paths resolve
	/// below the base rather than replacing its last segment.
	pub fn new(base_url: &str) -> Result<Self, ClientError> {
		let normalized = if base_url.ends_with('/') {
			base_url.to_string()
		} else {
			format!("{base_url}/")
		};
		let base = Url::parse(&normalized).map_err(|e| ClientError::InvalidUrl {
			url: base_url.to_string(),
			message: e.to_string(),
		})?;

		let http = reqwest::Client::builder()
			.connect_timeout(CONNECT_TIMEOUT)
			.build()
			.map_err(ClientError::Build)?;

		Ok(Self { http, base })
	}

	pub fn base_url(&self) -> &Url {
		&self.base
	}
}

impl Connector for HttpConnector {
	type Client = HttpAuthClient;

	fn connect(&self, access_token: Option<&str>) -> HttpAuthClient {
		HttpAuthClient {
			http: self.http.clone(),
			base: self.base.clone(),
			token: access_token.filter(|token| !token.is_empty()).map(str::to_string),
		}
	}
}

/// [`AuthClient`] over HTTP, bound to one access token.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
	http: reqwest::Client,
	base: Url,
	token: Option<String>,
}

impl HttpAuthClient {
	pub fn has_token(&self) -> bool {
		self.token.is_some()
	}

	fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
		self.base.join(path).map_err(|e| ClientError::InvalidUrl {
			url: format!("{}{path}", self.base),
			message: e.to_string(),
		})
	}
}

#[async_trait]
impl AuthClient for HttpAuthClient {
	async fn current_user(&self) -> Result<Option<UserProfile>, ClientError> {
		let Some(token) = self.token.as_deref() else {
			debug!(target = "rocket", "no access token, skipping user lookup");
			return Ok(None);
		};

		let url = self.endpoint(CURRENT_USER_PATH)?;
		debug!(target = "rocket", %url, "fetching current user");
		let response = self.http.get(url).bearer_auth(token).send().await?;

		let status = response.status();
		if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
			debug!(target = "rocket", status = status.as_u16(), "access token refused");
			return Ok(None);
		}
		let body = checked_body(response).await?;

		let profile: Option<UserProfile> = decode_optional(&body)?;
		Ok(profile.filter(|profile| !profile.is_empty()))
	}

	async fn login(&self, login: &str, password: &str) -> Result<Option<String>, ClientError> {
		let url = self.endpoint(LOGIN_PATH)?;
		debug!(target = "rocket", %url, login, "submitting login");
		let response = self
			.http
			.post(url)
			.json(&LoginRequest::new(login, password))
			.send()
			.await?;

		let status = response.status();
		if matches!(
			status,
			StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY
		) {
			debug!(target = "rocket", status = status.as_u16(), "login refused");
			return Ok(None);
		}
		let body = checked_body(response).await?;

		let reply: Option<LoginResponse> = decode_optional(&body)?;
		Ok(reply.and_then(LoginResponse::into_token))
	}
}

/// Reads the body of a 2xx response, or turns any other status into an error.
async fn checked_body(response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
	let status = response.status();
	if status.is_success() {
		return Ok(response.bytes().await?.to_vec());
	}

	let mut body = response.text().await.unwrap_or_default().trim().to_string();
	if body.len() > MAX_ERROR_BODY {
		let cut = (0..=MAX_ERROR_BODY).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
		body.truncate(cut);
		body.push_str("...");
	}
	Err(ClientError::Status {
		status: status.as_u16(),
		body,
	})
}

/// Decodes a JSON body where an empty body means "nothing".
fn decode_optional<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ClientError> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}
	Ok(serde_json::from_slice(body)?)
}
