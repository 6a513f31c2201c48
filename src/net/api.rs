//! HTTP client for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound request is built through [`ApiClient::request`], which reads
//! the shared session and attaches `Authorization: Bearer <token>` when one is
//! held. The client only reads the session; it never clears it, not even on a
//! 401/403 response.
//!
//! ERROR HANDLING
//! ==============
//! Request-construction, transport, status and decode failures are returned
//! as [`ApiError`] unchanged. Deciding what a failure means is the caller's job.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{AuthResponse, LoginRequest, SignupRequest};
use crate::config::SessionConfig;
use crate::session::SharedSession;

pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Building, sending or reading the request failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("API response parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

/// Attach the bearer credential when a token is held; otherwise pass the
/// request through untouched.
pub fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSession,
}

impl ApiClient {
    /// Build a client for `config.api_url` that reads credentials from `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &SessionConfig, session: SharedSession) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()?;
        Ok(Self { http, base_url: config.api_url.clone(), session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `path`, authorized from the current session.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = endpoint_url(&self.base_url, path);
        let token = self.session.token();
        authorize(self.http.request(method, url), token.as_deref())
    }

    /// Send `builder` and decode a JSON success body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// `GET path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, path)).await
    }

    /// `POST path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body)).await
    }

    /// Create an account via `POST /api/auth/signup`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn signup(&self, body: &SignupRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post_json(SIGNUP_PATH, body).await
    }

    /// Authenticate via `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn login(&self, body: &LoginRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post_json(LOGIN_PATH, body).await
    }
}
