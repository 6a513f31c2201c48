//! Wire DTOs for the authentication API.
//!
//! DESIGN
//! ======
//! `UserProfile` is both the backend response shape and the value persisted
//! under the `"user"` storage key, so it must round-trip through serde without
//! loss.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role string that grants admin privileges.
pub const ADMIN_ROLE: &str = "admin";

/// Backend user identifier. Accepts JSON numbers and strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The authenticated user as returned by signup/login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Privilege tier (e.g. `"admin"`, `"user"`).
    #[serde(default)]
    pub role: String,
}

impl UserProfile {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Successful response body of `POST /api/auth/signup` and `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Opaque credential token; never inspected client-side.
    pub token: String,
    pub user: UserProfile,
}

/// Body of `POST /api/auth/signup`.
#[derive(Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for SignupRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
