//! Session lifecycle: the in-memory session, its shared handle, and the store
//! that mutates it.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`SharedSession`] is the one mutable value in the client. The API client
//! and the navigation guard hold read-only clones of it; only [`SessionStore`]
//! writes. Every write is mirrored to [`Storage`] under the `"token"` and
//! `"user"` keys before the operation returns.
//!
//! CONCURRENCY
//! ===========
//! Mutations are serialized by a store-level mutex: storage is written first,
//! then the new session is swapped in under a brief write lock. Readers never
//! wait on storage I/O. Two overlapping logins still race: whichever backend
//! response arrives last wins, in memory and in storage alike.
//!
//! ERROR HANDLING
//! ==============
//! Storage never holds a token next to a profile from a different login. The
//! profile is removed before a new token is written; if any step fails, both
//! keys are cleared so the next start is signed out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{AuthResponse, LoginRequest, SignupRequest, UserProfile};
use crate::storage::{Storage, StorageError};

/// Storage key holding the raw credential token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// The authenticated session. `token` is `None` iff unauthenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

/// Cloneable handle to the process-wide session.
#[derive(Clone, Debug, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { inner: Arc::new(RwLock::new(session)) }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.read().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read().is_admin()
    }
}

/// Build the startup session from persisted values.
///
/// - no (or empty) `"token"`: no session
/// - `"token"` without `"user"`: authenticated, no profile
/// - `"token"` with a malformed `"user"`: no session
#[must_use]
pub fn rehydrate(storage: &dyn Storage) -> Session {
    let Some(token) = storage.load(TOKEN_KEY).filter(|t| !t.is_empty()) else {
        return Session::default();
    };
    let user = match storage.load(USER_KEY) {
        None => None,
        Some(raw) => match serde_json::from_str::<Option<UserProfile>>(&raw) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "stored user profile is malformed; starting signed out");
                return Session::default();
            }
        },
    };
    Session { token: Some(token), user }
}

fn write_session(storage: &dyn Storage, session: &Session) -> Result<(), StorageError> {
    storage.remove(USER_KEY)?;
    match &session.token {
        Some(token) => storage.save(TOKEN_KEY, token)?,
        None => storage.remove(TOKEN_KEY)?,
    }
    if let Some(user) = &session.user {
        crate::storage::save_json(storage, USER_KEY, user)?;
    }
    Ok(())
}

/// Mirror `session` into storage. On failure, fall back to an empty stored
/// session rather than a partial one.
fn persist(storage: &dyn Storage, session: &Session) {
    let Err(e) = write_session(storage, session) else {
        return;
    };
    tracing::error!(error = %e, "failed to persist session; clearing stored session");
    for key in [USER_KEY, TOKEN_KEY] {
        if let Err(e) = storage.remove(key) {
            tracing::error!(key, error = %e, "failed to clear stored session key");
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum EstablishError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("backend issued an empty token")]
    EmptyToken,
}

/// Owns session mutation: signup, login, logout.
pub struct SessionStore {
    session: SharedSession,
    api: ApiClient,
    storage: Arc<dyn Storage>,
    mutation: Mutex<()>,
}

impl SessionStore {
    #[must_use]
    pub fn new(session: SharedSession, api: ApiClient, storage: Arc<dyn Storage>) -> Self {
        Self { session, api, storage, mutation: Mutex::new(()) }
    }

    /// Read-only handle for collaborators (guard, transport).
    #[must_use]
    pub fn shared(&self) -> &SharedSession {
        &self.session
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// `true` iff a user is present and their role is `"admin"`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session.snapshot()
    }

    /// Create an account and sign in as it.
    ///
    /// Returns `false` on any failure, leaving the current session untouched.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> bool {
        let body = SignupRequest { name, email, password };
        let result = self.api.signup(&body).await;
        match self.establish(result) {
            Ok(()) => {
                tracing::info!(%email, "signup succeeded");
                true
            }
            Err(e) => {
                tracing::error!(%email, error = %e, "signup failed");
                false
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// Returns `false` on any failure, leaving the current session untouched.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let body = LoginRequest { email, password };
        let result = self.api.login(&body).await;
        match self.establish(result) {
            Ok(()) => {
                tracing::info!(%email, "login succeeded");
                true
            }
            Err(e) => {
                tracing::error!(%email, error = %e, "login failed");
                false
            }
        }
    }

    /// Clear the session in memory and in storage. Safe to call repeatedly.
    pub fn logout(&self) {
        self.commit(Session::default());
        tracing::info!("logged out");
    }

    fn establish(&self, result: Result<AuthResponse, ApiError>) -> Result<(), EstablishError> {
        let AuthResponse { token, user } = result?;
        if token.is_empty() {
            return Err(EstablishError::EmptyToken);
        }
        self.commit(Session { token: Some(token), user: Some(user) });
        Ok(())
    }

    /// Persist `next`, then make it the current session.
    fn commit(&self, next: Session) {
        let _mutation = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        persist(self.storage.as_ref(), &next);
        *self.session.write() = next;
    }
}
