//! Client-side authenticated session management.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`SessionContext`] owns the session lifecycle: it signs users up and in
//! against the backend auth API, persists the session through a [`Storage`]
//! adapter so it survives restarts, injects the bearer token into outgoing
//! API calls, and gates navigation to protected routes.

pub mod config;
pub mod context;
pub mod net;
pub mod router;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{ConfigError, SessionConfig};
pub use context::SessionContext;
pub use net::api::{ApiClient, ApiError};
pub use net::types::UserProfile;
pub use router::{Navigation, NavigationError, Router};
pub use session::{Session, SessionStore, SharedSession};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
