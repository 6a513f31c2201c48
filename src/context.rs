//! Process-wide session context.
//!
//! DESIGN
//! ======
//! Built once at startup and passed explicitly to whatever needs it. The
//! session is rehydrated from storage here and nowhere else; later external
//! edits to storage are not observed until the next bootstrap.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::net::api::{ApiClient, ApiError};
use crate::router::Router;
use crate::router::guard::NavigationGuard;
use crate::router::routes::RouteTable;
use crate::session::{self, SessionStore, SharedSession};
use crate::storage::Storage;

pub struct SessionContext {
    api: ApiClient,
    store: SessionStore,
    router: Router,
}

impl SessionContext {
    /// Rehydrate the session and wire the store, API client and router to it,
    /// using the default route table.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn bootstrap(config: &SessionConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        Self::bootstrap_with_routes(config, storage, RouteTable::default())
    }

    /// Same as [`SessionContext::bootstrap`] with a caller-supplied route table.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn bootstrap_with_routes(
        config: &SessionConfig,
        storage: Arc<dyn Storage>,
        routes: RouteTable,
    ) -> Result<Self, ApiError> {
        let session = SharedSession::new(session::rehydrate(storage.as_ref()));
        let api = ApiClient::new(config, session.clone())?;
        let store = SessionStore::new(session.clone(), api.clone(), storage);
        let router = Router::new(routes, NavigationGuard::new(session));

        tracing::info!(
            api_url = %config.api_url,
            authenticated = store.is_authenticated(),
            "session context ready"
        );
        Ok(Self { api, store, router })
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }
}
