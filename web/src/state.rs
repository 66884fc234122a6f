//! Shared application state and the per-request session extension.

use repairshop_auth::{SessionProvider, UserDirectory};
use repairshop_store::{Queries, QueryCache};
use std::sync::Arc;

/// State shared by every handler.
pub struct AppState<S> {
    queries: Arc<Queries<S>>,
    directory: Arc<dyn UserDirectory>,
}

// Manual impl: the fields are Arcs, so `S: Clone` is not needed.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            queries: Arc::clone(&self.queries),
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<S> AppState<S> {
    /// Assemble the shared state.
    #[must_use]
    pub fn new(queries: Queries<S>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            queries: Arc::new(queries),
            directory,
        }
    }

    /// The memoized query layer.
    #[must_use]
    pub fn queries(&self) -> &Queries<S> {
        &self.queries
    }

    /// The underlying store, for mutations.
    #[must_use]
    pub fn store(&self) -> &S {
        self.queries.store()
    }

    /// The shared query cache, for invalidation after writes.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        self.queries.cache()
    }

    /// The user directory behind the technician picker.
    #[must_use]
    pub fn directory(&self) -> &dyn UserDirectory {
        self.directory.as_ref()
    }
}

/// Request-scoped session handle, inserted by the session middleware.
#[derive(Clone)]
pub struct CurrentSession(pub Arc<dyn SessionProvider>);

impl CurrentSession {
    /// The session provider for this request.
    #[must_use]
    pub fn provider(&self) -> &dyn SessionProvider {
        self.0.as_ref()
    }
}
