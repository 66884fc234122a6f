//! Memoized read-side query layer.
//!
//! Every query is cached under a key derived from its semantic
//! arguments: list views share a stable key, single-record and search
//! views embed the id or normalized search pattern. Keying by
//! arguments (rather than by anything generated at construction time)
//! is what lets repeated calls actually hit the cache, and lets the
//! mutation actions invalidate exactly the views a write made stale.

use crate::cache::QueryCache;
use crate::error::Result;
use crate::provider::{CustomerStore, TicketStore};
use repairshop_core::{Customer, Ticket, TicketSummary};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// Cache key for the full customer listing.
pub const CUSTOMER_LIST_KEY: &str = "customers:all";

/// Cache key for the open-ticket listing.
pub const OPEN_TICKETS_KEY: &str = "tickets:open";

/// Cache key for a single customer view.
#[must_use]
pub fn customer_key(id: i32) -> String {
    format!("customer:{id}")
}

/// Cache key for a single ticket view.
#[must_use]
pub fn ticket_key(id: i32) -> String {
    format!("ticket:{id}")
}

fn customer_search_key(pattern: &str) -> String {
    format!("customer-search:{pattern}")
}

fn ticket_search_key(pattern: &str) -> String {
    format!("ticket-search:{pattern}")
}

/// Turn free search text into a SQL `LIKE` pattern: lowercased, with
/// whitespace runs collapsed into `%` wildcards.
#[must_use]
pub fn like_pattern(text: &str) -> String {
    let collapsed = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("%");
    format!("%{collapsed}%")
}

/// Read-side query layer over a store, memoized through a
/// [`QueryCache`].
#[derive(Debug)]
pub struct Queries<S> {
    store: S,
    cache: Arc<QueryCache>,
}

impl<S> Queries<S> {
    /// Wrap a store with a shared cache.
    pub const fn new(store: S, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    /// The underlying store, for the mutation actions.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The shared cache, for explicit invalidation.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn cached<T, F, Fut>(&self, key: &str, load: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.cache.get(key).await {
            match serde_json::from_value(hit) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    // Shape drift; drop the entry and recompute.
                    tracing::warn!(%key, %error, "discarding undecodable cache entry");
                    self.cache.invalidate(key).await;
                }
            }
        }
        let fresh = load().await?;
        match serde_json::to_value(&fresh) {
            Ok(value) => self.cache.insert(key, value).await,
            Err(error) => tracing::warn!(%key, %error, "failed to cache query result"),
        }
        Ok(fresh)
    }
}

impl<S: CustomerStore> Queries<S> {
    /// All customers ordered by last name ascending.
    ///
    /// # Errors
    ///
    /// Returns the store error on a cache miss that fails to load.
    pub async fn customers(&self) -> Result<Vec<Customer>> {
        self.cached(CUSTOMER_LIST_KEY, || self.store.list_customers())
            .await
    }

    /// One customer by id.
    ///
    /// # Errors
    ///
    /// Returns the store error on a cache miss that fails to load.
    pub async fn customer(&self, id: i32) -> Result<Option<Customer>> {
        self.cached(&customer_key(id), || self.store.get_customer(id))
            .await
    }

    /// Search customers by free text.
    ///
    /// # Errors
    ///
    /// Returns the store error on a cache miss that fails to load.
    pub async fn search_customers(&self, text: &str) -> Result<Vec<Customer>> {
        let pattern = like_pattern(text);
        self.cached(&customer_search_key(&pattern), || {
            self.store.search_customers(&pattern)
        })
        .await
    }
}

impl<S: TicketStore> Queries<S> {
    /// One ticket by id.
    ///
    /// # Errors
    ///
    /// Returns the store error on a cache miss that fails to load.
    pub async fn ticket(&self, id: i32) -> Result<Option<Ticket>> {
        self.cached(&ticket_key(id), || self.store.get_ticket(id))
            .await
    }

    /// Search tickets by free text.
    ///
    /// # Errors
    ///
    /// Returns the store error on a cache miss that fails to load.
    pub async fn search_tickets(&self, text: &str) -> Result<Vec<TicketSummary>> {
        let pattern = like_pattern(text);
        self.cached(&ticket_search_key(&pattern), || {
            self.store.search_tickets(&pattern)
        })
        .await
    }

    /// Open tickets with joined customer fields.
    ///
    /// # Errors
    ///
    /// Returns the store error on a cache miss that fails to load.
    pub async fn open_tickets(&self) -> Result<Vec<TicketSummary>> {
        self.cached(OPEN_TICKETS_KEY, || self.store.open_tickets())
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::MemoryStore;
    use repairshop_core::{CustomerPayload, NEW_CUSTOMER_ID};

    fn payload(first: &str, last: &str, email: &str) -> CustomerPayload {
        CustomerPayload {
            id: NEW_CUSTOMER_ID,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: "555-123-4567".to_string(),
            address1: "1 Main St".to_string(),
            address2: None,
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            notes: None,
            active: true,
        }
    }

    #[test]
    fn like_pattern_collapses_whitespace() {
        assert_eq!(like_pattern("Smith"), "%smith%");
        assert_eq!(like_pattern("  Dana   Smith "), "%dana%smith%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[tokio::test]
    async fn list_is_served_warm_until_invalidated() {
        let store = MemoryStore::new();
        let queries = Queries::new(store.clone(), Arc::new(QueryCache::default()));

        store.insert_customer(&payload("Dana", "Smith", "dana@example.com")).await.unwrap();
        assert_eq!(queries.customers().await.unwrap().len(), 1);

        // A write that bypasses invalidation is not visible yet.
        store.insert_customer(&payload("Lee", "Jones", "lee@example.com")).await.unwrap();
        assert_eq!(queries.customers().await.unwrap().len(), 1);

        queries.cache().invalidate(CUSTOMER_LIST_KEY).await;
        assert_eq!(queries.customers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn single_record_views_share_keys_across_calls() {
        let store = MemoryStore::new();
        let queries = Queries::new(store.clone(), Arc::new(QueryCache::default()));

        let created = store
            .insert_customer(&payload("Dana", "Smith", "dana@example.com"))
            .await
            .unwrap();
        assert!(queries.customer(created.id).await.unwrap().is_some());
        assert!(queries.cache().contains(&customer_key(created.id)).await);

        store.delete_customer(created.id).await.unwrap();
        // Still warm: distinct calls hit the same semantic key.
        assert!(queries.customer(created.id).await.unwrap().is_some());

        queries.cache().invalidate(&customer_key(created.id)).await;
        assert!(queries.customer(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn searches_are_keyed_by_normalized_text() {
        let store = MemoryStore::new();
        let queries = Queries::new(store.clone(), Arc::new(QueryCache::default()));

        store.insert_customer(&payload("Dana", "Smith", "dana@example.com")).await.unwrap();
        let hits = queries.search_customers("SMITH").await.unwrap();
        assert_eq!(hits.len(), 1);
        // Same normalized pattern, warm hit regardless of input casing.
        assert!(queries.cache().contains("customer-search:%smith%").await);
        assert_eq!(queries.search_customers("smith").await.unwrap().len(), 1);
    }
}
