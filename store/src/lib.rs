//! Relational store, query cache, and memoized query layer.
//!
//! The store traits abstract over persistence so the mutation actions
//! and the web layer can run against PostgreSQL in deployment and the
//! in-memory mocks in tests. Read queries go through [`Queries`],
//! which memoizes results in a [`QueryCache`] under stable semantic
//! keys; writes invalidate those keys explicitly.

pub mod cache;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod mocks;
pub mod postgres;
pub mod provider;
pub mod queries;

pub use cache::QueryCache;
pub use error::{Result, StoreError};
pub use postgres::PostgresStore;
pub use provider::{CustomerStore, TicketStore};
pub use queries::Queries;
