//! Store traits for customer and ticket persistence.

use crate::error::Result;
use repairshop_core::{Customer, CustomerPayload, Ticket, TicketPayload, TicketSummary};
use std::future::Future;

/// Customer persistence and read queries.
///
/// Implementations must surface unique-constraint violations as
/// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation)
/// carrying the offending column names.
pub trait CustomerStore: Send + Sync {
    /// Insert a new customer, returning the stored row with its
    /// assigned id. `active` is left to the store default (true).
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` on a duplicate email, `Database`
    /// otherwise.
    fn insert_customer(
        &self,
        data: &CustomerPayload,
    ) -> impl Future<Output = Result<Customer>> + Send;

    /// Update an existing customer by id, including `active`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row has the id, `UniqueViolation` on
    /// a duplicate email, `Database` otherwise.
    fn update_customer(
        &self,
        id: i32,
        data: &CustomerPayload,
    ) -> impl Future<Output = Result<Customer>> + Send;

    /// Delete a customer row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row has the id.
    fn delete_customer(&self, id: i32) -> impl Future<Output = Result<()>> + Send;

    /// All customers ordered by last name ascending.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    fn list_customers(&self) -> impl Future<Output = Result<Vec<Customer>>> + Send;

    /// One customer by id.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    fn get_customer(&self, id: i32) -> impl Future<Output = Result<Option<Customer>>> + Send;

    /// Case-insensitive substring search over email, phone, city, zip,
    /// and the concatenated full name. `pattern` is a SQL `LIKE`
    /// pattern (see [`queries::like_pattern`](crate::queries::like_pattern)).
    /// Ordered by last name ascending.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    fn search_customers(
        &self,
        pattern: &str,
    ) -> impl Future<Output = Result<Vec<Customer>>> + Send;
}

/// Ticket persistence and read queries.
pub trait TicketStore: Send + Sync {
    /// Insert a new ticket. `completed` is left to the store default
    /// (false); the payload id is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Database` when the referenced customer does not exist
    /// or on any other failure.
    fn insert_ticket(&self, data: &TicketPayload) -> impl Future<Output = Result<Ticket>> + Send;

    /// Update an existing ticket by id. `completed` is only
    /// overwritten when the payload carries a value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row has the id, `Database` otherwise.
    fn update_ticket(
        &self,
        id: i32,
        data: &TicketPayload,
    ) -> impl Future<Output = Result<Ticket>> + Send;

    /// One ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    fn get_ticket(&self, id: i32) -> impl Future<Output = Result<Option<Ticket>>> + Send;

    /// Search tickets by title, tech, and the left-joined customer's
    /// email/phone/city/zip/full name, ordered by creation time
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    fn search_tickets(
        &self,
        pattern: &str,
    ) -> impl Future<Output = Result<Vec<TicketSummary>>> + Send;

    /// Open tickets (`completed = false`) with joined customer fields,
    /// ordered by creation time ascending.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    fn open_tickets(&self) -> impl Future<Output = Result<Vec<TicketSummary>>> + Send;
}
