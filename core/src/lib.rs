//! Domain records and validation schemas for the repair-shop service.
//!
//! This crate is the pure center of the application: record shapes for
//! customers and repair tickets, the declarative validation rules that
//! turn raw form input into typed payloads, and the structured result
//! type the mutation actions hand back to the presentation layer.
//! There is no I/O here; persistence and sessions live in the sibling
//! crates.

pub mod action;
pub mod customer;
pub mod fields;
pub mod ticket;
pub mod validate;

pub use action::ActionResult;
pub use customer::{Customer, CustomerForm, CustomerPayload, NEW_CUSTOMER_ID, validate_customer};
pub use fields::FieldErrors;
pub use ticket::{
    NEW_TICKET_SENTINEL, Ticket, TicketForm, TicketId, TicketPayload, TicketSummary,
    UNASSIGNED_TECH, validate_ticket,
};
