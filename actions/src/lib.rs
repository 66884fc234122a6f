//! Mutation actions.
//!
//! Every write follows the same pipeline: validate the submitted form,
//! check the session, persist through the store, then invalidate
//! exactly the cached views the write made stale. The returned
//! [`ActionResult`](repairshop_core::ActionResult) is shaped for
//! direct presentation to the caller.

pub mod customer;
pub mod outcome;
pub mod ticket;

pub use customer::{delete_customer, save_customer};
pub use outcome::ActionOutcome;
pub use ticket::save_ticket;
