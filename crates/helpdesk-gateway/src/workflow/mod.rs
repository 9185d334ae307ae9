//! Ticket workflow coordination.
//!
//! The single entry point the HTTP layer calls per operation. Each call
//! resolves resources, asks the core policies, and only then mutates the store.

pub mod coordinator;

pub use coordinator::{CreateTicket, InputLimits, TicketWorkflowCoordinator};
