//! helpdesk core: ticket data model, error taxonomy, access/assignment
//! policies, and the status transition engine.
//!
//! Every decision in this crate is a pure function of its inputs. Persistence,
//! HTTP, and identity resolution live in the gateway crate and call in here
//! with an explicit [`IdentityContext`]; nothing reads ambient request state.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `HelpdeskError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod policy;
pub mod transition;

pub use error::{ClientCode, HelpdeskError, Result};
pub use model::{
    Comment, CommentId, IdentityContext, Role, Ticket, TicketId, TicketPriority, TicketStatus,
    User, UserId,
};
pub use transition::StatusLogEntry;
