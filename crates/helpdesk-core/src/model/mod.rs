//! Ticket domain model.
//!
//! Plain data shared by the policies and the gateway. Entities are owned by
//! the persistence collaborator; the core only reads the fields relevant to
//! authorization and transitions.

pub mod comment;
pub mod identity;
pub mod ticket;
pub mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use comment::Comment;
pub use identity::{IdentityContext, Role};
pub use ticket::{Ticket, TicketPriority, TicketStatus};
pub use user::User;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// User identifier.
    UserId
);
id_type!(
    /// Ticket identifier.
    TicketId
);
id_type!(
    /// Comment identifier.
    CommentId
);
