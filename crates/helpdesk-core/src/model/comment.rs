use chrono::{DateTime, Utc};

use super::{CommentId, TicketId, UserId};

/// A comment on a ticket. `author` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
