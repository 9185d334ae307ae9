//! Persistence collaborator.
//!
//! The coordinator only talks to [`TicketStore`]. Implementations must make
//! `commit_transition` atomic (status + log entry) and must reject any ticket
//! mutation whose `expected_version` no longer matches with `Conflict`.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use helpdesk_core::error::Result;
use helpdesk_core::policy::Visibility;
use helpdesk_core::{
    Comment, CommentId, Role, StatusLogEntry, Ticket, TicketId, TicketPriority, User, UserId,
};

pub use memory::InMemoryStore;

/// Fields supplied when opening a ticket. The store assigns id and version.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub ticket_id: TicketId,
    pub author: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Directory seed entry (id chosen by configuration).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User>;
    async fn user(&self, id: UserId) -> Result<Option<User>>;

    async fn insert_ticket(&self, draft: NewTicket) -> Result<Ticket>;
    async fn ticket(&self, id: TicketId) -> Result<Option<Ticket>>;
    /// Tickets admitted by `filter`, ordered by id.
    async fn tickets(&self, filter: Visibility) -> Result<Vec<Ticket>>;
    async fn assign_ticket(
        &self,
        id: TicketId,
        expected_version: u64,
        assignee: UserId,
    ) -> Result<Ticket>;
    /// Apply `entry.new_status` and append `entry` in one step.
    async fn commit_transition(
        &self,
        expected_version: u64,
        entry: StatusLogEntry,
    ) -> Result<Ticket>;
    /// Removes the ticket together with its comments and status history.
    async fn delete_ticket(&self, id: TicketId) -> Result<()>;
    /// Status history, oldest first.
    async fn status_log(&self, id: TicketId) -> Result<Vec<StatusLogEntry>>;

    async fn insert_comment(&self, draft: NewComment) -> Result<Comment>;
    async fn comment(&self, id: CommentId) -> Result<Option<Comment>>;
    /// Comments on a ticket ordered by creation time.
    async fn comments_for(&self, ticket: TicketId) -> Result<Vec<Comment>>;
    async fn update_comment(&self, id: CommentId, body: String) -> Result<Comment>;
    async fn delete_comment(&self, id: CommentId) -> Result<()>;
}
