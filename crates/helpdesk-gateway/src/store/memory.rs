use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use helpdesk_core::error::{HelpdeskError, Result};
use helpdesk_core::policy::Visibility;
use helpdesk_core::{
    Comment, CommentId, StatusLogEntry, Ticket, TicketId, TicketStatus, User, UserId,
};

use super::{NewComment, NewTicket, NewUser, TicketStore};

/// A ticket and its status history share one map entry so that a transition
/// commits both under the same shard lock.
struct TicketRow {
    ticket: Ticket,
    history: Vec<StatusLogEntry>,
}

/// Process-local store backed by `DashMap`.
pub struct InMemoryStore {
    users: DashMap<UserId, User>,
    tickets: DashMap<TicketId, TicketRow>,
    comments: DashMap<CommentId, Comment>,
    ticket_seq: AtomicI64,
    comment_seq: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            tickets: DashMap::new(),
            comments: DashMap::new(),
            ticket_seq: AtomicI64::new(1),
            comment_seq: AtomicI64::new(1),
        }
    }

    #[cfg(test)]
    fn ticket_count(&self) -> usize {
        self.tickets.len()
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        match self.users.entry(user.id) {
            Entry::Occupied(_) => Err(HelpdeskError::BadRequest(format!(
                "duplicate user id: {}",
                user.id
            ))),
            Entry::Vacant(slot) => {
                let created = User {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                    role: user.role,
                    created_at: Utc::now(),
                };
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn insert_ticket(&self, draft: NewTicket) -> Result<Ticket> {
        let id = TicketId(self.ticket_seq.fetch_add(1, Ordering::Relaxed));
        let ticket = Ticket {
            id,
            title: draft.title,
            description: draft.description,
            status: TicketStatus::Open,
            priority: draft.priority,
            created_by: draft.created_by,
            assigned_to: None,
            created_at: draft.created_at,
            version: 1,
        };
        self.tickets.insert(
            id,
            TicketRow {
                ticket: ticket.clone(),
                history: Vec::new(),
            },
        );
        Ok(ticket)
    }

    async fn ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        Ok(self.tickets.get(&id).map(|r| r.value().ticket.clone()))
    }

    async fn tickets(&self, filter: Visibility) -> Result<Vec<Ticket>> {
        let mut out: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|r| filter.admits(&r.value().ticket))
            .map(|r| r.value().ticket.clone())
            .collect();
        out.sort_by_key(|t| t.id);
        Ok(out)
    }

    async fn assign_ticket(
        &self,
        id: TicketId,
        expected_version: u64,
        assignee: UserId,
    ) -> Result<Ticket> {
        let mut row = self
            .tickets
            .get_mut(&id)
            .ok_or(HelpdeskError::NotFound("ticket"))?;
        if row.ticket.version != expected_version {
            return Err(HelpdeskError::Conflict);
        }
        row.ticket.assigned_to = Some(assignee);
        row.ticket.version += 1;
        Ok(row.ticket.clone())
    }

    async fn commit_transition(
        &self,
        expected_version: u64,
        entry: StatusLogEntry,
    ) -> Result<Ticket> {
        let mut row = self
            .tickets
            .get_mut(&entry.ticket_id)
            .ok_or(HelpdeskError::NotFound("ticket"))?;
        // Version alone is the guard; a status check here would hide lost updates
        // that happen to land on the same state.
        if row.ticket.version != expected_version {
            return Err(HelpdeskError::Conflict);
        }
        row.ticket.status = entry.new_status;
        row.ticket.version += 1;
        row.history.push(entry);
        Ok(row.ticket.clone())
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<()> {
        self.tickets
            .remove(&id)
            .ok_or(HelpdeskError::NotFound("ticket"))?;
        self.comments.retain(|_, c| c.ticket_id != id);
        Ok(())
    }

    async fn status_log(&self, id: TicketId) -> Result<Vec<StatusLogEntry>> {
        self.tickets
            .get(&id)
            .map(|r| r.value().history.clone())
            .ok_or(HelpdeskError::NotFound("ticket"))
    }

    async fn insert_comment(&self, draft: NewComment) -> Result<Comment> {
        // Hold the parent row so a concurrent ticket delete cannot orphan us.
        let _parent = self
            .tickets
            .get(&draft.ticket_id)
            .ok_or(HelpdeskError::NotFound("ticket"))?;
        let comment = Comment {
            id: CommentId(self.comment_seq.fetch_add(1, Ordering::Relaxed)),
            ticket_id: draft.ticket_id,
            author: draft.author,
            body: draft.body,
            created_at: draft.created_at,
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn comment(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.value().clone()))
    }

    async fn comments_for(&self, ticket: TicketId) -> Result<Vec<Comment>> {
        let mut out: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.value().ticket_id == ticket)
            .map(|c| c.value().clone())
            .collect();
        out.sort_by_key(|c| (c.created_at, c.id));
        Ok(out)
    }

    async fn update_comment(&self, id: CommentId, body: String) -> Result<Comment> {
        let mut c = self
            .comments
            .get_mut(&id)
            .ok_or(HelpdeskError::NotFound("comment"))?;
        c.body = body;
        Ok(c.clone())
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        self.comments
            .remove(&id)
            .map(|_| ())
            .ok_or(HelpdeskError::NotFound("comment"))
    }
}
