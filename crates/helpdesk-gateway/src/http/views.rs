//! JSON response shapes.
//!
//! Tickets and comments embed the related users so clients need no follow-up
//! lookups. A user missing from the directory renders as `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use helpdesk_core::error::Result;
use helpdesk_core::{
    Comment, CommentId, Role, Ticket, TicketId, TicketPriority, TicketStatus, User, UserId,
};

use crate::workflow::TicketWorkflowCoordinator;

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketView {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_by: Option<UserView>,
    pub assigned_to: Option<UserView>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub comment: String,
    pub user: Option<UserView>,
    pub created_at: DateTime<Utc>,
}

async fn user_view(wf: &TicketWorkflowCoordinator, id: UserId) -> Result<Option<UserView>> {
    Ok(wf.user(id).await?.map(UserView::from))
}

pub async fn ticket_view(wf: &TicketWorkflowCoordinator, t: Ticket) -> Result<TicketView> {
    let created_by = user_view(wf, t.created_by).await?;
    let assigned_to = match t.assigned_to {
        Some(id) => user_view(wf, id).await?,
        None => None,
    };
    Ok(TicketView {
        id: t.id,
        title: t.title,
        description: t.description,
        status: t.status,
        priority: t.priority,
        created_by,
        assigned_to,
        created_at: t.created_at,
    })
}

pub async fn comment_view(wf: &TicketWorkflowCoordinator, c: Comment) -> Result<CommentView> {
    let user = user_view(wf, c.author).await?;
    Ok(CommentView {
        id: c.id,
        ticket_id: c.ticket_id,
        comment: c.body,
        user,
        created_at: c.created_at,
    })
}
