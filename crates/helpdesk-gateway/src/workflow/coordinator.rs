use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use helpdesk_core::error::{HelpdeskError, Result};
use helpdesk_core::policy::{
    self, authorize_comment, authorize_ticket, AccessDecision, CommentAction, TicketAction,
    Visibility,
};
use helpdesk_core::transition::plan_transition;
use helpdesk_core::{
    Comment, CommentId, IdentityContext, Role, StatusLogEntry, Ticket, TicketId, TicketPriority,
    TicketStatus, User, UserId,
};

use crate::obs::metrics::WorkflowMetrics;
use crate::store::{NewComment, NewTicket, TicketStore};

/// Length bounds for free-text input.
#[derive(Debug, Clone, Copy)]
pub struct InputLimits {
    pub max_title_len: usize,
    pub max_body_len: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_title_len: 200,
            max_body_len: 4000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
}

/// Orchestrates access, assignment, and transition policies over a store.
///
/// Order per call is fixed: input shape (BadRequest) -> resolve (NotFound) ->
/// authorize (Forbidden) -> domain checks -> write. Holds no mutable state of
/// its own.
pub struct TicketWorkflowCoordinator {
    store: Arc<dyn TicketStore>,
    limits: InputLimits,
    metrics: Arc<WorkflowMetrics>,
}

impl TicketWorkflowCoordinator {
    pub fn new(store: Arc<dyn TicketStore>, limits: InputLimits) -> Self {
        Self {
            store,
            limits,
            metrics: Arc::new(WorkflowMetrics::default()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<WorkflowMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &WorkflowMetrics {
        &self.metrics
    }

    /// Directory lookup used for response shaping.
    pub async fn user(&self, id: UserId) -> Result<Option<User>> {
        self.store.user(id).await
    }

    // --------------------
    // Tickets
    // --------------------

    pub async fn create_ticket(&self, who: &IdentityContext, req: CreateTicket) -> Result<Ticket> {
        let started = Instant::now();
        let res: Result<Ticket> = async {
            policy::can_create_ticket(who).into_result()?;
            let title = self.require_text("title", &req.title, self.limits.max_title_len)?;
            if req.description.chars().count() > self.limits.max_body_len {
                return Err(HelpdeskError::BadRequest(format!(
                    "description must be at most {} characters",
                    self.limits.max_body_len
                )));
            }
            let ticket = self
                .store
                .insert_ticket(NewTicket {
                    title,
                    description: req.description,
                    priority: req.priority,
                    created_by: who.user_id,
                    created_at: Utc::now(),
                })
                .await?;
            tracing::info!(ticket_id = %ticket.id, user_id = %who.user_id, "ticket created");
            Ok(ticket)
        }
        .await;
        self.observe("create_ticket", started, who, res)
    }

    /// Tickets visible to `who`; filtering happens in the store query.
    pub async fn list_tickets(&self, who: &IdentityContext) -> Result<Vec<Ticket>> {
        let started = Instant::now();
        let res = self.store.tickets(Visibility::for_identity(who)).await;
        self.observe("list_tickets", started, who, res)
    }

    pub async fn get_ticket(&self, who: &IdentityContext, id: TicketId) -> Result<Ticket> {
        let started = Instant::now();
        let res = self.authorized_ticket(who, TicketAction::View, id).await;
        self.observe("get_ticket", started, who, res)
    }

    pub async fn assign_ticket(
        &self,
        who: &IdentityContext,
        id: TicketId,
        assignee: UserId,
    ) -> Result<Ticket> {
        let started = Instant::now();
        let res: Result<Ticket> = async {
            let ticket = self.find_ticket(id).await?;
            let candidate = self
                .store
                .user(assignee)
                .await?
                .ok_or(HelpdeskError::NotFound("user"))?;
            self.authorize(who, TicketAction::Assign, &ticket)?;
            policy::check_assignee(candidate.role).inspect_err(|_| {
                tracing::warn!(
                    ticket_id = %id,
                    assignee = %assignee,
                    role = %candidate.role,
                    "assignee rejected"
                );
            })?;

            let updated = self
                .store
                .assign_ticket(id, ticket.version, assignee)
                .await?;
            tracing::info!(ticket_id = %id, assignee = %assignee, user_id = %who.user_id, "ticket assigned");
            Ok(updated)
        }
        .await;
        self.observe("assign_ticket", started, who, res)
    }

    pub async fn change_status(
        &self,
        who: &IdentityContext,
        id: TicketId,
        requested: TicketStatus,
    ) -> Result<Ticket> {
        let started = Instant::now();
        let res: Result<Ticket> = async {
            let ticket = self.authorized_ticket(who, TicketAction::ChangeStatus, id).await?;
            let entry = plan_transition(id, ticket.status, requested, who, Utc::now())?;
            let updated = self.store.commit_transition(ticket.version, entry).await?;

            self.metrics
                .transitions
                .inc(&[("from", ticket.status.as_str()), ("to", requested.as_str())]);
            tracing::info!(
                ticket_id = %id,
                from = %ticket.status,
                to = %requested,
                user_id = %who.user_id,
                "ticket status changed"
            );
            Ok(updated)
        }
        .await;
        self.observe("change_status", started, who, res)
    }

    pub async fn delete_ticket(&self, who: &IdentityContext, id: TicketId) -> Result<()> {
        let started = Instant::now();
        let res: Result<()> = async {
            self.authorized_ticket(who, TicketAction::Delete, id).await?;
            self.store.delete_ticket(id).await?;
            tracing::info!(ticket_id = %id, user_id = %who.user_id, "ticket deleted");
            Ok(())
        }
        .await;
        self.observe("delete_ticket", started, who, res)
    }

    /// Audit trail of a ticket, oldest entry first.
    pub async fn status_history(
        &self,
        who: &IdentityContext,
        id: TicketId,
    ) -> Result<Vec<StatusLogEntry>> {
        let started = Instant::now();
        let res: Result<Vec<StatusLogEntry>> = async {
            self.authorized_ticket(who, TicketAction::View, id).await?;
            self.store.status_log(id).await
        }
        .await;
        self.observe("status_history", started, who, res)
    }

    // --------------------
    // Comments
    // --------------------

    pub async fn add_comment(
        &self,
        who: &IdentityContext,
        ticket_id: TicketId,
        body: &str,
    ) -> Result<Comment> {
        let started = Instant::now();
        let res: Result<Comment> = async {
            let body = self.require_text("comment", body, self.limits.max_body_len)?;
            self.authorized_ticket(who, TicketAction::Comment, ticket_id).await?;
            let comment = self
                .store
                .insert_comment(NewComment {
                    ticket_id,
                    author: who.user_id,
                    body,
                    created_at: Utc::now(),
                })
                .await?;
            tracing::info!(ticket_id = %ticket_id, comment_id = %comment.id, user_id = %who.user_id, "comment added");
            Ok(comment)
        }
        .await;
        self.observe("add_comment", started, who, res)
    }

    pub async fn list_comments(
        &self,
        who: &IdentityContext,
        ticket_id: TicketId,
    ) -> Result<Vec<Comment>> {
        let started = Instant::now();
        let res: Result<Vec<Comment>> = async {
            self.authorized_ticket(who, TicketAction::View, ticket_id).await?;
            self.store.comments_for(ticket_id).await
        }
        .await;
        self.observe("list_comments", started, who, res)
    }

    /// Single comment; its author keeps read access after losing the ticket.
    pub async fn get_comment(&self, who: &IdentityContext, id: CommentId) -> Result<Comment> {
        let started = Instant::now();
        let res = self.authorized_comment(who, CommentAction::View, id).await;
        self.observe("get_comment", started, who, res)
    }

    pub async fn edit_comment(
        &self,
        who: &IdentityContext,
        id: CommentId,
        body: &str,
    ) -> Result<Comment> {
        let started = Instant::now();
        let res: Result<Comment> = async {
            let body = self.require_text("comment", body, self.limits.max_body_len)?;
            self.authorized_comment(who, CommentAction::Edit, id).await?;
            let updated = self.store.update_comment(id, body).await?;
            tracing::info!(comment_id = %id, user_id = %who.user_id, "comment edited");
            Ok(updated)
        }
        .await;
        self.observe("edit_comment", started, who, res)
    }

    pub async fn delete_comment(&self, who: &IdentityContext, id: CommentId) -> Result<()> {
        let started = Instant::now();
        let res: Result<()> = async {
            self.authorized_comment(who, CommentAction::Delete, id).await?;
            self.store.delete_comment(id).await?;
            tracing::info!(comment_id = %id, user_id = %who.user_id, "comment deleted");
            Ok(())
        }
        .await;
        self.observe("delete_comment", started, who, res)
    }

    // --------------------
    // Roles
    // --------------------

    pub fn roles(&self, who: &IdentityContext) -> Result<&'static [Role]> {
        policy::can_view_roles(who).into_result()?;
        Ok(&Role::ALL)
    }

    pub fn role(&self, who: &IdentityContext, name: &str) -> Result<Role> {
        policy::can_view_roles(who).into_result()?;
        Role::from_name(name).ok_or(HelpdeskError::NotFound("role"))
    }

    // --------------------
    // Helpers
    // --------------------

    async fn find_ticket(&self, id: TicketId) -> Result<Ticket> {
        self.store
            .ticket(id)
            .await?
            .ok_or(HelpdeskError::NotFound("ticket"))
    }

    /// Resolve first so a missing ticket reads as NotFound for every role.
    async fn authorized_ticket(
        &self,
        who: &IdentityContext,
        action: TicketAction,
        id: TicketId,
    ) -> Result<Ticket> {
        let ticket = self.find_ticket(id).await?;
        self.authorize(who, action, &ticket)?;
        Ok(ticket)
    }

    fn authorize(&self, who: &IdentityContext, action: TicketAction, ticket: &Ticket) -> Result<()> {
        let decision = authorize_ticket(who, action, ticket);
        if let AccessDecision::Deny(reason) = decision {
            tracing::warn!(
                ticket_id = %ticket.id,
                user_id = %who.user_id,
                role = %who.role,
                action = action.as_str(),
                reason = reason.as_str(),
                "ticket access denied"
            );
        }
        decision.into_result()
    }

    async fn authorized_comment(
        &self,
        who: &IdentityContext,
        action: CommentAction,
        id: CommentId,
    ) -> Result<Comment> {
        let comment = self
            .store
            .comment(id)
            .await?
            .ok_or(HelpdeskError::NotFound("comment"))?;
        let parent = self.find_ticket(comment.ticket_id).await?;
        let decision = authorize_comment(who, action, &comment, &parent);
        if let AccessDecision::Deny(reason) = decision {
            tracing::warn!(
                comment_id = %id,
                user_id = %who.user_id,
                role = %who.role,
                reason = reason.as_str(),
                "comment access denied"
            );
        }
        decision.into_result()?;
        Ok(comment)
    }

    fn require_text(&self, field: &str, raw: &str, max: usize) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HelpdeskError::BadRequest(format!("{field} must not be empty")));
        }
        if trimmed.chars().count() > max {
            return Err(HelpdeskError::BadRequest(format!(
                "{field} must be at most {max} characters"
            )));
        }
        Ok(trimmed.to_string())
    }

    fn observe<T>(
        &self,
        op: &'static str,
        started: Instant,
        who: &IdentityContext,
        res: Result<T>,
    ) -> Result<T> {
        let outcome = match &res {
            Ok(_) => "ok",
            Err(e) => e.client_code().as_str(),
        };
        let labels = [("op", op), ("outcome", outcome), ("role", who.role.as_str())];
        self.metrics.operations.inc(&labels);
        self.metrics
            .operation_duration
            .observe(&[("op", op)], started.elapsed());
        res
    }
}
