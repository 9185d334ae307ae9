//! Role and ownership rules for tickets and comments.
//!
//! Precedence is fixed: MANAGER overrides everything, then per-action role
//! narrowing, then the ownership rule for the caller's role.

use crate::error::{HelpdeskError, Result};
use crate::model::{Comment, IdentityContext, Role, Ticket, UserId};

/// Actions that target a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketAction {
    /// Read the ticket, its comments, or its status history.
    View,
    /// Add a comment to the ticket.
    Comment,
    Assign,
    ChangeStatus,
    Delete,
}

impl TicketAction {
    pub const ALL: [TicketAction; 5] = [
        TicketAction::View,
        TicketAction::Comment,
        TicketAction::Assign,
        TicketAction::ChangeStatus,
        TicketAction::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketAction::View => "view",
            TicketAction::Comment => "comment",
            TicketAction::Assign => "assign",
            TicketAction::ChangeStatus => "change_status",
            TicketAction::Delete => "delete",
        }
    }

    /// Roles allowed to attempt this action at all, before ownership.
    fn role_allowed(self, role: Role) -> bool {
        match self {
            TicketAction::View | TicketAction::Comment => true,
            TicketAction::Assign | TicketAction::ChangeStatus => {
                matches!(role, Role::Manager | Role::Support)
            }
            TicketAction::Delete => role == Role::Manager,
        }
    }
}

/// Actions that target an existing comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentAction {
    View,
    Edit,
    Delete,
}

impl CommentAction {
    pub const ALL: [CommentAction; 3] =
        [CommentAction::View, CommentAction::Edit, CommentAction::Delete];
}

/// Why a request was denied. Used for logs only; clients see `FORBIDDEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The caller's role may never perform this action.
    RoleNotAllowed,
    /// The caller neither created nor holds the ticket.
    NotOwner,
    /// Only the comment author (or a manager) may mutate a comment.
    NotAuthor,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::RoleNotAllowed => "role_not_allowed",
            DenyReason::NotOwner => "not_owner",
            DenyReason::NotAuthor => "not_author",
        }
    }
}

/// Decision from policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Permit,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_permitted(self) -> bool {
        matches!(self, AccessDecision::Permit)
    }

    /// `Permit` => `Ok(())`, `Deny` => `Forbidden`.
    pub fn into_result(self) -> Result<()> {
        match self {
            AccessDecision::Permit => Ok(()),
            AccessDecision::Deny(_) => Err(HelpdeskError::Forbidden),
        }
    }
}

/// Only USER and MANAGER may open tickets.
pub fn can_create_ticket(identity: &IdentityContext) -> AccessDecision {
    match identity.role {
        Role::Manager | Role::User => AccessDecision::Permit,
        Role::Support => AccessDecision::Deny(DenyReason::RoleNotAllowed),
    }
}

/// The role catalogue is a management surface.
pub fn can_view_roles(identity: &IdentityContext) -> AccessDecision {
    match identity.role {
        Role::Manager => AccessDecision::Permit,
        Role::Support | Role::User => AccessDecision::Deny(DenyReason::RoleNotAllowed),
    }
}

/// Base ticket rule shared by every ticket-level action.
pub fn can_access_ticket(identity: &IdentityContext, ticket: &Ticket) -> bool {
    match identity.role {
        Role::Manager => true,
        Role::Support => ticket.is_assigned_to(identity.user_id),
        Role::User => ticket.created_by == identity.user_id,
    }
}

pub fn authorize_ticket(
    identity: &IdentityContext,
    action: TicketAction,
    ticket: &Ticket,
) -> AccessDecision {
    if identity.is_manager() {
        return AccessDecision::Permit;
    }
    if !action.role_allowed(identity.role) {
        return AccessDecision::Deny(DenyReason::RoleNotAllowed);
    }
    if !can_access_ticket(identity, ticket) {
        return AccessDecision::Deny(DenyReason::NotOwner);
    }
    AccessDecision::Permit
}

/// `parent` must be the ticket the comment belongs to.
///
/// Reading follows the parent ticket (or authorship). Edit and delete are
/// reserved for the author and ignore ticket visibility entirely.
pub fn authorize_comment(
    identity: &IdentityContext,
    action: CommentAction,
    comment: &Comment,
    parent: &Ticket,
) -> AccessDecision {
    if identity.is_manager() {
        return AccessDecision::Permit;
    }
    let is_author = comment.author == identity.user_id;
    match action {
        CommentAction::View => {
            if is_author || can_access_ticket(identity, parent) {
                AccessDecision::Permit
            } else {
                AccessDecision::Deny(DenyReason::NotOwner)
            }
        }
        CommentAction::Edit | CommentAction::Delete => {
            if is_author {
                AccessDecision::Permit
            } else {
                AccessDecision::Deny(DenyReason::NotAuthor)
            }
        }
    }
}

/// Visibility filter for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    AssignedTo(UserId),
    CreatedBy(UserId),
}

impl Visibility {
    pub fn for_identity(identity: &IdentityContext) -> Self {
        match identity.role {
            Role::Manager => Visibility::All,
            Role::Support => Visibility::AssignedTo(identity.user_id),
            Role::User => Visibility::CreatedBy(identity.user_id),
        }
    }

    pub fn admits(&self, ticket: &Ticket) -> bool {
        match *self {
            Visibility::All => true,
            Visibility::AssignedTo(user) => ticket.is_assigned_to(user),
            Visibility::CreatedBy(user) => ticket.created_by == user,
        }
    }
}
