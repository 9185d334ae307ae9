//! Policy layer (access rules, assignee eligibility, visibility).
//!
//! Policies are pure functions of `(identity, action, resource)`; they never
//! touch storage and never fail. The coordinator resolves resources first and
//! maps a deny into `HelpdeskError::Forbidden`.

pub mod access;
pub mod assignment;

pub use access::{
    authorize_comment, authorize_ticket, can_access_ticket, can_create_ticket, can_view_roles,
    AccessDecision, CommentAction, DenyReason, TicketAction, Visibility,
};
pub use assignment::{check_assignee, is_eligible_assignee};
