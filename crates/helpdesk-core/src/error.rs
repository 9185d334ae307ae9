//! Shared error type across helpdesk crates.

use thiserror::Error;

use crate::model::TicketStatus;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Ticket, comment, or user does not exist.
    NotFound,
    /// Access policy denied the action.
    Forbidden,
    /// Proposed assignee holds the USER role.
    InvalidAssignee,
    /// Requested status change is not a legal edge.
    InvalidTransition,
    /// Concurrent mutation made the decision stale.
    Conflict,
    /// Invalid input.
    BadRequest,
    /// Caller could not be identified.
    AuthFailed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::InvalidAssignee => "INVALID_ASSIGNEE",
            ClientCode::InvalidTransition => "INVALID_TRANSITION",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// Unified error type used by core and gateway.
///
/// Every variant is an expected outcome; callers branch on
/// [`HelpdeskError::client_code`] rather than on message text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HelpdeskError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("tickets cannot be assigned to users with role USER")]
    InvalidAssignee,
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },
    #[error("conflict: ticket changed concurrently, retry with fresh state")]
    Conflict,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HelpdeskError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HelpdeskError::NotFound(_) => ClientCode::NotFound,
            HelpdeskError::Forbidden => ClientCode::Forbidden,
            HelpdeskError::InvalidAssignee => ClientCode::InvalidAssignee,
            HelpdeskError::InvalidTransition { .. } => ClientCode::InvalidTransition,
            HelpdeskError::Conflict => ClientCode::Conflict,
            HelpdeskError::BadRequest(_) => ClientCode::BadRequest,
            HelpdeskError::AuthFailed => ClientCode::AuthFailed,
            HelpdeskError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HelpdeskError::Internal(_) => ClientCode::Internal,
        }
    }
}
