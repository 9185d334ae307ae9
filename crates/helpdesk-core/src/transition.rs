//! Ticket status state machine.
//!
//! The legal edges live in one table, [`LEGAL_TRANSITIONS`]. A transition is
//! accepted only if `(current, requested)` appears there verbatim, so skips,
//! reversals, self-loops, and anything out of CLOSED are rejected.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{HelpdeskError, Result};
use crate::model::{IdentityContext, TicketId, TicketStatus, UserId};

/// Forward edges of the lifecycle.
pub const LEGAL_TRANSITIONS: [(TicketStatus, TicketStatus); 3] = [
    (TicketStatus::Open, TicketStatus::InProgress),
    (TicketStatus::InProgress, TicketStatus::Resolved),
    (TicketStatus::Resolved, TicketStatus::Closed),
];

pub fn validate_transition(current: TicketStatus, requested: TicketStatus) -> bool {
    LEGAL_TRANSITIONS.contains(&(current, requested))
}

/// Statuses reachable in one step from `current`.
pub fn next_statuses(current: TicketStatus) -> impl Iterator<Item = TicketStatus> {
    LEGAL_TRANSITIONS
        .into_iter()
        .filter(move |(from, _)| *from == current)
        .map(|(_, to)| to)
}

pub fn is_terminal(status: TicketStatus) -> bool {
    next_statuses(status).next().is_none()
}

/// Append-only audit record of one accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLogEntry {
    pub ticket_id: TicketId,
    pub old_status: TicketStatus,
    pub new_status: TicketStatus,
    pub changed_by: UserId,
    pub changed_at: DateTime<Utc>,
}

/// Validate `current -> requested` and build the log entry to persist with it.
///
/// The caller commits the new status and the returned entry together.
pub fn plan_transition(
    ticket_id: TicketId,
    current: TicketStatus,
    requested: TicketStatus,
    actor: &IdentityContext,
    at: DateTime<Utc>,
) -> Result<StatusLogEntry> {
    if !validate_transition(current, requested) {
        tracing::debug!(%ticket_id, from = %current, to = %requested, "transition rejected");
        return Err(HelpdeskError::InvalidTransition {
            from: current,
            to: requested,
        });
    }
    Ok(StatusLogEntry {
        ticket_id,
        old_status: current,
        new_status: requested,
        changed_by: actor.user_id,
        changed_at: at,
    })
}
