//! Assignee eligibility.
//!
//! Only the candidate's role matters here. Existence of the candidate is
//! resolved by the caller, which must report `NotFound` before asking.

use crate::error::{HelpdeskError, Result};
use crate::model::Role;

pub fn is_eligible_assignee(role: Role) -> bool {
    match role {
        Role::Manager | Role::Support => true,
        Role::User => false,
    }
}

pub fn check_assignee(role: Role) -> Result<()> {
    if is_eligible_assignee(role) {
        Ok(())
    } else {
        Err(HelpdeskError::InvalidAssignee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_is_never_eligible() {
        assert_eq!(check_assignee(Role::User), Err(HelpdeskError::InvalidAssignee));
        assert!(check_assignee(Role::Support).is_ok());
        assert!(check_assignee(Role::Manager).is_ok());
    }
}
