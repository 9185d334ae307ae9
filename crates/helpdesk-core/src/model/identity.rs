use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Closed set of roles. Fixed at setup; never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Manager,
    Support,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Manager, Role::Support, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Support => "SUPPORT",
            Role::User => "USER",
        }
    }

    /// Case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller, resolved by the gateway before any policy runs.
///
/// Passed explicitly to every policy and coordinator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: UserId,
    pub role: Role,
}

impl IdentityContext {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}
