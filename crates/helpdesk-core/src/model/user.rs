use chrono::{DateTime, Utc};

use super::{Role, UserId};

/// Directory entry for a known user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
