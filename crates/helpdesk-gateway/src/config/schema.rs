use std::collections::HashSet;

use serde::Deserialize;

use helpdesk_core::error::{HelpdeskError, Result};
use helpdesk_core::{Role, UserId};

use crate::workflow::InputLimits;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelpdeskConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl HelpdeskConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HelpdeskError::UnsupportedVersion);
        }
        if self.users.is_empty() {
            return Err(HelpdeskError::BadRequest("users must not be empty".into()));
        }

        self.server.validate()?;

        let mut ids = HashSet::new();
        let mut tokens = HashSet::new();
        for u in &self.users {
            if u.token.trim().is_empty() {
                return Err(HelpdeskError::BadRequest(format!(
                    "users[{}].token must not be empty",
                    u.id
                )));
            }
            if !ids.insert(u.id) {
                return Err(HelpdeskError::BadRequest(format!("duplicate user id: {}", u.id)));
            }
            if !tokens.insert(u.token.as_str()) {
                return Err(HelpdeskError::BadRequest(format!(
                    "users[{}].token is already used by another user",
                    u.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,

    #[serde(default = "default_max_body_len")]
    pub max_body_len: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_title_len: default_max_title_len(),
            max_body_len: default_max_body_len(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1000).contains(&self.max_title_len) {
            return Err(HelpdeskError::BadRequest(
                "server.max_title_len must be between 1 and 1000".into(),
            ));
        }
        if !(1..=20000).contains(&self.max_body_len) {
            return Err(HelpdeskError::BadRequest(
                "server.max_body_len must be between 1 and 20000".into(),
            ));
        }
        Ok(())
    }

    pub fn input_limits(&self) -> InputLimits {
        InputLimits {
            max_title_len: self.max_title_len,
            max_body_len: self.max_body_len,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_title_len() -> usize {
    200
}
fn default_max_body_len() -> usize {
    4000
}

/// A directory user plus the bearer token that authenticates as them.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    pub token: String,
}
