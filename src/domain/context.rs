//! Identity of the caller, handed to every operation explicitly.
//!
//! The auth gateway in front of this service has already verified the session;
//! the identifier and role are trusted as given.

use crate::domain::error::{MarketError, MarketResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Host,
}

impl FromStr for Role {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "host" => Ok(Role::Host),
            other => Err(MarketError::validation(format!("unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Host => f.write_str("host"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl CallerContext {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self::new(user_id, Role::User)
    }

    pub fn host(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Host)
    }

    pub fn require_host(&self) -> MarketResult<()> {
        match self.role {
            Role::Host => Ok(()),
            Role::User => Err(MarketError::Unauthorized(
                "only hosts can manage listings".to_string(),
            )),
        }
    }
}
