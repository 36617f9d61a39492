//! Caller identity for authorization checks.
//!
//! Identity is intentionally decoupled from transport and storage: the actual
//! authentication (sessions, tokens) lives in an upstream proxy, which hands
//! this application a user id and a role per request. Core operations receive
//! an explicit [`Actor`] rather than looking identity up from any ambient
//! request state, so every permission rule is testable without simulating a
//! request.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Role granted to a caller by the upstream identity provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Division manager - may approve and reject submitted documents
    Manager,
    /// Co-manager - same review rights as the manager
    CoManager,
    /// Plain staff - may submit and edit their own documents, never review
    Staff,
}

impl Role {
    /// Whether this role is allowed to move documents to approved/rejected.
    ///
    /// Only managers and co-managers review; a staff caller can never approve
    /// a document, including their own.
    #[must_use]
    pub const fn is_reviewer(self) -> bool {
        matches!(self, Self::Manager | Self::CoManager)
    }

    /// Canonical wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::CoManager => "co_manager",
            Self::Staff => "staff",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "co_manager" => Ok(Self::CoManager),
            "staff" => Ok(Self::Staff),
            other => Err(Error::validation("role", format!("unknown role '{other}'"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller of a core operation.
///
/// Constructed at the boundary (HTTP layer or test) and passed by reference
/// into every operation that needs a permission or ownership decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Opaque user id assigned by the identity provider
    pub user_id: String,
    /// Role granted for this request
    pub role: Role,
}

impl Actor {
    /// Creates an actor from its parts.
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviewer_roles() {
        assert!(Role::Manager.is_reviewer());
        assert!(Role::CoManager.is_reviewer());
        assert!(!Role::Staff.is_reviewer());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Manager, Role::CoManager, Role::Staff] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        let err = Role::from_str("intern").unwrap_err();
        assert!(matches!(err, Error::Validation { field: "role", .. }));
    }
}
