//! Role registry: the closed set of roles and their inheritance chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AccessError, Result};

/// A role a principal can hold.
///
/// Ordered from least to most privileged; each role extends the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Staff,
    OrgAdmin,
    SuperAdmin,
}

impl Role {
    /// Every registered role, in inheritance order.
    pub const ALL: [Role; 3] = [Role::Staff, Role::OrgAdmin, Role::SuperAdmin];

    /// Wire name as used by the API layer and persisted on user records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::OrgAdmin => "orgAdmin",
            Self::SuperAdmin => "superAdmin",
        }
    }

    /// Parse a wire name. Surrounding whitespace is ignored, case is not.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "staff" => Ok(Self::Staff),
            "orgAdmin" => Ok(Self::OrgAdmin),
            "superAdmin" => Ok(Self::SuperAdmin),
            _ => Err(AccessError::UnknownRole {
                role: raw.to_string(),
            }),
        }
    }

    /// The role this one extends in the standard chain.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        match self {
            Self::Staff => None,
            Self::OrgAdmin => Some(Self::Staff),
            Self::SuperAdmin => Some(Self::OrgAdmin),
        }
    }

    /// Roles this one inherits from, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = Role> {
        std::iter::successors(self.parent(), |role| role.parent())
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Staff => 0,
            Self::OrgAdmin => 1,
            Self::SuperAdmin => 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// List the registered roles in a stable order (`staff`, `orgAdmin`, `superAdmin`).
#[must_use]
pub fn list_roles() -> [Role; 3] {
    Role::ALL
}
