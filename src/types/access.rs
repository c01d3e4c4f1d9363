//! The nouns, verbs and scopes a grant is made of.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputKind;
use crate::{AccessError, Result};

/// Resource an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Org,
    Caregiver,
    Patient,
}

/// CRUD verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// Whether a permission is limited to resources the principal owns.
///
/// `Any` is the broader scope: an `any` grant also satisfies an `own` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Own,
    Any,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Org, Resource::Caregiver, Resource::Patient];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Caregiver => "caregiver",
            Self::Patient => "patient",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "org" => Ok(Self::Org),
            "caregiver" => Ok(Self::Caregiver),
            "patient" => Ok(Self::Patient),
            _ => Err(AccessError::unknown(InputKind::Resource, raw)),
        }
    }
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AccessError::unknown(InputKind::Action, raw)),
        }
    }
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Own, Scope::Any];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Any => "any",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "own" => Ok(Self::Own),
            "any" => Ok(Self::Any),
            _ => Err(AccessError::unknown(InputKind::Scope, raw)),
        }
    }

    /// Whether a grant held at `self` scope satisfies a request for `requested`.
    #[must_use]
    pub fn covers(self, requested: Scope) -> bool {
        match (self, requested) {
            (Self::Any, _) => true,
            (Self::Own, Self::Own) => true,
            (Self::Own, Self::Any) => false,
        }
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = AccessError;

                fn from_str(s: &str) -> Result<Self> {
                    Self::parse(s)
                }
            }
        )*
    };
}

impl_display_from_str!(Resource, Action, Scope);

#[must_use]
pub fn list_resources() -> [Resource; 3] {
    Resource::ALL
}

#[must_use]
pub fn list_actions() -> [Action; 4] {
    Action::ALL
}

#[must_use]
pub fn list_scopes() -> [Scope; 2] {
    Scope::ALL
}
