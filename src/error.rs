//! Error types surfaced by the access-control core.

use std::fmt;

use thiserror::Error;

/// Which input field failed to parse when it was not a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Resource,
    Action,
    Scope,
}

impl InputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Action => "action",
            Self::Scope => "scope",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a grant table or evaluating a request.
///
/// An ordinary "not permitted" answer is never an error; it is `Ok(false)` from
/// [`GrantTable::can`](crate::GrantTable::can) or a denied
/// [`Decision`](crate::Decision). Everything here means the caller handed in
/// something the registry does not know, or the policy itself is broken.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Role name is not one of the registered roles.
    #[error("unknown role '{role}'")]
    UnknownRole { role: String },

    /// Resource, action or scope name is not recognized.
    #[error("unknown {kind} '{value}'")]
    UnknownResourceOrAction { kind: InputKind, value: String },

    /// An `extends` link that departs from the fixed
    /// `staff` ⊂ `orgAdmin` ⊂ `superAdmin` chain.
    #[error("role '{role}' cannot extend '{extends}'")]
    InvalidInheritance { role: String, extends: String },

    /// A policy document declared the same role twice.
    #[error("role '{role}' declared more than once")]
    DuplicateRole { role: String },

    #[error("invalid policy: {reason}")]
    InvalidPolicy { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AccessError {
    /// Stable machine-readable code for logs and API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole { .. } => "ACCESS_UNKNOWN_ROLE",
            Self::UnknownResourceOrAction { .. } => "ACCESS_UNKNOWN_INPUT",
            Self::InvalidInheritance { .. } => "ACCESS_INVALID_INHERITANCE",
            Self::DuplicateRole { .. } => "ACCESS_DUPLICATE_ROLE",
            Self::InvalidPolicy { .. } => "ACCESS_INVALID_POLICY",
            Self::InvalidConfig { .. } => "ACCESS_INVALID_CONFIG",
            Self::Io(_) => "ACCESS_IO",
        }
    }

    pub(crate) fn unknown(kind: InputKind, value: &str) -> Self {
        Self::UnknownResourceOrAction {
            kind,
            value: value.to_string(),
        }
    }
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AccessError>;
