//! JSON policy documents for loading and exporting grant tables.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{GrantTable, GrantTableBuilder};
use crate::types::{Action, Resource, Role, Scope};
use crate::{AccessError, Result};

/// Serialized form of a grant table.
///
/// Names are kept as plain strings so that a typo in a policy file surfaces as
/// the same `UnknownRole` / `UnknownResourceOrAction` error a bad request
/// would, rather than as an opaque deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(default)]
    pub roles: Vec<RoleDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDeclaration {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub grants: Vec<GrantDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDeclaration {
    pub resource: String,
    pub action: String,
    pub scope: String,
}

impl PolicyDocument {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| AccessError::InvalidPolicy {
            reason: err.to_string(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| AccessError::InvalidPolicy {
            reason: err.to_string(),
        })
    }

    /// Validate every name into a builder. Inheritance is checked when the
    /// builder is built.
    pub fn to_builder(&self) -> Result<GrantTableBuilder> {
        let mut builder = GrantTableBuilder::new();
        let mut seen = BTreeSet::new();

        for declaration in &self.roles {
            let role = Role::parse(&declaration.role)?;
            if !seen.insert(role) {
                return Err(AccessError::DuplicateRole {
                    role: role.to_string(),
                });
            }

            let mut grants = builder.grant(role);
            if let Some(parent) = declaration.extends.as_deref() {
                grants = grants.extend(Role::parse(parent)?);
            }
            for grant in &declaration.grants {
                grants = grants.allow(
                    Action::parse(&grant.action)?,
                    Resource::parse(&grant.resource)?,
                    Scope::parse(&grant.scope)?,
                );
            }
        }

        Ok(builder)
    }
}

impl GrantTable {
    pub fn from_policy(document: &PolicyDocument) -> Result<Self> {
        document.to_builder()?.build()
    }

    pub fn from_policy_json(raw: &str) -> Result<Self> {
        Self::from_policy(&PolicyDocument::from_json_str(raw)?)
    }

    /// Export declared grants (not the flattened set) with their `extends` links.
    #[must_use]
    pub fn to_policy(&self) -> PolicyDocument {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleDeclaration {
                role: role.to_string(),
                extends: role.parent().map(|parent| parent.to_string()),
                grants: self
                    .declared_for(role)
                    .into_iter()
                    .map(|grant| GrantDeclaration {
                        resource: grant.resource.to_string(),
                        action: grant.action.to_string(),
                        scope: grant.scope.to_string(),
                    })
                    .collect(),
            })
            .collect();
        PolicyDocument { roles }
    }
}
