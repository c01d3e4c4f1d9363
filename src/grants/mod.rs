//! Grant table and the authorization decision function.
//!
//! A [`GrantTable`] maps every role to its resolved permission set: the grants
//! the role declares plus everything inherited from the roles it extends.
//! Inheritance is flattened once when the table is built, so a lookup is a
//! single set probe and never walks the role chain.
//!
//! There are no deny entries. A permission that no role in the chain declares
//! is denied by absence.

mod builder;
mod policy;
mod standard;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::types::{Action, Resource, Role, Scope};

pub use builder::{GrantTableBuilder, RoleGrants};
pub use policy::{GrantDeclaration, PolicyDocument, RoleDeclaration};

/// A permission independent of who holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
    pub scope: Scope,
}

impl Permission {
    #[must_use]
    pub fn new(action: Action, resource: Resource, scope: Scope) -> Self {
        Self {
            resource,
            action,
            scope,
        }
    }
}

/// A declared permission tuple: role, resource, action and scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub role: Role,
    pub resource: Resource,
    pub action: Action,
    pub scope: Scope,
}

/// Immutable, fully resolved permission table.
///
/// Built by [`GrantTable::standard`], a [`GrantTableBuilder`] or a
/// [`PolicyDocument`]. Cheap to share behind an `Arc`; every query takes
/// `&self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantTable {
    declared: [BTreeSet<Permission>; 3],
    resolved: [BTreeSet<Permission>; 3],
}

impl GrantTable {
    /// Typed decision: may `role` perform `action` on `resource` at `scope`?
    ///
    /// A request for `own` is satisfied by an `own` or an `any` grant; a request
    /// for `any` needs an `any` grant. For `own`, the answer only certifies the
    /// role's capability. Whether the caller actually owns the instance is a
    /// separate check (see [`ResourceRef::is_owned_by`](crate::ResourceRef::is_owned_by)).
    #[must_use]
    pub fn permits(&self, role: Role, action: Action, resource: Resource, scope: Scope) -> bool {
        let granted = &self.resolved[role.index()];
        Scope::ALL.into_iter().any(|held| {
            held.covers(scope) && granted.contains(&Permission::new(action, resource, held))
        })
    }

    /// Decision over raw wire names, as the HTTP layer holds them.
    ///
    /// Inputs are validated in the order role, action, resource, scope. An
    /// unrecognized value is an error, never a silent `false`.
    pub fn can(&self, role: &str, action: &str, resource: &str, scope: &str) -> Result<bool> {
        let role = Role::parse(role)?;
        let action = Action::parse(action)?;
        let resource = Resource::parse(resource)?;
        let scope = Scope::parse(scope)?;
        Ok(self.permits(role, action, resource, scope))
    }

    /// Broadest scope at which `role` may perform `action` on `resource`.
    #[must_use]
    pub fn granted_scope(&self, role: Role, action: Action, resource: Resource) -> Option<Scope> {
        if self.permits(role, action, resource, Scope::Any) {
            Some(Scope::Any)
        } else if self.permits(role, action, resource, Scope::Own) {
            Some(Scope::Own)
        } else {
            None
        }
    }

    /// Resolved grants for `role`, own and inherited, in sorted order.
    #[must_use]
    pub fn grants_for(&self, role: Role) -> Vec<Grant> {
        to_grants(role, &self.resolved[role.index()])
    }

    /// Grants `role` declares itself, excluding inherited ones.
    #[must_use]
    pub fn declared_for(&self, role: Role) -> Vec<Grant> {
        to_grants(role, &self.declared[role.index()])
    }

    /// Total number of resolved grants across all roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.iter().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.iter().all(BTreeSet::is_empty)
    }
}

fn to_grants(role: Role, permissions: &BTreeSet<Permission>) -> Vec<Grant> {
    permissions
        .iter()
        .map(|permission| Grant {
            role,
            resource: permission.resource,
            action: permission.action,
            scope: permission.scope,
        })
        .collect()
}
