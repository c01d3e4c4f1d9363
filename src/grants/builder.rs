use std::collections::BTreeSet;

use super::{GrantTable, Permission};
use crate::types::{Action, Resource, Role, Scope};
use crate::{AccessError, Result};

/// Declarative construction of a [`GrantTable`].
///
/// ```
/// use caregiver_access::{GrantTableBuilder, Resource, Role};
///
/// let mut builder = GrantTableBuilder::new();
/// builder.grant(Role::Staff).read_own(Resource::Patient);
/// builder
///     .grant(Role::OrgAdmin)
///     .extend(Role::Staff)
///     .read_any(Resource::Patient);
/// let table = builder.build().unwrap();
/// assert_eq!(table.grants_for(Role::OrgAdmin).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrantTableBuilder {
    extends: [Option<Role>; 3],
    declared: [BTreeSet<Permission>; 3],
}

impl GrantTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or continue) declaring grants for `role`.
    pub fn grant(&mut self, role: Role) -> RoleGrants<'_> {
        RoleGrants {
            builder: self,
            role,
        }
    }

    /// Validate inheritance and flatten it into a [`GrantTable`].
    pub fn build(self) -> Result<GrantTable> {
        self.validate()?;
        Ok(self.resolve())
    }

    /// Inheritance is fixed by [`Role::parent`]. An explicit `extends` may
    /// restate it but never redirect it.
    fn validate(&self) -> Result<()> {
        for role in Role::ALL {
            let Some(extends) = self.extends[role.index()] else {
                continue;
            };
            if role.parent() != Some(extends) {
                return Err(AccessError::InvalidInheritance {
                    role: role.to_string(),
                    extends: extends.to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn resolve(self) -> GrantTable {
        let resolved = Role::ALL.map(|role| {
            let mut permissions = self.declared[role.index()].clone();
            for ancestor in role.ancestors() {
                permissions.extend(self.declared[ancestor.index()].iter().copied());
            }
            permissions
        });

        tracing::info!(
            target: "caregiver_access::grants",
            staff = resolved[Role::Staff.index()].len(),
            org_admin = resolved[Role::OrgAdmin.index()].len(),
            super_admin = resolved[Role::SuperAdmin.index()].len(),
            "grant table resolved"
        );

        GrantTable {
            declared: self.declared,
            resolved,
        }
    }
}

/// Grant declarations for a single role, chained fluently.
#[derive(Debug)]
pub struct RoleGrants<'a> {
    builder: &'a mut GrantTableBuilder,
    role: Role,
}

impl RoleGrants<'_> {
    /// Inherit every grant `parent` holds, transitively. `parent` must be the
    /// role's place in the chain; anything else fails at [`GrantTableBuilder::build`].
    pub fn extend(self, parent: Role) -> Self {
        self.builder.extends[self.role.index()] = Some(parent);
        self
    }

    /// Declare a single permission. Declaring it again is a no-op.
    pub fn allow(self, action: Action, resource: Resource, scope: Scope) -> Self {
        self.builder.declared[self.role.index()].insert(Permission::new(action, resource, scope));
        self
    }

    pub fn create_own(self, resource: Resource) -> Self {
        self.allow(Action::Create, resource, Scope::Own)
    }

    pub fn create_any(self, resource: Resource) -> Self {
        self.allow(Action::Create, resource, Scope::Any)
    }

    pub fn read_own(self, resource: Resource) -> Self {
        self.allow(Action::Read, resource, Scope::Own)
    }

    pub fn read_any(self, resource: Resource) -> Self {
        self.allow(Action::Read, resource, Scope::Any)
    }

    pub fn update_own(self, resource: Resource) -> Self {
        self.allow(Action::Update, resource, Scope::Own)
    }

    pub fn update_any(self, resource: Resource) -> Self {
        self.allow(Action::Update, resource, Scope::Any)
    }

    pub fn delete_own(self, resource: Resource) -> Self {
        self.allow(Action::Delete, resource, Scope::Own)
    }

    pub fn delete_any(self, resource: Resource) -> Self {
        self.allow(Action::Delete, resource, Scope::Any)
    }
}
