use super::{GrantTable, GrantTableBuilder};
use crate::types::{Resource, Role};

impl GrantTable {
    /// The caregiver-coordination permission set.
    ///
    /// - `staff`: own-scoped read/update/delete on caregivers and patients.
    /// - `orgAdmin` extends `staff`: own-scoped read/update/delete on its org,
    ///   any-scoped read/update/delete on caregivers and patients.
    /// - `superAdmin` extends `orgAdmin`: any-scoped create/update/delete on
    ///   orgs, any-scoped create/delete on caregivers and patients.
    ///
    /// Staff hold no `create` grant at all.
    #[must_use]
    pub fn standard() -> Self {
        Self::standard_builder().resolve()
    }

    /// Builder preloaded with [`GrantTable::standard`]'s declarations, for
    /// deployments that add grants on top of the standard set.
    #[must_use]
    pub fn standard_builder() -> GrantTableBuilder {
        let mut builder = GrantTableBuilder::new();

        builder
            .grant(Role::Staff)
            .read_own(Resource::Caregiver)
            .update_own(Resource::Caregiver)
            .delete_own(Resource::Caregiver)
            .read_own(Resource::Patient)
            .update_own(Resource::Patient)
            .delete_own(Resource::Patient);

        builder
            .grant(Role::OrgAdmin)
            .extend(Role::Staff)
            .read_own(Resource::Org)
            .update_own(Resource::Org)
            .delete_own(Resource::Org)
            .read_any(Resource::Caregiver)
            .update_any(Resource::Caregiver)
            .delete_any(Resource::Caregiver)
            .read_any(Resource::Patient)
            .update_any(Resource::Patient)
            .delete_any(Resource::Patient);

        builder
            .grant(Role::SuperAdmin)
            .extend(Role::OrgAdmin)
            .create_any(Resource::Org)
            .update_any(Resource::Org)
            .delete_any(Resource::Org)
            .create_any(Resource::Caregiver)
            .delete_any(Resource::Caregiver)
            .create_any(Resource::Patient)
            .delete_any(Resource::Patient);

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Scope};

    #[test]
    fn standard_chain_validates() {
        let built = GrantTable::standard_builder().build().unwrap();
        assert_eq!(built, GrantTable::standard());
    }

    #[test]
    fn declared_counts_match_the_policy() {
        let table = GrantTable::standard();
        assert_eq!(table.declared_for(Role::Staff).len(), 6);
        assert_eq!(table.declared_for(Role::OrgAdmin).len(), 9);
        assert_eq!(table.declared_for(Role::SuperAdmin).len(), 7);
        assert_eq!(table.grants_for(Role::Staff).len(), 6);
        assert_eq!(table.grants_for(Role::OrgAdmin).len(), 15);
        assert_eq!(table.grants_for(Role::SuperAdmin).len(), 20);
    }

    #[test]
    fn staff_cannot_create_anything() {
        let table = GrantTable::standard();
        for resource in Resource::ALL {
            for scope in Scope::ALL {
                assert!(!table.permits(Role::Staff, Action::Create, resource, scope));
            }
        }
    }

    #[test]
    fn only_super_admin_creates_orgs() {
        let table = GrantTable::standard();
        assert!(!table.permits(Role::OrgAdmin, Action::Create, Resource::Org, Scope::Any));
        assert!(table.permits(Role::SuperAdmin, Action::Create, Resource::Org, Scope::Any));
    }

    #[test]
    fn org_admin_manages_only_its_own_org() {
        let table = GrantTable::standard();
        assert!(table.permits(Role::OrgAdmin, Action::Update, Resource::Org, Scope::Own));
        assert!(!table.permits(Role::OrgAdmin, Action::Update, Resource::Org, Scope::Any));
        assert!(!table.permits(Role::OrgAdmin, Action::Read, Resource::Org, Scope::Any));
    }
}
