//! Properties of the standard grant table.
//!
//! These walk the full (role, action, resource, scope) space rather than
//! sampling it; the space is small enough to check exhaustively.

use caregiver_access::{
    AccessError, Action, GrantTable, Resource, Role, Scope, list_actions, list_resources,
    list_roles, list_scopes,
};

fn every_tuple() -> impl Iterator<Item = (Action, Resource, Scope)> {
    list_actions().into_iter().flat_map(|action| {
        list_resources().into_iter().flat_map(move |resource| {
            list_scopes()
                .into_iter()
                .map(move |scope| (action, resource, scope))
        })
    })
}

#[test]
fn declared_grants_are_permitted() {
    let table = GrantTable::standard();
    for role in list_roles() {
        for grant in table.declared_for(role) {
            assert!(
                table.permits(role, grant.action, grant.resource, grant.scope),
                "{role} should hold {grant:?}"
            );
        }
    }
}

#[test]
fn inheritance_is_monotonic() {
    let table = GrantTable::standard();
    for (action, resource, scope) in every_tuple() {
        if table.permits(Role::Staff, action, resource, scope) {
            assert!(table.permits(Role::OrgAdmin, action, resource, scope));
        }
        if table.permits(Role::OrgAdmin, action, resource, scope) {
            assert!(table.permits(Role::SuperAdmin, action, resource, scope));
        }
    }
}

#[test]
fn any_scope_subsumes_own() {
    let table = GrantTable::standard();
    for role in list_roles() {
        for action in list_actions() {
            for resource in list_resources() {
                if table.permits(role, action, resource, Scope::Any) {
                    assert!(table.permits(role, action, resource, Scope::Own));
                }
            }
        }
    }
}

#[test]
fn own_grant_does_not_satisfy_any() {
    let table = GrantTable::standard();
    assert!(table.permits(Role::Staff, Action::Read, Resource::Patient, Scope::Own));
    assert!(!table.permits(Role::Staff, Action::Read, Resource::Patient, Scope::Any));
}

#[test]
fn documented_denials() -> caregiver_access::Result<()> {
    let table = GrantTable::standard();
    assert!(!table.can("staff", "create", "patient", "any")?);
    assert!(!table.can("orgAdmin", "create", "org", "any")?);
    Ok(())
}

#[test]
fn unknown_role_raises() {
    let table = GrantTable::standard();
    let err = table.can("guest", "read", "patient", "own").unwrap_err();
    assert!(matches!(err, AccessError::UnknownRole { .. }));
}

#[test]
fn end_to_end_caregiver_deletion() -> caregiver_access::Result<()> {
    let table = GrantTable::standard();
    assert!(table.can("superAdmin", "delete", "caregiver", "any")?);
    assert!(!table.can("staff", "delete", "caregiver", "any")?);
    assert!(table.can("staff", "delete", "caregiver", "own")?);
    Ok(())
}

#[test]
fn repeated_random_queries_are_idempotent() {
    let table = GrantTable::standard();
    let snapshot = table.clone();
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for _ in 0..2_000 {
        let role = list_roles()[rng.usize(..3)];
        let action = list_actions()[rng.usize(..4)];
        let resource = list_resources()[rng.usize(..3)];
        let scope = list_scopes()[rng.usize(..2)];

        let first = table.permits(role, action, resource, scope);
        let second = table.permits(role, action, resource, scope);
        assert_eq!(first, second);

        let raw = table
            .can(role.as_str(), action.as_str(), resource.as_str(), scope.as_str())
            .unwrap();
        assert_eq!(raw, first);
    }

    assert_eq!(table, snapshot, "queries must not mutate the table");
}

#[test]
fn random_garbage_never_decides() {
    let table = GrantTable::standard();
    let mut rng = fastrand::Rng::with_seed(7);

    for _ in 0..500 {
        let junk: String = (0..rng.usize(1..10)).map(|_| rng.lowercase()).collect();
        let result = table.can("staff", &junk, "patient", "own");
        if Action::parse(&junk).is_err() {
            assert!(result.is_err(), "'{junk}' should be rejected");
        }
    }
}
