//! Request-time authorization: grant lookup plus the ownership check.
//!
//! Handlers call [`Authorizer::authorize`] with the authenticated principal and
//! the resource instance they loaded. The grant table answers whether the role
//! is capable of the action at all; for `own`-scoped grants the instance must
//! additionally be owned by the principal.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::{AccessConfig, EnforcementMode};
use crate::grants::{GrantTable, PolicyDocument};
use crate::types::{Action, Principal, Resource, ResourceRef, Role, Scope};

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No grant at any scope covers the action.
    MissingGrant,
    /// Only an `own` grant exists and the instance belongs to someone else.
    NotOwner,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Granted { scope: Scope },
    Denied { reason: DenyReason },
    /// Would have been denied, but the authorizer runs in audit mode.
    AuditAllowed { reason: DenyReason },
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        !matches!(self, Self::Denied { .. })
    }

    /// HTTP status the API layer answers with.
    #[must_use]
    pub fn status_code(self) -> u16 {
        if self.is_allowed() { 200 } else { 403 }
    }

    fn deny_reason(self) -> Option<DenyReason> {
        match self {
            Self::Granted { .. } => None,
            Self::Denied { reason } | Self::AuditAllowed { reason } => Some(reason),
        }
    }
}

/// Counters for a batch of decisions, e.g. a list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStats {
    pub allowed_count: usize,
    pub denied_count: usize,
    pub not_owner_count: usize,
}

impl DecisionStats {
    fn record(&mut self, decision: Decision) {
        if let Decision::Granted { .. } = decision {
            self.allowed_count += 1;
            return;
        }
        self.denied_count += 1;
        if decision.deny_reason() == Some(DenyReason::NotOwner) {
            self.not_owner_count += 1;
        }
    }
}

/// Grant table plus enforcement settings, shared by request handlers.
///
/// Immutable after construction; wrap it in an `Arc` to share across tasks.
#[derive(Debug, Clone)]
pub struct Authorizer {
    table: GrantTable,
    config: AccessConfig,
}

impl Authorizer {
    #[must_use]
    pub fn new(table: GrantTable, config: AccessConfig) -> Self {
        Self { table, config }
    }

    /// Standard grant table, enforcing.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(GrantTable::standard(), AccessConfig::default())
    }

    /// Build from configuration, loading the policy file when one is set.
    pub fn from_config(config: AccessConfig) -> Result<Self> {
        let table = match config.policy_path.as_deref() {
            Some(path) => GrantTable::from_policy(&PolicyDocument::from_file(path)?)?,
            None => GrantTable::standard(),
        };
        Ok(Self::new(table, config))
    }

    #[must_use]
    pub fn table(&self) -> &GrantTable {
        &self.table
    }

    #[must_use]
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Decide whether `principal` may perform `action` on `target`.
    #[must_use]
    pub fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        target: &ResourceRef,
    ) -> Decision {
        let decision = evaluate(&self.table, principal, action, target);
        let decision = self.apply_mode(decision);

        if self.config.log_decisions {
            tracing::debug!(
                target: "caregiver_access::decision",
                principal = %principal.id,
                role = %principal.role,
                action = %action,
                resource = %target.resource,
                resource_id = %target.id,
                ?decision,
                "authorization decision"
            );
        }
        if let Decision::AuditAllowed { reason } = decision {
            tracing::warn!(
                target: "caregiver_access::decision",
                principal = %principal.id,
                role = %principal.role,
                action = %action,
                resource = %target.resource,
                resource_id = %target.id,
                ?reason,
                "denial suppressed by audit mode"
            );
        }

        decision
    }

    /// Decide a creation, where no instance exists yet. The new record is
    /// placed in `org_id`, which is what ownership is checked against.
    #[must_use]
    pub fn authorize_create(
        &self,
        principal: &Principal,
        resource: Resource,
        org_id: &str,
    ) -> Decision {
        let target = match resource {
            Resource::Org => ResourceRef::org(org_id),
            Resource::Caregiver | Resource::Patient => ResourceRef {
                resource,
                id: String::new(),
                org_id: org_id.to_string(),
                owner_id: None,
            },
        };
        self.authorize(principal, Action::Create, &target)
    }

    /// Drop the instances `principal` may not act on. In audit mode nothing is
    /// dropped but the counters still reflect what enforcement would do.
    pub fn retain_permitted(
        &self,
        principal: &Principal,
        action: Action,
        items: &mut Vec<ResourceRef>,
    ) -> DecisionStats {
        let mut stats = DecisionStats::default();
        items.retain(|item| {
            let decision = self.authorize(principal, action, item);
            stats.record(decision);
            decision.is_allowed()
        });
        stats
    }

    fn apply_mode(&self, decision: Decision) -> Decision {
        match (self.config.enforcement_mode, decision) {
            (EnforcementMode::Audit, Decision::Denied { reason }) => {
                Decision::AuditAllowed { reason }
            }
            _ => decision,
        }
    }
}

/// Convenience for handlers holding the role as a raw string.
pub fn principal_from_parts(id: &str, role: &str, org_id: &str) -> Result<Principal> {
    Ok(Principal::new(id, Role::parse(role)?, org_id))
}

fn evaluate(
    table: &GrantTable,
    principal: &Principal,
    action: Action,
    target: &ResourceRef,
) -> Decision {
    match table.granted_scope(principal.role, action, target.resource) {
        Some(Scope::Any) => Decision::Granted { scope: Scope::Any },
        Some(Scope::Own) if target.is_owned_by(principal) => {
            Decision::Granted { scope: Scope::Own }
        }
        Some(Scope::Own) => Decision::Denied {
            reason: DenyReason::NotOwner,
        },
        None => Decision::Denied {
            reason: DenyReason::MissingGrant,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccessError;

    fn staff() -> Principal {
        Principal::new("u-staff", Role::Staff, "org-a")
    }

    fn org_admin() -> Principal {
        Principal::new("u-admin", Role::OrgAdmin, "org-a")
    }

    fn audit() -> Authorizer {
        Authorizer::new(
            GrantTable::standard(),
            AccessConfig {
                enforcement_mode: EnforcementMode::Audit,
                ..AccessConfig::default()
            },
        )
    }

    #[test]
    fn own_grant_requires_ownership() {
        let auth = Authorizer::standard();
        let mine = ResourceRef::patient("p-1", "org-a");
        let theirs = ResourceRef::patient("p-2", "org-b");

        assert_eq!(
            auth.authorize(&staff(), Action::Update, &mine),
            Decision::Granted { scope: Scope::Own }
        );
        assert_eq!(
            auth.authorize(&staff(), Action::Update, &theirs),
            Decision::Denied {
                reason: DenyReason::NotOwner
            }
        );
    }

    #[test]
    fn any_grant_skips_ownership() {
        let auth = Authorizer::standard();
        let theirs = ResourceRef::caregiver("c-2", "org-b");
        assert_eq!(
            auth.authorize(&org_admin(), Action::Delete, &theirs),
            Decision::Granted { scope: Scope::Any }
        );
    }

    #[test]
    fn missing_grant_is_distinguished_from_not_owner() {
        let auth = Authorizer::standard();
        let decision = auth.authorize_create(&staff(), Resource::Patient, "org-a");
        assert_eq!(
            decision,
            Decision::Denied {
                reason: DenyReason::MissingGrant
            }
        );
        assert_eq!(decision.status_code(), 403);
    }

    #[test]
    fn org_admin_updates_only_its_own_org() {
        let auth = Authorizer::standard();
        let home = auth.authorize(&org_admin(), Action::Update, &ResourceRef::org("org-a"));
        let other = auth.authorize(&org_admin(), Action::Update, &ResourceRef::org("org-b"));
        let created = auth.authorize_create(&org_admin(), Resource::Org, "org-new");

        assert!(home.is_allowed());
        assert!(!other.is_allowed());
        assert!(!created.is_allowed());
    }

    #[test]
    fn blank_ids_do_not_confer_ownership() {
        let auth = Authorizer::standard();

        let orphan = Principal::new("u-9", Role::Staff, "");
        assert_eq!(
            auth.authorize(&orphan, Action::Delete, &ResourceRef::patient("p-1", "")),
            Decision::Denied {
                reason: DenyReason::NotOwner
            }
        );

        let anonymous = Principal::new("", Role::Staff, "org-a");
        let record = ResourceRef::caregiver("c", "org-z").with_owner("");
        assert_eq!(
            auth.authorize(&anonymous, Action::Delete, &record),
            Decision::Denied {
                reason: DenyReason::NotOwner
            }
        );
    }

    #[test]
    fn audit_mode_lets_denials_through() {
        let decision = audit().authorize(
            &staff(),
            Action::Delete,
            &ResourceRef::caregiver("c-1", "org-b"),
        );
        assert_eq!(
            decision,
            Decision::AuditAllowed {
                reason: DenyReason::NotOwner
            }
        );
        assert!(decision.is_allowed());
        assert_eq!(decision.status_code(), 200);
    }

    #[test]
    fn retain_permitted_filters_and_counts() {
        let mut items = vec![
            ResourceRef::patient("p-1", "org-a"),
            ResourceRef::patient("p-2", "org-b"),
            ResourceRef::patient("p-3", "org-b").with_owner("u-staff"),
        ];
        let stats = Authorizer::standard().retain_permitted(&staff(), Action::Read, &mut items);

        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["p-1", "p-3"]);
        assert_eq!(
            stats,
            DecisionStats {
                allowed_count: 2,
                denied_count: 1,
                not_owner_count: 1,
            }
        );
    }

    #[test]
    fn retain_permitted_keeps_everything_in_audit_mode() {
        let mut items = vec![
            ResourceRef::patient("p-1", "org-a"),
            ResourceRef::patient("p-2", "org-b"),
        ];
        let stats = audit().retain_permitted(&staff(), Action::Read, &mut items);
        assert_eq!(items.len(), 2);
        assert_eq!(stats.allowed_count, 1);
        assert_eq!(stats.denied_count, 1);
    }

    #[test]
    fn principal_from_parts_rejects_unknown_roles() {
        assert!(matches!(
            principal_from_parts("u-1", "guest", "org-a"),
            Err(AccessError::UnknownRole { .. })
        ));
        let principal = principal_from_parts("u-1", "orgAdmin", "org-a").unwrap();
        assert_eq!(principal.role, Role::OrgAdmin);
    }

    #[test]
    fn decision_serializes_with_a_tag() {
        let json = serde_json::to_value(Decision::Denied {
            reason: DenyReason::NotOwner,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "decision": "denied", "reason": "not_owner" })
        );
    }

    #[test]
    fn authorizer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Authorizer>();
    }
}
