//! Request-side inputs: who is acting, and on which resource instance.

use serde::{Deserialize, Serialize};

use super::access::Resource;
use super::role::Role;

/// Authenticated actor, as resolved by the authentication middleware.
///
/// Read-only from this crate's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub role: Role,
    pub org_id: String,
}

impl Principal {
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role, org_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            org_id: org_id.into(),
        }
    }
}

/// A resource instance a handler has loaded and wants to act on.
///
/// For `org` resources `id` is the organization's own id and `org_id` repeats
/// it. `owner_id` is set when the record belongs to a single user, e.g. the
/// caregiver profile linked to a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub resource: Resource,
    pub id: String,
    pub org_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl ResourceRef {
    #[must_use]
    pub fn org(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            resource: Resource::Org,
            org_id: id.clone(),
            id,
            owner_id: None,
        }
    }

    #[must_use]
    pub fn caregiver(id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            resource: Resource::Caregiver,
            id: id.into(),
            org_id: org_id.into(),
            owner_id: None,
        }
    }

    #[must_use]
    pub fn patient(id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            resource: Resource::Patient,
            id: id.into(),
            org_id: org_id.into(),
            owner_id: None,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Ownership predicate for `own`-scoped grants.
    ///
    /// An org is owned by its members. Caregivers and patients are owned by
    /// principals of the same org, and a record is always owned by the user it
    /// belongs to. Blank ids never match, so a principal without an org owns
    /// nothing through its org.
    #[must_use]
    pub fn is_owned_by(&self, principal: &Principal) -> bool {
        match self.resource {
            Resource::Org => same_id(&self.id, &principal.org_id),
            Resource::Caregiver | Resource::Patient => {
                same_id(&self.org_id, &principal.org_id)
                    || self
                        .owner_id
                        .as_deref()
                        .is_some_and(|owner| same_id(owner, &principal.id))
            }
        }
    }
}

fn same_id(left: &str, right: &str) -> bool {
    !left.trim().is_empty() && left == right
}
