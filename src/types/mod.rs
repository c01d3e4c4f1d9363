//! Public types exposed by the `caregiver-access` crate.

pub mod access;
pub mod principal;
pub mod role;

pub use access::{Action, Resource, Scope, list_actions, list_resources, list_scopes};
pub use principal::{Principal, ResourceRef};
pub use role::{Role, list_roles};
