#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(test, allow(clippy::uninlined_format_args))]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: error conditions are described on the error enum rather
// than repeated on every fallible function.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//
// Pattern matching: these pedantic lints often suggest changes that reduce clarity.
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)] // RoleGrants chains don't need must_use on every method

//! Role-based permission core for the caregiver-coordination API.
//!
//! Three roles form an inheritance chain (`staff` ⊂ `orgAdmin` ⊂ `superAdmin`)
//! over three resources (`org`, `caregiver`, `patient`). A [`GrantTable`]
//! resolves that chain once; [`GrantTable::can`] answers a single
//! (role, action, resource, scope) question and [`Authorizer`] layers the
//! ownership check that `own`-scoped grants need.
//!
//! ```
//! use caregiver_access::GrantTable;
//!
//! let table = GrantTable::standard();
//! assert!(table.can("superAdmin", "delete", "caregiver", "any")?);
//! assert!(!table.can("staff", "delete", "caregiver", "any")?);
//! assert!(table.can("staff", "delete", "caregiver", "own")?);
//! assert!(table.can("guest", "read", "patient", "own").is_err());
//! # Ok::<(), caregiver_access::AccessError>(())
//! ```

/// The caregiver-access crate version (matches `Cargo.toml`).
pub const CAREGIVER_ACCESS_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod authorizer;
pub mod config;
pub mod error;
pub mod grants;
pub mod types;

pub use authorizer::{Authorizer, Decision, DecisionStats, DenyReason, principal_from_parts};
pub use config::{AccessConfig, EnforcementMode};
pub use error::{AccessError, InputKind, Result};
pub use grants::{
    Grant, GrantDeclaration, GrantTable, GrantTableBuilder, Permission, PolicyDocument,
    RoleDeclaration, RoleGrants,
};
pub use types::{
    Action, Principal, Resource, ResourceRef, Role, Scope, list_actions, list_resources,
    list_roles, list_scopes,
};
