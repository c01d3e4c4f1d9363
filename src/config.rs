//! Runtime configuration for the authorizer.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{AccessError, Result};

pub const ENV_ENFORCEMENT_MODE: &str = "CAREGIVER_ACCESS_ENFORCEMENT_MODE";
pub const ENV_LOG_DECISIONS: &str = "CAREGIVER_ACCESS_LOG_DECISIONS";
pub const ENV_POLICY_PATH: &str = "CAREGIVER_ACCESS_POLICY_PATH";

/// How denials are applied.
///
/// - `enforce`: denials are returned to the caller.
/// - `audit`: denials are logged and let through, for trialling a new policy.
///   Unknown-input errors are raised in both modes.
#[derive(Debug, Clone, Copy, Serialize, Eq, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementMode {
    #[default]
    Enforce,
    Audit,
}

impl EnforcementMode {
    const NAMES: &'static [&'static str] = &["enforce", "audit"];

    /// Case-insensitive, whitespace-tolerant, for env and JSON alike.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_name(raw).ok_or_else(|| AccessError::InvalidConfig {
            reason: format!(
                "enforcement mode must be 'enforce' or 'audit', got '{}'",
                raw.trim()
            ),
        })
    }

    fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "enforce" => Some(Self::Enforce),
            "audit" => Some(Self::Audit),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for EnforcementMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_name(&raw).ok_or_else(|| serde::de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AccessConfig {
    #[serde(default)]
    pub enforcement_mode: EnforcementMode,
    /// Emit a debug event for every decision.
    #[serde(default)]
    pub log_decisions: bool,
    /// JSON policy document replacing the standard grant table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_path: Option<PathBuf>,
}

impl AccessConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|err| AccessError::InvalidConfig {
            reason: err.to_string(),
        })?;
        config.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        info!("loaded access config from {}", path.display());
        Ok(config)
    }

    /// Read configuration from the process environment. Unset variables keep
    /// their defaults; set but invalid ones are rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AccessConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ENFORCEMENT_MODE) {
            config.enforcement_mode = EnforcementMode::parse(&raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_DECISIONS) {
            config.log_decisions = parse_bool(ENV_LOG_DECISIONS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_POLICY_PATH) {
            config.policy_path = Some(PathBuf::from(raw.trim()));
        }
        let config = config.validated()?;

        info!(
            "access config: mode={:?} log_decisions={} policy={}",
            config.enforcement_mode,
            config.log_decisions,
            config
                .policy_path
                .as_deref()
                .map_or_else(|| "standard".to_string(), |p| p.display().to_string())
        );
        Ok(config)
    }

    /// Checks shared by every loader.
    fn validated(self) -> Result<Self> {
        let blank_path = self
            .policy_path
            .as_deref()
            .is_some_and(|path| path.as_os_str().to_string_lossy().trim().is_empty());
        if blank_path {
            return Err(AccessError::InvalidConfig {
                reason: "policy_path is set but empty".to_string(),
            });
        }
        Ok(self)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AccessError::InvalidConfig {
            reason: format!("{key} must be a boolean, got '{other}'"),
        }),
    }
}
