// ABOUTME: Deployable unit declarations and their deploy options.
// ABOUTME: Immutable value objects built once at startup from config or code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options describing how a unit is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployOptions {
    /// Disabled units are skipped with a log line, never an error.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Position in the deployment sequence, ascending. Ties keep
    /// registry-declared units before config-declared ones.
    #[serde(default)]
    pub order: i32,

    /// Optional per-unit deploy timeout, enforced by the host around a
    /// single unit's start.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

fn default_enabled() -> bool {
    true
}

impl Default for DeployOptions {
    fn default() -> Self {
        DeployOptions {
            enabled: true,
            order: 0,
            timeout: None,
        }
    }
}

/// A declared deployable unit.
///
/// The descriptor is either a `scheme:payload` string handed verbatim to the
/// host, or a plain identifier resolved through the registry (instance name
/// first, then type name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDeploy {
    pub descriptor: String,

    /// Disambiguates typed lookups when several instances of the same type
    /// are registered.
    #[serde(default)]
    pub qualifier: Option<String>,

    #[serde(flatten)]
    pub options: DeployOptions,
}

impl UnitDeploy {
    /// Create a unit declaration with default options (enabled, order 0).
    pub fn new(descriptor: impl Into<String>) -> Self {
        UnitDeploy {
            descriptor: descriptor.into(),
            qualifier: None,
            options: DeployOptions::default(),
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.options.order = order;
        self
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.options.enabled = false;
        self
    }

    /// Whether the descriptor is an opaque `scheme:payload` form that
    /// bypasses registry lookup entirely.
    pub fn is_opaque(&self) -> bool {
        self.descriptor.contains(':')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_enabled_order_zero() {
        let unit = UnitDeploy::new("cache-warmer");
        assert!(unit.options.enabled);
        assert_eq!(unit.options.order, 0);
        assert!(unit.options.timeout.is_none());
        assert!(unit.qualifier.is_none());
    }

    #[test]
    fn opaque_descriptor_detection() {
        assert!(UnitDeploy::new("exec:./migrate.sh").is_opaque());
        assert!(!UnitDeploy::new("cache-warmer").is_opaque());
    }

    #[test]
    fn builder_methods_compose() {
        let unit = UnitDeploy::new("indexer")
            .with_order(7)
            .with_qualifier("primary-shard")
            .disabled();
        assert_eq!(unit.options.order, 7);
        assert_eq!(unit.qualifier.as_deref(), Some("primary-shard"));
        assert!(!unit.options.enabled);
    }
}
