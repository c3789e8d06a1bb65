//! Configuration for task lifecycle orchestration.

use serde::{Deserialize, Serialize};

/// What the lifecycle service does when a conflict is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Log the conflict, report it to the caller, and proceed.
    #[default]
    Warn,
    /// Reject the operation with [`super::TaskLifecycleError::Conflict`].
    Block,
}

/// Lifecycle service configuration.
///
/// # Examples
///
/// ```
/// use worktrack::task::services::{ConflictPolicy, LifecycleConfig};
///
/// let config = LifecycleConfig::default();
/// assert_eq!(config.conflict_policy, ConflictPolicy::Warn);
///
/// let strict = LifecycleConfig::blocking();
/// assert_eq!(strict.conflict_policy, ConflictPolicy::Block);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Handling of concurrent-task conflicts on creation and activation.
    pub conflict_policy: ConflictPolicy,
}

impl LifecycleConfig {
    /// Creates a configuration that reports conflicts without blocking.
    #[must_use]
    pub const fn warn_only() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Warn,
        }
    }

    /// Creates a configuration that rejects conflicting operations.
    #[must_use]
    pub const fn blocking() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Block,
        }
    }
}
