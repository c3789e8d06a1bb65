//! Execution environment configuration and identity rules.
//!
//! Two environment configurations are "the same place" when a task running
//! in one would collide with a task running in the other. Local runs are
//! always independent, worktrees are identified by path, and remote hosts by
//! host and normalised port. Conflict detection and active-environment
//! reporting both go through [`EnvironmentConfig::is_same_environment`] and
//! [`EnvironmentConfig::identity_key`], so the two views cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Port assumed for remote environments that do not specify one.
pub const DEFAULT_REMOTE_PORT: u16 = 22;

/// How a remote environment is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteConnectionType {
    /// Interactive SSH session.
    Ssh,
    /// HTTP(S) endpoint.
    Url,
}

/// Where a task executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EnvironmentConfig {
    /// The user's own machine.
    Local,
    /// A git worktree on the local machine.
    Worktree {
        /// Filesystem path of the worktree.
        path: String,
        /// Branch checked out in the worktree, if recorded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        branch: Option<String>,
    },
    /// A remote host.
    Remote {
        /// Connection mechanism.
        connection_type: RemoteConnectionType,
        /// Host name or address.
        host: String,
        /// Port, defaulting to [`DEFAULT_REMOTE_PORT`] when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        port: Option<u16>,
        /// Login user, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<String>,
    },
    /// A configuration whose `type` tag is not recognised.
    ///
    /// Never the same place as any other environment. Decoding keeps neither
    /// the original tag nor its fields, so re-encoding a task that holds this
    /// variant writes `{"type":"unrecognized"}` in place of the stored
    /// configuration.
    #[serde(other)]
    Unrecognized,
}

impl EnvironmentConfig {
    /// Creates a worktree environment without a recorded branch.
    #[must_use]
    pub fn worktree(path: impl Into<String>) -> Self {
        Self::Worktree {
            path: path.into(),
            branch: None,
        }
    }

    /// Creates an SSH remote environment.
    #[must_use]
    pub fn ssh(host: impl Into<String>, port: Option<u16>) -> Self {
        Self::Remote {
            connection_type: RemoteConnectionType::Ssh,
            host: host.into(),
            port,
            user: None,
        }
    }

    /// Returns the environment kind.
    #[must_use]
    pub const fn kind(&self) -> EnvironmentKind {
        match self {
            Self::Local => EnvironmentKind::Local,
            Self::Worktree { .. } => EnvironmentKind::Worktree,
            Self::Remote { .. } => EnvironmentKind::Remote,
            Self::Unrecognized => EnvironmentKind::Unrecognized,
        }
    }

    /// Returns whether two configurations denote the same execution place.
    ///
    /// Local and unrecognised configurations never match anything.
    #[must_use]
    pub fn is_same_environment(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Worktree { path: left, .. }, Self::Worktree { path: right, .. }) => {
                left == right
            }
            (
                Self::Remote {
                    host: left_host,
                    port: left_port,
                    ..
                },
                Self::Remote {
                    host: right_host,
                    port: right_port,
                    ..
                },
            ) => {
                left_host == right_host
                    && normalize_port(*left_port) == normalize_port(*right_port)
            }
            (
                Self::Local | Self::Worktree { .. } | Self::Remote { .. } | Self::Unrecognized,
                _,
            ) => false,
        }
    }

    /// Returns the string key used to group tasks by environment.
    ///
    /// Keys are `local`, `worktree:<path>`, `remote:<host>:<port>` with the
    /// default port filled in, and `unrecognized`.
    #[must_use]
    pub fn identity_key(&self) -> String {
        match self {
            Self::Local => "local".to_owned(),
            Self::Worktree { path, .. } => format!("worktree:{path}"),
            Self::Remote { host, port, .. } => format!("remote:{host}:{}", normalize_port(*port)),
            Self::Unrecognized => "unrecognized".to_owned(),
        }
    }
}

/// Fills in [`DEFAULT_REMOTE_PORT`] for an absent port.
const fn normalize_port(port: Option<u16>) -> u16 {
    match port {
        Some(value) => value,
        None => DEFAULT_REMOTE_PORT,
    }
}

/// Discriminant of [`EnvironmentConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentKind {
    /// See [`EnvironmentConfig::Local`].
    Local,
    /// See [`EnvironmentConfig::Worktree`].
    Worktree,
    /// See [`EnvironmentConfig::Remote`].
    Remote,
    /// See [`EnvironmentConfig::Unrecognized`].
    Unrecognized,
}

impl EnvironmentKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Worktree => "worktree",
            Self::Remote => "remote",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
