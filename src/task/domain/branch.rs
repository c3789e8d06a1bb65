//! Task-level branch label.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated git branch label attached to a task.
///
/// This is independent of the optional branch recorded on a worktree
/// environment. A branch name must contain a non-whitespace character and is
/// otherwise kept exactly as given, so comparison is plain string equality.
///
/// # Examples
///
///     use worktrack::task::domain::BranchName;
///
///     let name = BranchName::new("feature/login").expect("valid");
///     assert_eq!(name.as_str(), "feature/login");
///     assert_ne!(BranchName::new(" main").ok(), BranchName::new("main").ok());
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidBranchName`] when the value is empty
    /// or only whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::InvalidBranchName(raw));
        }

        Ok(Self(raw))
    }

    /// Parses an optional branch, treating blank input as "no branch".
    ///
    /// Non-blank input is kept verbatim.
    #[must_use]
    pub fn parse_optional(value: Option<&str>) -> Option<Self> {
        value
            .filter(|name| !name.trim().is_empty())
            .map(|name| Self(name.to_owned()))
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchName> for String {
    fn from(value: BranchName) -> Self {
        value.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
