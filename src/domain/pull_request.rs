//! Pull request identity as supplied by the calling workflow.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::AppError;

/// Repository slug `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositoryRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s.trim().split_once('/').ok_or_else(|| {
            AppError::Validation(format!("Invalid repository '{}': expected owner/name", s))
        })?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(AppError::Validation(format!(
                "Invalid repository '{}': expected owner/name",
                s
            )));
        }
        Ok(Self { owner: owner.to_string(), name: name.to_string() })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read-only view of the pull request a run is reporting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestContext {
    pub repository: RepositoryRef,
    /// Pull request number; doubles as the issue number for comment APIs.
    pub number: u64,
    /// Workflow run id of the current run.
    pub run_id: u64,
    /// `pull_request.maintainer_can_modify` from the event payload, when present.
    pub maintainer_can_modify: Option<bool>,
}

impl PullRequestContext {
    pub fn owner(&self) -> &str {
        &self.repository.owner
    }

    pub fn repo(&self) -> &str {
        &self.repository.name
    }

    /// Maintainers are known to be locked out of the head branch.
    ///
    /// An absent flag is not treated as a lockout.
    pub fn maintainer_edits_disabled(&self) -> bool {
        self.maintainer_can_modify == Some(false)
    }
}
