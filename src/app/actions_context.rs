//! Pull request context resolution for GitHub Actions runs.
//!
//! Explicit values win; anything missing is read from the event payload at
//! `GITHUB_EVENT_PATH`.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{AppError, PullRequestContext, RepositoryRef};

/// Values supplied on the command line or through the runner environment.
#[derive(Debug, Clone, Default)]
pub struct ContextInputs {
    /// `owner/name`, usually `GITHUB_REPOSITORY`.
    pub repository: Option<String>,
    pub pr_number: Option<u64>,
    /// Usually `GITHUB_RUN_ID`.
    pub run_id: Option<u64>,
    /// Usually `GITHUB_EVENT_PATH`.
    pub event_path: Option<PathBuf>,
    pub maintainer_can_modify: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    number: Option<u64>,
    pull_request: Option<PullRequestPayload>,
    issue: Option<IssuePayload>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: Option<u64>,
    maintainer_can_modify: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    full_name: String,
}

impl EventPayload {
    fn pr_number(&self) -> Option<u64> {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.number)
            .or(self.issue.as_ref().map(|issue| issue.number))
            .or(self.number)
    }

    fn maintainer_can_modify(&self) -> Option<bool> {
        self.pull_request.as_ref().and_then(|pr| pr.maintainer_can_modify)
    }
}

fn read_event(inputs: &ContextInputs) -> Result<EventPayload, AppError> {
    let Some(path) = &inputs.event_path else {
        return Ok(EventPayload::default());
    };
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("Failed to read event payload {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| AppError::parse("event payload", e))
}

/// Build the pull request context from explicit inputs and the event payload.
pub fn resolve_context(inputs: ContextInputs) -> Result<PullRequestContext, AppError> {
    let event = read_event(&inputs)?;

    let repository = inputs
        .repository
        .or_else(|| event.repository.as_ref().map(|repo| repo.full_name.clone()))
        .ok_or_else(|| {
            AppError::MissingContext("repository (pass --repo or set GITHUB_REPOSITORY)".into())
        })?
        .parse::<RepositoryRef>()?;

    let number = inputs.pr_number.or_else(|| event.pr_number()).ok_or_else(|| {
        AppError::MissingContext("pull request number (pass --pr or run on a PR event)".into())
    })?;

    let run_id = inputs.run_id.ok_or_else(|| {
        AppError::MissingContext("run id (pass --run-id or set GITHUB_RUN_ID)".into())
    })?;

    Ok(PullRequestContext {
        repository,
        number,
        run_id,
        maintainer_can_modify: inputs.maintainer_can_modify.or_else(|| event.maintainer_can_modify()),
    })
}
