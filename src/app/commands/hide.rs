//! `hide` command: minimize stale summary comments.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{
    AppError, FormalityConfig, MinimizeClassifier, RepositoryRef, StaleSummaryFilter,
};
use crate::ports::GitHubPort;

/// What to do when a single minimize call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HideErrorPolicy {
    /// Propagate the first failure.
    #[default]
    FailFast,
    /// Record remote failures and keep going. Local errors still propagate.
    Continue,
}

/// Outcome of one minimize attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HideResult {
    pub comment_id: String,
    pub minimized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-comment results of a hide pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HideReport {
    /// Number of comments returned by the query.
    pub scanned: usize,
    pub results: Vec<HideResult>,
}

impl HideReport {
    pub fn minimized_count(&self) -> usize {
        self.results.iter().filter(|r| r.minimized).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &HideResult> {
        self.results.iter().filter(|r| r.error.is_some())
    }

    pub fn had_errors(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Output of `formality hide`.
#[derive(Debug, Clone, Serialize)]
pub struct HideOutput {
    pub schema_version: u32,
    pub target: u64,
    pub minimized: usize,
    pub had_errors: bool,
    pub report: HideReport,
}

impl HideOutput {
    pub fn new(target: u64, report: HideReport) -> Self {
        Self {
            schema_version: 1,
            target,
            minimized: report.minimized_count(),
            had_errors: report.had_errors(),
            report,
        }
    }
}

/// Minimize every non-minimized comment by the automation identity that
/// carries the lookup marker. Calls are issued one at a time in the order the
/// query returned them.
pub fn hide_old_summaries(
    github: &impl GitHubPort,
    config: &FormalityConfig,
    repository: &RepositoryRef,
    pr_number: u64,
    policy: HideErrorPolicy,
) -> Result<HideReport, AppError> {
    let comments = github.list_recent_comments(repository, pr_number, config.comments_limit)?;
    let filter = StaleSummaryFilter { bot_login: &config.bot_login, marker: &config.marker };

    let mut report = HideReport { scanned: comments.len(), results: Vec::new() };
    for comment in filter.select(&comments) {
        info!("Hiding outdated summary comment {}", comment.id);
        match github.minimize_comment(&comment.id, MinimizeClassifier::Outdated) {
            Ok(()) => report.results.push(HideResult {
                comment_id: comment.id.clone(),
                minimized: true,
                error: None,
            }),
            Err(err) if policy == HideErrorPolicy::Continue && err.is_remote() => {
                warn!("Failed to hide summary comment {}: {}", comment.id, err);
                report.results.push(HideResult {
                    comment_id: comment.id.clone(),
                    minimized: false,
                    error: Some(err.to_string()),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}
