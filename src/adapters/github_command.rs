//! GitHub adapter backed by the `gh` CLI.
//!
//! Authentication is whatever `gh` already has (`GH_TOKEN`, `GITHUB_TOKEN` or
//! a stored login).

use std::process::Command;

use tracing::debug;

use super::graphql::{
    IssueCommentResponse, MINIMIZE_COMMENT_MUTATION, MinimizeCommentData, RECENT_COMMENTS_QUERY,
    RecentCommentsData, parse_response,
};
use crate::domain::{AppError, Comment, CreatedComment, MinimizeClassifier, RepositoryRef};
use crate::ports::GitHubPort;

#[derive(Debug, Clone, Default)]
pub struct GitHubCommandAdapter;

impl GitHubCommandAdapter {
    pub fn new() -> Self {
        Self
    }

    fn run_gh(&self, args: &[&str]) -> Result<String, AppError> {
        debug!(subcommand = args.first().copied().unwrap_or_default(), "invoking gh");
        let output = Command::new("gh").args(args).output().map_err(|e| {
            AppError::ExternalToolError {
                tool: "gh".into(),
                error: format!("Failed to execute gh CLI: {}", e),
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ExternalToolError {
                tool: "gh".into(),
                error: format!("gh command failed: {}", stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitHubPort for GitHubCommandAdapter {
    fn list_recent_comments(
        &self,
        repository: &RepositoryRef,
        pr_number: u64,
        limit: u32,
    ) -> Result<Vec<Comment>, AppError> {
        let query = format!("query={}", RECENT_COMMENTS_QUERY);
        let owner = format!("owner={}", repository.owner);
        let repo = format!("repo={}", repository.name);
        let issue_number = format!("issueNumber={}", pr_number);
        let limit = format!("limit={}", limit);

        let output = self.run_gh(&[
            "api",
            "graphql",
            "-f",
            &query,
            "-f",
            &owner,
            "-f",
            &repo,
            "-F",
            &issue_number,
            "-F",
            &limit,
        ])?;

        parse_response::<RecentCommentsData>(&output)?.into_comments(pr_number)
    }

    fn minimize_comment(
        &self,
        comment_id: &str,
        classifier: MinimizeClassifier,
    ) -> Result<(), AppError> {
        let query = format!("query={}", MINIMIZE_COMMENT_MUTATION);
        let id = format!("id={}", comment_id);
        let classifier = format!("classifier={}", classifier.as_str());

        let output = self.run_gh(&["api", "graphql", "-f", &query, "-f", &id, "-f", &classifier])?;
        parse_response::<MinimizeCommentData>(&output)?;
        Ok(())
    }

    fn create_comment(
        &self,
        repository: &RepositoryRef,
        pr_number: u64,
        body: &str,
    ) -> Result<CreatedComment, AppError> {
        let endpoint =
            format!("repos/{}/{}/issues/{}/comments", repository.owner, repository.name, pr_number);
        let body = format!("body={}", body);

        let output = self.run_gh(&["api", "--method", "POST", &endpoint, "-f", &body])?;

        let response: IssueCommentResponse = serde_json::from_str(&output)
            .map_err(|e| AppError::parse("comment creation response", e))?;
        Ok(response.into())
    }
}
