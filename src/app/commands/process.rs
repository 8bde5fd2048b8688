//! `process` command: refresh the formality summary comment of a pull request.

use serde::Serialize;
use tracing::info;

use super::hide::{HideErrorPolicy, HideReport, hide_old_summaries};
use crate::domain::{AppError, CreatedComment, FormalityConfig, MessageBuilder, PullRequestContext};
use crate::ports::GitHubPort;

/// Options for `formality process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Id of the job whose log holds the check results.
    pub job_id: u64,
    /// Failing-check summary; may be empty.
    pub summary: String,
    /// Post the advisory when maintainers cannot edit the branch.
    pub warn_on_no_modify: bool,
    pub hide_policy: HideErrorPolicy,
}

/// Output of `formality process`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub schema_version: u32,
    pub target: u64,
    pub posted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
    pub no_modify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<CreatedComment>,
    pub hidden: HideReport,
}

/// Whether the maintainer-edit advisory applies to this run.
pub fn no_modify_applies(
    config: &FormalityConfig,
    ctx: &PullRequestContext,
    warn_on_no_modify: bool,
) -> bool {
    config.no_modify_advisory && warn_on_no_modify && ctx.maintainer_edits_disabled()
}

/// Render the comment body without touching GitHub.
pub fn render_comment(
    config: &FormalityConfig,
    ctx: &PullRequestContext,
    job_id: u64,
    summary: &str,
    no_modify: bool,
) -> Result<String, AppError> {
    let builder = MessageBuilder::new(config)?;
    let job_url = builder.job_url(ctx, job_id);
    builder.comment_message(summary.trim(), &job_url, no_modify)
}

/// Hide stale summaries, then post a fresh one if there is anything to say.
///
/// At most one comment is created per call and only after the hide pass has
/// finished, so a successful run leaves a single visible summary.
pub fn process_formalities(
    github: &impl GitHubPort,
    config: &FormalityConfig,
    ctx: &PullRequestContext,
    options: ProcessOptions,
) -> Result<ProcessOutput, AppError> {
    // Building the renderer first surfaces template errors before any mutation.
    let builder = MessageBuilder::new(config)?;

    let hidden =
        hide_old_summaries(github, config, &ctx.repository, ctx.number, options.hide_policy)?;

    let no_modify = no_modify_applies(config, ctx, options.warn_on_no_modify);
    let summary = options.summary.trim();

    if summary.is_empty() && !no_modify {
        info!("Summary is empty and modify checks passed, skipping posting a comment");
        return Ok(ProcessOutput {
            schema_version: 1,
            target: ctx.number,
            posted: false,
            skipped_reason: Some("summary is empty and maintainers can modify".to_string()),
            no_modify,
            comment: None,
            hidden,
        });
    }

    info!("Posting new summary comment");
    let job_url = builder.job_url(ctx, options.job_id);
    let body = builder.comment_message(summary, &job_url, no_modify)?;
    let comment = github.create_comment(&ctx.repository, ctx.number, &body)?;

    Ok(ProcessOutput {
        schema_version: 1,
        target: ctx.number,
        posted: true,
        skipped_reason: None,
        no_modify,
        comment: Some(comment),
        hidden,
    })
}
