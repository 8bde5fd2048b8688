//! Comment body construction.
//!
//! Bodies are assembled from up to three rendered blocks followed by the
//! lookup marker, which every generated body carries so later runs can find
//! and minimize it.

use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::domain::configuration::{CommentTemplates, FormalityConfig};
use crate::domain::{AppError, PullRequestContext};

const SUMMARY: &str = "summary.md";
const NO_MODIFY: &str = "no_modify.md";
const FEEDBACK: &str = "feedback.md";

/// Compiled comment templates.
pub struct CommentRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> CommentRenderer<'a> {
    pub fn new(templates: &'a CommentTemplates) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for (name, source) in [
            (SUMMARY, templates.summary.as_str()),
            (NO_MODIFY, templates.no_modify.as_str()),
            (FEEDBACK, templates.feedback.as_str()),
        ] {
            env.add_template(name, source).map_err(|e| AppError::Template {
                name: name.to_string(),
                details: e.to_string(),
            })?;
        }

        Ok(Self { env })
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String, AppError> {
        let template = self.env.get_template(name).map_err(|e| AppError::Template {
            name: name.to_string(),
            details: e.to_string(),
        })?;
        template
            .render(ctx)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| AppError::Template { name: name.to_string(), details: e.to_string() })
    }
}

/// Deep link to the log of the step that printed the check results.
///
/// `https://github.com/{owner}/{repo}/actions/runs/{run_id}/job/{job_id}?pr={number}#{anchor}`
pub fn job_url(web_url: &str, ctx: &PullRequestContext, job_id: u64, step_anchor: &str) -> String {
    format!(
        "{}/{}/{}/actions/runs/{}/job/{}?pr={}#{}",
        web_url.trim_end_matches('/'),
        ctx.owner(),
        ctx.repo(),
        ctx.run_id,
        job_id,
        ctx.number,
        step_anchor
    )
}

/// Builds summary and comment bodies for one configuration.
pub struct MessageBuilder<'a> {
    config: &'a FormalityConfig,
    renderer: CommentRenderer<'a>,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(config: &'a FormalityConfig) -> Result<Self, AppError> {
        let renderer = CommentRenderer::new(&config.templates)?;
        Ok(Self { config, renderer })
    }

    pub fn job_url(&self, ctx: &PullRequestContext, job_id: u64) -> String {
        job_url(self.config.github.web_url.as_str(), ctx, job_id, &self.config.step_anchor)
    }

    /// Failing-check block: warning banner, collapsible details, job-log link.
    pub fn summary_message(&self, summary: &str, job_url: &str) -> Result<String, AppError> {
        self.renderer.render(
            SUMMARY,
            context! {
                summary => summary,
                job_url => job_url,
                guidelines_url => &self.config.guidelines_url,
            },
        )
    }

    /// Full comment body.
    ///
    /// The summary block appears only for a non-empty summary, the advisory
    /// only when `no_modify` is set and the configuration enables it. The
    /// marker always closes the body.
    pub fn comment_message(
        &self,
        summary: &str,
        job_url: &str,
        no_modify: bool,
    ) -> Result<String, AppError> {
        let mut blocks = Vec::with_capacity(4);

        if !summary.is_empty() {
            blocks.push(self.summary_message(summary, job_url)?);
        }
        if no_modify && self.config.no_modify_advisory {
            blocks.push(self.renderer.render(
                NO_MODIFY,
                context! { allow_edits_docs_url => &self.config.allow_edits_docs_url },
            )?);
        }
        if self.config.feedback_footer {
            blocks.push(
                self.renderer
                    .render(FEEDBACK, context! { feedback_url => &self.config.feedback_url })?,
            );
        }
        blocks.push(self.config.marker.clone());

        let mut body = blocks.into_iter().filter(|b| !b.is_empty()).collect::<Vec<_>>().join("\n\n");
        body.push('\n');
        Ok(body)
    }
}
