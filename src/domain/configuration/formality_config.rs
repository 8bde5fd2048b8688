//! Formality comment configuration models.

use serde::{Deserialize, Serialize};
use url::Url;

use super::profile::{Profile, Transport};
use crate::domain::AppError;
use crate::domain::message::CommentRenderer;

/// GraphQL `last:` argument ceiling for connection pages.
pub const MAX_COMMENTS_LIMIT: u32 = 100;

const SUMMARY_TEMPLATE: &str = include_str!("../../assets/templates/summary.md.j2");
const NO_MODIFY_TEMPLATE: &str = include_str!("../../assets/templates/no_modify.md.j2");
const FEEDBACK_TEMPLATE: &str = include_str!("../../assets/templates/feedback.md.j2");

/// Configuration file as written by users; every field is optional so that
/// profile defaults can fill the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub profile: Option<Profile>,
    pub bot_login: Option<String>,
    pub marker: Option<String>,
    pub step_anchor: Option<String>,
    pub comments_limit: Option<u32>,
    pub no_modify_advisory: Option<bool>,
    pub feedback_footer: Option<bool>,
    pub guidelines_url: Option<String>,
    pub feedback_url: Option<String>,
    pub allow_edits_docs_url: Option<String>,
    #[serde(default)]
    pub templates: TemplateOverrides,
    #[serde(default)]
    pub github: GitHubApiConfig,
}

/// Optional minijinja sources replacing the embedded templates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateOverrides {
    pub summary: Option<String>,
    pub no_modify: Option<String>,
    pub feedback: Option<String>,
}

/// Template sources used to build comment bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentTemplates {
    pub summary: String,
    pub no_modify: String,
    pub feedback: String,
}

impl Default for CommentTemplates {
    fn default() -> Self {
        Self {
            summary: SUMMARY_TEMPLATE.to_string(),
            no_modify: NO_MODIFY_TEMPLATE.to_string(),
            feedback: FEEDBACK_TEMPLATE.to_string(),
        }
    }
}

/// GitHub endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubApiConfig {
    #[serde(default)]
    pub transport: Transport,
    /// Web host used for job-log links.
    #[serde(default = "default_web_url")]
    pub web_url: Url,
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    #[serde(default = "default_graphql_url")]
    pub graphql_url: Url,
    /// Request timeout in seconds (HTTP transport only).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GitHubApiConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            web_url: default_web_url(),
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GitHubApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        for (field, url) in
            [("web_url", &self.web_url), ("api_url", &self.api_url), ("graphql_url", &self.graphql_url)]
        {
            if url.cannot_be_a_base() {
                return Err(AppError::InvalidConfig(format!("{} must be an absolute URL", field)));
            }
        }
        Ok(())
    }
}

fn default_web_url() -> Url {
    Url::parse("https://github.com").expect("Default web URL must be valid")
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com").expect("Default API URL must be valid")
}

fn default_graphql_url() -> Url {
    Url::parse("https://api.github.com/graphql").expect("Default GraphQL URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormalityConfig {
    pub profile: Profile,
    /// Login of the automation identity that authors summary comments.
    pub bot_login: String,
    /// Substring embedded in every generated body to find it again later.
    pub marker: String,
    /// Job-log anchor of the step that prints the check results.
    pub step_anchor: String,
    pub comments_limit: u32,
    pub no_modify_advisory: bool,
    pub feedback_footer: bool,
    pub guidelines_url: String,
    pub feedback_url: String,
    pub allow_edits_docs_url: String,
    pub templates: CommentTemplates,
    pub github: GitHubApiConfig,
}

impl Default for FormalityConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl FormalityConfig {
    /// Built-in values for a profile.
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            bot_login: "github-actions".to_string(),
            marker: profile.default_marker().to_string(),
            step_anchor: "step:4:1".to_string(),
            comments_limit: MAX_COMMENTS_LIMIT,
            no_modify_advisory: profile.supports_no_modify_advisory(),
            feedback_footer: profile.has_feedback_footer(),
            guidelines_url: "https://openwrt.org/submitting-patches#submission_guidelines"
                .to_string(),
            feedback_url: "https://github.com/openwrt/actions-shared-workflows/issues".to_string(),
            allow_edits_docs_url: "https://docs.github.com/en/pull-requests/collaborating-with-pull-requests/working-with-forks/allowing-changes-to-a-pull-request-branch-created-from-a-fork".to_string(),
            templates: CommentTemplates::default(),
            github: GitHubApiConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("bot_login", &self.bot_login),
            ("marker", &self.marker),
            ("step_anchor", &self.step_anchor),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }
        if self.comments_limit == 0 || self.comments_limit > MAX_COMMENTS_LIMIT {
            return Err(AppError::InvalidConfig(format!(
                "comments_limit must be between 1 and {}",
                MAX_COMMENTS_LIMIT
            )));
        }
        self.github.validate()?;
        CommentRenderer::new(&self.templates)?;
        Ok(())
    }
}

impl ConfigFile {
    /// Merge the file onto profile defaults. `profile_override` wins over the
    /// file's `profile` key.
    pub fn resolve(self, profile_override: Option<Profile>) -> Result<FormalityConfig, AppError> {
        let profile = profile_override.or(self.profile).unwrap_or_default();
        let defaults = FormalityConfig::for_profile(profile);

        let templates = CommentTemplates {
            summary: self.templates.summary.unwrap_or(defaults.templates.summary),
            no_modify: self.templates.no_modify.unwrap_or(defaults.templates.no_modify),
            feedback: self.templates.feedback.unwrap_or(defaults.templates.feedback),
        };

        let config = FormalityConfig {
            profile,
            bot_login: self.bot_login.unwrap_or(defaults.bot_login),
            marker: self.marker.unwrap_or(defaults.marker),
            step_anchor: self.step_anchor.unwrap_or(defaults.step_anchor),
            comments_limit: self.comments_limit.unwrap_or(defaults.comments_limit),
            no_modify_advisory: self.no_modify_advisory.unwrap_or(defaults.no_modify_advisory),
            feedback_footer: self.feedback_footer.unwrap_or(defaults.feedback_footer),
            guidelines_url: self.guidelines_url.unwrap_or(defaults.guidelines_url),
            feedback_url: self.feedback_url.unwrap_or(defaults.feedback_url),
            allow_edits_docs_url: self
                .allow_edits_docs_url
                .unwrap_or(defaults.allow_edits_docs_url),
            templates,
            github: self.github,
        };
        config.validate()?;
        Ok(config)
    }
}
