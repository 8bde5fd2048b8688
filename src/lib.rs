//! formality: keep a single, current formality-check summary comment on a pull request.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::commands::{
    HideErrorPolicy, HideOutput, HideReport, HideResult, ProcessOptions, ProcessOutput,
    hide_old_summaries, process_formalities, render_comment,
};
pub use domain::message::job_url;
pub use domain::{
    AppError, Comment, CreatedComment, FormalityConfig, Profile, PullRequestContext,
    RepositoryRef, Transport,
};
pub use ports::GitHubPort;
