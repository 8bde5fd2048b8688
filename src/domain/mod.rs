pub mod comment;
pub mod configuration;
pub mod error;
pub mod message;
pub mod pull_request;

pub use comment::{Comment, CreatedComment, MinimizeClassifier, StaleSummaryFilter};
pub use configuration::{FormalityConfig, GitHubApiConfig, Profile, Transport};
pub use error::AppError;
pub use message::MessageBuilder;
pub use pull_request::{PullRequestContext, RepositoryRef};
