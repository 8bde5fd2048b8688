pub mod github_command;
pub mod github_http;
pub mod graphql;

pub use github_command::GitHubCommandAdapter;
pub use github_http::HttpGitHubClient;
