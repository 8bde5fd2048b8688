mod github;

pub use github::GitHubPort;
