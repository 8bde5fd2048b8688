use std::io;

use thiserror::Error;

/// Library-wide error type for formality operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file parsed but carries invalid values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Caller-supplied input failed validation.
    #[error("{0}")]
    Validation(String),

    /// Pull request context could not be resolved from flags or environment.
    #[error("Missing pull request context: {0}")]
    MissingContext(String),

    /// External tool execution failed.
    #[error("{tool} failed: {error}")]
    ExternalToolError { tool: String, error: String },

    /// GitHub REST or GraphQL endpoint answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    GitHubApi { status: u16, message: String },

    /// Request got no HTTP answer (connect, TLS or timeout failure).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// GraphQL response carried an `errors` array or no data.
    #[error("GraphQL request failed: {0}")]
    GraphQl(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Comment template failed to compile or render.
    #[error("Template '{name}' failed: {details}")]
    Template { name: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Internal invariant broke.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn parse<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// True for failures that originate from a remote GitHub call.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::ExternalToolError { .. }
                | AppError::GitHubApi { .. }
                | AppError::Http(_)
                | AppError::GraphQl(_)
        )
    }
}
