use crate::domain::{AppError, Comment, CreatedComment, MinimizeClassifier, RepositoryRef};

/// Remote operations against the issue tracker.
pub trait GitHubPort {
    /// Fetch up to `limit` most recent comments of a pull request, oldest first.
    fn list_recent_comments(
        &self,
        repository: &RepositoryRef,
        pr_number: u64,
        limit: u32,
    ) -> Result<Vec<Comment>, AppError>;

    /// Collapse a comment by GraphQL node id.
    fn minimize_comment(
        &self,
        comment_id: &str,
        classifier: MinimizeClassifier,
    ) -> Result<(), AppError>;

    /// Create a new issue comment on a pull request.
    fn create_comment(
        &self,
        repository: &RepositoryRef,
        pr_number: u64,
        body: &str,
    ) -> Result<CreatedComment, AppError>;
}
