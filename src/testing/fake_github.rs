use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::{AppError, Comment, CreatedComment, MinimizeClassifier, RepositoryRef};
use crate::ports::GitHubPort;

pub const BOT: &str = "github-actions";
pub const MARKER: &str = "<!-- FORMALITY_LOOKUP -->";

/// Recorded remote call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListComments { pr_number: u64, limit: u32 },
    Minimize { comment_id: String, classifier: &'static str },
    CreateComment { pr_number: u64, body: String },
}

/// In-memory GitHub that records every call.
#[derive(Default)]
pub struct FakeGitHub {
    pub comments: Mutex<Vec<Comment>>,
    pub calls: Mutex<Vec<Call>>,
    pub failing_minimize_ids: HashSet<String>,
    /// Failing minimize calls report a local error instead of a GraphQL one.
    pub local_minimize_failure: bool,
    pub fail_listing: bool,
    pub fail_create: bool,
}

impl FakeGitHub {
    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self { comments: Mutex::new(comments), ..Default::default() }
    }

    pub fn bot_summary(id: &str, is_minimized: bool) -> Comment {
        Comment {
            id: id.to_string(),
            author_login: Some(BOT.to_string()),
            body: format!("> [!WARNING]\nold summary\n{}", MARKER),
            is_minimized,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn minimized_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Minimize { comment_id, .. } => Some(comment_id),
                _ => None,
            })
            .collect()
    }

    pub fn created_bodies(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateComment { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }
}

impl GitHubPort for FakeGitHub {
    fn list_recent_comments(
        &self,
        _repository: &RepositoryRef,
        pr_number: u64,
        limit: u32,
    ) -> Result<Vec<Comment>, AppError> {
        self.calls.lock().unwrap().push(Call::ListComments { pr_number, limit });
        if self.fail_listing {
            return Err(AppError::GraphQl("Could not resolve to a PullRequest".into()));
        }
        let comments = self.comments.lock().unwrap();
        let skip = comments.len().saturating_sub(limit as usize);
        Ok(comments[skip..].to_vec())
    }

    fn minimize_comment(
        &self,
        comment_id: &str,
        classifier: MinimizeClassifier,
    ) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(Call::Minimize {
            comment_id: comment_id.to_string(),
            classifier: classifier.as_str(),
        });
        if self.failing_minimize_ids.contains(comment_id) {
            if self.local_minimize_failure {
                return Err(AppError::InternalError(format!("Lost track of {}", comment_id)));
            }
            return Err(AppError::GraphQl(format!("Could not minimize {}", comment_id)));
        }
        if let Some(comment) = self.comments.lock().unwrap().iter_mut().find(|c| c.id == comment_id)
        {
            comment.is_minimized = true;
        }
        Ok(())
    }

    fn create_comment(
        &self,
        _repository: &RepositoryRef,
        pr_number: u64,
        body: &str,
    ) -> Result<CreatedComment, AppError> {
        self.calls.lock().unwrap().push(Call::CreateComment { pr_number, body: body.to_string() });
        if self.fail_create {
            return Err(AppError::GitHubApi { status: 403, message: "Forbidden".into() });
        }
        let mut comments = self.comments.lock().unwrap();
        let id = 1000 + comments.len() as u64;
        comments.push(Comment {
            id: format!("IC_{}", id),
            author_login: Some(BOT.to_string()),
            body: body.to_string(),
            is_minimized: false,
        });
        Ok(CreatedComment {
            id,
            node_id: format!("IC_{}", id),
            html_url: format!("https://github.com/o/r/pull/{}#issuecomment-{}", pr_number, id),
        })
    }
}
