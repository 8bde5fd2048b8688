//! GraphQL documents and response shapes shared by both GitHub adapters.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{AppError, Comment, CreatedComment};

pub const RECENT_COMMENTS_QUERY: &str = r#"query($owner: String!, $repo: String!, $issueNumber: Int!, $limit: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $issueNumber) {
      comments(last: $limit) {
        nodes {
          id
          author {
            login
          }
          body
          isMinimized
        }
      }
    }
  }
}"#;

pub const MINIMIZE_COMMENT_MUTATION: &str = r#"mutation($id: ID!, $classifier: ReportedContentClassifiers!) {
  minimizeComment(input: {subjectId: $id, classifier: $classifier}) {
    clientMutationId
  }
}"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    pub fn into_data(self) -> Result<T, AppError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let message = errors.into_iter().map(|error| error.message).collect::<Vec<_>>().join("\n");
            return Err(AppError::GraphQl(message));
        }
        self.data.ok_or_else(|| AppError::GraphQl("No data returned from GraphQL query".into()))
    }
}

/// Decode a raw GraphQL response body.
pub fn parse_response<T: DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    let response: GraphQlResponse<T> =
        serde_json::from_str(raw).map_err(|e| AppError::parse("GraphQL response", e))?;
    response.into_data()
}

#[derive(Debug, Deserialize)]
pub struct RecentCommentsData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
struct PullRequestNode {
    comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
struct CommentConnection {
    #[serde(default)]
    nodes: Vec<Option<CommentNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    id: String,
    author: Option<AuthorNode>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    is_minimized: bool,
}

#[derive(Debug, Deserialize)]
struct AuthorNode {
    login: String,
}

impl RecentCommentsData {
    pub fn into_comments(self, pr_number: u64) -> Result<Vec<Comment>, AppError> {
        let pull_request = self
            .repository
            .and_then(|repo| repo.pull_request)
            .ok_or_else(|| AppError::GraphQl(format!("Pull request #{} not found", pr_number)))?;

        Ok(pull_request
            .comments
            .nodes
            .into_iter()
            .flatten()
            .map(|node| Comment {
                id: node.id,
                author_login: node.author.map(|a| a.login),
                body: node.body,
                is_minimized: node.is_minimized,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimizeCommentData {
    #[allow(dead_code)]
    minimize_comment: Option<serde_json::Value>,
}

/// REST representation of a created issue comment (subset).
#[derive(Debug, Deserialize)]
pub struct IssueCommentResponse {
    id: u64,
    #[serde(default)]
    node_id: String,
    #[serde(default)]
    html_url: String,
}

impl From<IssueCommentResponse> for CreatedComment {
    fn from(value: IssueCommentResponse) -> Self {
        CreatedComment { id: value.id, node_id: value.node_id, html_url: value.html_url }
    }
}
