//! Pull request comments and stale-summary selection.

use serde::Serialize;

/// Comment as returned by the comments query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// GraphQL node id, used as the minimize subject.
    pub id: String,
    /// Author login; `None` for deleted accounts ("ghost").
    pub author_login: Option<String>,
    pub body: String,
    pub is_minimized: bool,
}

/// Comment created by the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedComment {
    pub id: u64,
    pub node_id: String,
    pub html_url: String,
}

/// Classifier passed to `minimizeComment`.
///
/// The platform currently ignores the value but the mutation requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeClassifier {
    Outdated,
}

impl MinimizeClassifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outdated => "OUTDATED",
        }
    }
}

/// Predicate set identifying earlier summary comments of this tool.
#[derive(Debug, Clone, Copy)]
pub struct StaleSummaryFilter<'a> {
    pub bot_login: &'a str,
    pub marker: &'a str,
}

impl StaleSummaryFilter<'_> {
    pub fn matches(&self, comment: &Comment) -> bool {
        !comment.is_minimized
            && comment.author_login.as_deref() == Some(self.bot_login)
            && comment.body.contains(self.marker)
    }

    /// Matching comments, in input order.
    pub fn select<'c>(&self, comments: &'c [Comment]) -> Vec<&'c Comment> {
        comments.iter().filter(|c| self.matches(c)).collect()
    }
}
