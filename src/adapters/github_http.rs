//! GitHub adapter calling the REST and GraphQL endpoints with reqwest.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use super::graphql::{
    GraphQlResponse, IssueCommentResponse, MINIMIZE_COMMENT_MUTATION, MinimizeCommentData,
    RECENT_COMMENTS_QUERY, RecentCommentsData,
};
use crate::domain::{
    AppError, Comment, CreatedComment, GitHubApiConfig, MinimizeClassifier, RepositoryRef,
};
use crate::ports::GitHubPort;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// HTTP client for the GitHub API.
#[derive(Clone)]
pub struct HttpGitHubClient {
    token: String,
    api_url: Url,
    graphql_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGitHubClient")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpGitHubClient {
    /// Create a new HTTP client with the given token and endpoint configuration.
    pub fn new(token: String, config: &GitHubApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // GitHub rejects requests without a User-Agent.
            .user_agent(concat!("formality/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token,
            api_url: config.api_url.clone(),
            graphql_url: config.graphql_url.clone(),
            client,
        })
    }

    /// Create from `GITHUB_TOKEN` (or `GH_TOKEN`) provided by the workflow.
    pub fn from_env(config: &GitHubApiConfig) -> Result<Self, AppError> {
        let token = TOKEN_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| {
                AppError::Configuration(
                    "GITHUB_TOKEN or GH_TOKEN environment variable not set".into(),
                )
            })?;

        Self::new(token, config)
    }

    fn rest_url(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.api_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| AppError::parse("GitHub API URL", e))
    }

    fn post<P: Serialize + ?Sized>(&self, url: Url, payload: &P) -> Result<Response, AppError> {
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(API_VERSION_HEADER, API_VERSION)
            .json(payload)
            .send()
            .map_err(|e| AppError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
        Err(AppError::GitHubApi { status: status.as_u16(), message: api_error_message(&text) })
    }

    fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AppError> {
        let response = self.post(
            self.graphql_url.clone(),
            &json!({ "query": query, "variables": variables }),
        )?;
        let envelope: GraphQlResponse<T> =
            response.json().map_err(|e| AppError::parse("GraphQL response", e))?;
        envelope.into_data()
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn api_error_message(text: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(text)
        .map(|body| body.message)
        .unwrap_or_else(|_| text.trim().to_string())
}

impl GitHubPort for HttpGitHubClient {
    fn list_recent_comments(
        &self,
        repository: &RepositoryRef,
        pr_number: u64,
        limit: u32,
    ) -> Result<Vec<Comment>, AppError> {
        let data: RecentCommentsData = self.graphql(
            RECENT_COMMENTS_QUERY,
            json!({
                "owner": repository.owner,
                "repo": repository.name,
                "issueNumber": pr_number,
                "limit": limit,
            }),
        )?;
        data.into_comments(pr_number)
    }

    fn minimize_comment(
        &self,
        comment_id: &str,
        classifier: MinimizeClassifier,
    ) -> Result<(), AppError> {
        let _: MinimizeCommentData = self.graphql(
            MINIMIZE_COMMENT_MUTATION,
            json!({ "id": comment_id, "classifier": classifier.as_str() }),
        )?;
        Ok(())
    }

    fn create_comment(
        &self,
        repository: &RepositoryRef,
        pr_number: u64,
        body: &str,
    ) -> Result<CreatedComment, AppError> {
        let url = self.rest_url(&format!(
            "repos/{}/{}/issues/{}/comments",
            repository.owner, repository.name, pr_number
        ))?;
        let response = self.post(url, &json!({ "body": body }))?;
        let created: IssueCommentResponse =
            response.json().map_err(|e| AppError::parse("comment creation response", e))?;
        Ok(created.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serial_test::serial;

    fn client_for(server: &mockito::Server) -> HttpGitHubClient {
        let config = GitHubApiConfig {
            api_url: Url::parse(&server.url()).unwrap(),
            graphql_url: Url::parse(&format!("{}/graphql", server.url())).unwrap(),
            timeout_secs: 1,
            ..Default::default()
        };
        HttpGitHubClient::new("test-token".to_string(), &config).unwrap()
    }

    fn repo() -> RepositoryRef {
        "openwrt/openwrt".parse().unwrap()
    }

    #[test]
    fn lists_comments_through_graphql() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(json!({
                "variables": {"owner": "openwrt", "repo": "openwrt", "issueNumber": 12, "limit": 100}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":{"repository":{"pullRequest":{"comments":{"nodes":[
                    {"id":"IC_a","author":{"login":"github-actions"},"body":"x","isMinimized":false}
                ]}}}}}"#,
            )
            .create();

        let comments = client_for(&server).list_recent_comments(&repo(), 12, 100).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, "IC_a");
        mock.assert();
    }

    #[test]
    fn minimize_sends_outdated_classifier() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({
                "variables": {"id": "IC_old", "classifier": "OUTDATED"}
            })))
            .with_status(200)
            .with_body(r#"{"data":{"minimizeComment":{"clientMutationId":null}}}"#)
            .expect(1)
            .create();

        client_for(&server).minimize_comment("IC_old", MinimizeClassifier::Outdated).unwrap();
        mock.assert();
    }

    #[test]
    fn graphql_errors_surface() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data":null,"errors":[{"message":"Resource not accessible by integration"}]}"#)
            .create();

        let err = client_for(&server)
            .minimize_comment("IC_old", MinimizeClassifier::Outdated)
            .unwrap_err();
        assert!(
            matches!(err, AppError::GraphQl(msg) if msg.contains("Resource not accessible"))
        );
    }

    #[test]
    fn creates_comment_via_rest() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/repos/openwrt/openwrt/issues/12/comments")
            .match_header("accept", "application/vnd.github+json")
            .match_body(Matcher::Json(json!({"body": "hello"})))
            .with_status(201)
            .with_body(
                r#"{"id":99,"node_id":"IC_new","html_url":"https://github.com/openwrt/openwrt/pull/12#issuecomment-99"}"#,
            )
            .create();

        let created = client_for(&server).create_comment(&repo(), 12, "hello").unwrap();
        assert_eq!(created.id, 99);
        assert_eq!(created.node_id, "IC_new");
        mock.assert();
    }

    #[test]
    fn rest_failure_reports_status_and_message() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/repos/openwrt/openwrt/issues/12/comments")
            .with_status(403)
            .with_body(r#"{"message":"API rate limit exceeded"}"#)
            .create();

        let err = client_for(&server).create_comment(&repo(), 12, "hello").unwrap_err();
        assert!(matches!(
            err,
            AppError::GitHubApi { status: 403, ref message } if message == "API rate limit exceeded"
        ));
    }

    #[test]
    fn server_errors_are_not_retried() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/graphql").with_status(502).expect(1).create();

        let result = client_for(&server).list_recent_comments(&repo(), 12, 100);
        assert!(matches!(result, Err(AppError::GitHubApi { status: 502, .. })));
        mock.assert();
    }

    #[test]
    fn unreachable_host_is_a_remote_failure() {
        let config = GitHubApiConfig {
            api_url: Url::parse("http://127.0.0.1:9").unwrap(),
            graphql_url: Url::parse("http://127.0.0.1:9/graphql").unwrap(),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = HttpGitHubClient::new("test-token".to_string(), &config).unwrap();

        let err = client.list_recent_comments(&repo(), 12, 100).unwrap_err();
        assert!(matches!(err, AppError::Http(_)), "unexpected error: {:?}", err);
        assert!(err.is_remote());
    }

    #[test]
    #[serial]
    fn from_env_requires_a_token() {
        // SAFETY: env-mutating tests are serialized
        unsafe {
            std::env::remove_var("GITHUB_TOKEN");
            std::env::remove_var("GH_TOKEN");
        }

        let err = HttpGitHubClient::from_env(&GitHubApiConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("GITHUB_TOKEN")));
    }

    #[test]
    #[serial]
    fn from_env_skips_blank_github_token() {
        // SAFETY: env-mutating tests are serialized
        unsafe {
            std::env::set_var("GITHUB_TOKEN", "  ");
            std::env::set_var("GH_TOKEN", "gh-token");
        }

        let client = HttpGitHubClient::from_env(&GitHubApiConfig::default());

        // SAFETY: env-mutating tests are serialized
        unsafe {
            std::env::remove_var("GITHUB_TOKEN");
            std::env::remove_var("GH_TOKEN");
        }
        assert_eq!(client.unwrap().token, "gh-token");
    }

    #[test]
    fn debug_redacts_token() {
        let server = mockito::Server::new();
        let rendered = format!("{:?}", client_for(&server));
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
