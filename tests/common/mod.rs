//! Shared testing utilities for formality CLI tests.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MARKER: &str = "<!-- FORMALITY_LOOKUP -->";

/// Environment variables a CI runner may leak into the test process.
const AMBIENT_VARS: &[&str] = &[
    "GITHUB_REPOSITORY",
    "GITHUB_RUN_ID",
    "GITHUB_EVENT_PATH",
    "GITHUB_OUTPUT",
    "GITHUB_TOKEN",
    "GH_TOKEN",
    "FORMALITY_CONFIG",
    "FORMALITY_LOG",
];

/// Isolated environment with a fake `gh` executable on `PATH`.
///
/// The fake records each invocation in `gh.log` as a `---` line followed by
/// one line per argument (multi-line arguments span several lines).
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    bin_dir: PathBuf,
    log_file: PathBuf,
    comments_file: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir for tests");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        let log_file = root.path().join("gh.log");
        let comments_file = root.path().join("comments.json");

        let script = format!(
            r#"#!/bin/sh
echo "---" >> "{log}"
for arg in "$@"; do
    printf '%s\n' "$arg" >> "{log}"
done

if [ -n "$FAKE_GH_FAIL" ]; then
    echo "gh: HTTP 403: Resource not accessible by integration" >&2
    exit 1
fi

ARGS="$*"
case "$ARGS" in
    *minimizeComment*)
        echo '{{"data":{{"minimizeComment":{{"clientMutationId":null}}}}}}'
        ;;
    *"api graphql"*)
        if [ -f "{comments}" ]; then
            cat "{comments}"
        else
            echo '{{"data":{{"repository":{{"pullRequest":{{"comments":{{"nodes":[]}}}}}}}}}}'
        fi
        ;;
    *"--method POST"*)
        echo '{{"id":4242,"node_id":"IC_new","html_url":"https://github.com/openwrt/openwrt/pull/17342#issuecomment-4242"}}'
        ;;
esac
exit 0
"#,
            log = log_file.display(),
            comments = comments_file.display()
        );

        let gh_path = bin_dir.join("gh");
        fs::write(&gh_path, script).expect("Failed to write gh script");
        let mut perms = fs::metadata(&gh_path).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&gh_path, perms).expect("Failed to set permissions");

        Self { root, bin_dir, log_file, comments_file }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Command for the compiled binary with a scrubbed environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("formality").expect("Failed to locate formality binary");
        for var in AMBIENT_VARS {
            cmd.env_remove(var);
        }
        let path = format!(
            "{}:{}",
            self.bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.current_dir(self.root()).env("PATH", path);
        cmd
    }

    /// Command preloaded with repository, run id and PR number.
    pub fn cli_for_pr(&self) -> Command {
        let mut cmd = self.cli();
        cmd.env("GITHUB_REPOSITORY", "openwrt/openwrt").env("GITHUB_RUN_ID", "555");
        cmd.args(["--pr", "17342"]);
        cmd
    }

    /// Write a pull_request event payload and return its path.
    pub fn write_event(&self, maintainer_can_modify: bool) -> PathBuf {
        let path = self.root().join("event.json");
        let payload = format!(
            r#"{{"number":17342,"pull_request":{{"number":17342,"maintainer_can_modify":{}}},"repository":{{"full_name":"openwrt/openwrt"}}}}"#,
            maintainer_can_modify
        );
        fs::write(&path, payload).expect("Failed to write event payload");
        path
    }

    /// Seed the comments returned by the GraphQL query.
    ///
    /// Each entry is `(id, author, body, is_minimized)`.
    pub fn seed_comments(&self, comments: &[(&str, &str, &str, bool)]) {
        let nodes: Vec<serde_json::Value> = comments
            .iter()
            .map(|(id, author, body, minimized)| {
                serde_json::json!({
                    "id": id,
                    "author": {"login": author},
                    "body": body,
                    "isMinimized": minimized,
                })
            })
            .collect();
        let response = serde_json::json!({
            "data": {"repository": {"pullRequest": {"comments": {"nodes": nodes}}}}
        });
        fs::write(&self.comments_file, response.to_string()).expect("Failed to seed comments");
    }

    pub fn gh_log(&self) -> String {
        fs::read_to_string(&self.log_file).unwrap_or_default()
    }

    /// Argument lists of each recorded `gh` invocation.
    pub fn gh_invocations(&self) -> Vec<String> {
        self.gh_log()
            .split("---\n")
            .filter(|chunk| !chunk.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn minimize_invocations(&self) -> Vec<String> {
        self.gh_invocations().into_iter().filter(|i| i.contains("minimizeComment")).collect()
    }

    pub fn post_invocations(&self) -> Vec<String> {
        self.gh_invocations().into_iter().filter(|i| i.contains("--method\nPOST")).collect()
    }
}
