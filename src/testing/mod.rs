//! Test doubles shared by unit tests.

mod fake_github;

pub use fake_github::{BOT, Call, FakeGitHub, MARKER};
