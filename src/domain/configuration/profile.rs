use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Named preset for marker, advisory support and wording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Summary block, maintainer-edit advisory and feedback footer.
    #[default]
    Advisory,
    /// Summary block only.
    Classic,
}

impl Profile {
    pub fn label(self) -> &'static str {
        match self {
            Profile::Advisory => "advisory",
            Profile::Classic => "classic",
        }
    }

    pub fn default_marker(self) -> &'static str {
        match self {
            Profile::Advisory => "<!-- FORMALITY_LOOKUP -->",
            Profile::Classic => "<!-- FORMALITY_SUMMARY -->",
        }
    }

    pub fn supports_no_modify_advisory(self) -> bool {
        matches!(self, Profile::Advisory)
    }

    pub fn has_feedback_footer(self) -> bool {
        matches!(self, Profile::Advisory)
    }
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advisory" => Ok(Profile::Advisory),
            "classic" => Ok(Profile::Classic),
            _ => Err(AppError::Validation(format!(
                "Invalid profile '{}'. Expected 'advisory' or 'classic'.",
                s
            ))),
        }
    }
}

/// How GitHub is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Shell out to the `gh` CLI, which carries its own authentication.
    #[default]
    Gh,
    /// Call the REST and GraphQL endpoints directly with a token from the environment.
    Http,
}

impl Transport {
    pub fn label(self) -> &'static str {
        match self {
            Transport::Gh => "gh",
            Transport::Http => "http",
        }
    }
}

impl FromStr for Transport {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gh" => Ok(Transport::Gh),
            "http" => Ok(Transport::Http),
            _ => Err(AppError::Validation(format!(
                "Invalid transport '{}'. Expected 'gh' or 'http'.",
                s
            ))),
        }
    }
}
