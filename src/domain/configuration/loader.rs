//! Configuration file loading.

use std::fs;
use std::io;
use std::path::Path;

use super::formality_config::{ConfigFile, FormalityConfig};
use super::profile::Profile;
use crate::domain::AppError;

/// Load configuration from an optional TOML file.
///
/// Without a path the profile defaults are returned.
pub fn load_config(
    path: Option<&Path>,
    profile_override: Option<Profile>,
) -> Result<FormalityConfig, AppError> {
    let Some(path) = path else {
        return ConfigFile::default().resolve(profile_override);
    };

    let content = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            AppError::Configuration(format!("Config file not found: {}", path.display()))
        } else {
            AppError::Io(err)
        }
    })?;
    parse_config_content(&content, profile_override)
}

/// Parse configuration from string content.
pub fn parse_config_content(
    content: &str,
    profile_override: Option<Profile>,
) -> Result<FormalityConfig, AppError> {
    let file: ConfigFile = toml::from_str(content)?;
    file.resolve(profile_override)
}
