mod formality_config;
mod loader;
mod profile;

pub use formality_config::{
    CommentTemplates, ConfigFile, FormalityConfig, GitHubApiConfig, MAX_COMMENTS_LIMIT,
    TemplateOverrides,
};
pub use loader::{load_config, parse_config_content};
pub use profile::{Profile, Transport};
