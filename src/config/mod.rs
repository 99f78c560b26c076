//! Configuration module for GuildCard
//!
//! This module handles:
//! - Project-level configuration (guildcard.toml)
//! - XP weight overrides
//! - CLI defaults
//! - GitHub token resolution

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, resolve_token, CliDefaults, ConfigError,
    GitHubConfig, ProjectConfig, ScoringConfig, XpWeights, CONFIG_FILE_NAMES, EXAMPLE_CONFIG,
    TOKEN_ENV_VARS,
};
