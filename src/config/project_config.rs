//! Project-level configuration support
//!
//! Loads configuration from `guildcard.toml` or `.guildcardrc.json` in the
//! working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # guildcard.toml
//!
//! [scoring.weights]
//! repos = 60.0
//! followers = 40.0
//! stars = 8.0
//!
//! [defaults]
//! style = "cyberpunk"
//! size = "large"
//! format = "svg"
//! output_dir = "cards"
//! company = "Acme"
//! area = "Backend"
//!
//! [github]
//! api_url = "https://api.github.com"
//! timeout_secs = 15
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["guildcard.toml", ".guildcardrc.json"];

/// Errors raised while reading or validating a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weight '{name}' must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Project configuration loaded from guildcard.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Scoring configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,

    /// GitHub API access
    #[serde(default)]
    pub github: GitHubConfig,
}

/// Scoring configuration for experience calculation
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: XpWeights,
}

/// Experience awarded per unit of each profile metric
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct XpWeights {
    #[serde(default = "default_repos_weight")]
    pub repos: f64,
    #[serde(default = "default_followers_weight")]
    pub followers: f64,
    #[serde(default = "default_stars_weight")]
    pub stars: f64,
    #[serde(default = "default_forks_weight")]
    pub forks: f64,
    #[serde(default = "default_commits_weight")]
    pub commits: f64,
    #[serde(default = "default_prs_weight")]
    pub prs: f64,
    #[serde(default = "default_issues_weight")]
    pub issues: f64,
}

impl Default for XpWeights {
    fn default() -> Self {
        Self {
            repos: default_repos_weight(),
            followers: default_followers_weight(),
            stars: default_stars_weight(),
            forks: default_forks_weight(),
            commits: default_commits_weight(),
            prs: default_prs_weight(),
            issues: default_issues_weight(),
        }
    }
}

fn default_repos_weight() -> f64 {
    60.0
}
fn default_followers_weight() -> f64 {
    40.0
}
fn default_stars_weight() -> f64 {
    8.0
}
fn default_forks_weight() -> f64 {
    4.0
}
fn default_commits_weight() -> f64 {
    2.0
}
fn default_prs_weight() -> f64 {
    10.0
}
fn default_issues_weight() -> f64 {
    5.0
}

impl XpWeights {
    /// Named weights, in formula order
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("repos", self.repos),
            ("followers", self.followers),
            ("stars", self.stars),
            ("forks", self.forks),
            ("commits", self.commits),
            ("prs", self.prs),
            ("issues", self.issues),
        ]
    }

    /// Negative weights would break level monotonicity
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Card style (medieval, cyberpunk, fantasy, dark, nature, ocean)
    #[serde(default)]
    pub style: Option<String>,

    /// Card size (small, medium, large)
    #[serde(default)]
    pub size: Option<String>,

    /// Output format (svg, json, text)
    #[serde(default)]
    pub format: Option<String>,

    /// Directory cards are written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Use simulated metrics instead of calling the GitHub API
    #[serde(default)]
    pub offline: Option<bool>,

    /// Company shown on the card instead of the profile's
    #[serde(default)]
    pub company: Option<String>,

    /// Field of work shown next to the company
    #[serde(default)]
    pub area: Option<String>,
}

/// GitHub API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}

/// Token lookup order when `--token` is not given
pub const TOKEN_ENV_VARS: &[&str] = &["PERSONAL_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

/// Resolve the API token: explicit flag first, then the environment
pub fn resolve_token(explicit: Option<&str>) -> Option<String> {
    resolve_token_with(explicit, |key| std::env::var(key).ok())
}

fn resolve_token_with(
    explicit: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let non_blank = |t: &String| !t.trim().is_empty();
    explicit
        .map(str::to_string)
        .filter(non_blank)
        .or_else(|| {
            TOKEN_ENV_VARS
                .iter()
                .filter_map(|key| lookup(key))
                .find(non_blank)
        })
}

/// Load project configuration from a directory.
///
/// Searches for `guildcard.toml`, then `.guildcardrc.json`. A file that fails
/// to parse or validate is reported with a warning and defaults are used.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load and validate a single config file, picking the parser by extension
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ProjectConfig = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    config.scoring.weights.validate()?;
    Ok(config)
}

/// Example config written by `guildcard init`
pub const EXAMPLE_CONFIG: &str = r#"# GuildCard configuration

[scoring.weights]
# XP per unit of each metric
repos = 60.0
followers = 40.0
stars = 8.0
forks = 4.0
commits = 2.0
prs = 10.0
issues = 5.0

[defaults]
# medieval, cyberpunk, fantasy, dark, nature, ocean
style = "medieval"
# small, medium, large
size = "medium"
# svg, json, text
format = "svg"
output_dir = "cards"
# offline = true   # use simulated metrics
# company = "Acme"   # replaces the company from the profile
# area = "Backend"

[github]
api_url = "https://api.github.com"
timeout_secs = 15
"#;
