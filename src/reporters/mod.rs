//! Output reporters for GuildCard character sheets
//!
//! Supports multiple output formats:
//! - `svg` - The themed character card
//! - `json` - Machine-readable character sheet
//! - `text` - Terminal summary with colors

mod card;
mod json;
mod text;
mod theme;

pub use card::{
    escape_attr, escape_text, language_badge, render, truncate_description, RenderOptions,
    VectorDocument, DESCRIPTION_LIMIT,
};
pub use theme::{CardSize, Dimensions, Palette, Style};

use crate::models::{CharacterState, ProfileMetrics};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" | "card" => Ok(OutputFormat::Svg),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: svg, json, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Svg => write!(f, "svg"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Render a character in the specified format
pub fn report(
    state: &CharacterState,
    metrics: &ProfileMetrics,
    options: &RenderOptions,
    format: &str,
) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(state, metrics, options, fmt)
}

/// Render a character using an OutputFormat enum
pub fn report_with_format(
    state: &CharacterState,
    metrics: &ProfileMetrics,
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Svg => Ok(render(state, metrics, options).into_string()),
        OutputFormat::Json => json::render(state, metrics),
        OutputFormat::Text => text::render(state, metrics),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Svg => "svg",
        OutputFormat::Json => "json",
        OutputFormat::Text => "txt",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Rank, RepoSummary};
    use chrono::{TimeZone, Utc};

    /// Metrics plus a matching state for reporter tests
    pub(crate) fn test_sheet() -> (ProfileMetrics, CharacterState) {
        let metrics = ProfileMetrics {
            login: "octocat".into(),
            name: Some("The Octocat".into()),
            avatar_url: "https://avatars.example.com/u/583231".into(),
            public_repos: 8,
            followers: 20,
            commits: 30,
            prs: 4,
            issues: 3,
            repos: vec![RepoSummary {
                description: Some("My first repository".into()),
                forks: 3,
                language: Some("Rust".into()),
                ..RepoSummary::new("hello-world", 12)
            }],
            ..Default::default()
        };
        let state = CharacterState {
            total_xp: 1503,
            level: 4,
            xp_progress: 0.6,
            rank: Rank::D,
            class: "Adventurer".into(),
            top_projects: metrics.repos.clone(),
            primary_language: Some("Rust".into()),
        };
        (metrics, state)
    }

    fn fixed_options() -> RenderOptions {
        RenderOptions::with_generated_at(
            Style::Medieval,
            CardSize::Medium,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("svg").unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("txt").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(file_extension(OutputFormat::Svg), "svg");
        assert_eq!(file_extension(OutputFormat::Json), "json");
        assert_eq!(file_extension(OutputFormat::Text), "txt");
    }

    #[test]
    fn test_report_dispatches_by_format() {
        let (metrics, state) = test_sheet();
        let opts = fixed_options();
        let svg = report(&state, &metrics, &opts, "svg").expect("svg");
        assert!(svg.starts_with("<?xml"));
        let json = report(&state, &metrics, &opts, "json").expect("json");
        assert!(json.trim_start().starts_with('{'));
        let text = report(&state, &metrics, &opts, "text").expect("text");
        assert!(text.contains("TOP PROJECTS"));
        assert!(report(&state, &metrics, &opts, "pdf").is_err());
    }
}
