//! Score command - print one character summary to the terminal

use super::card::build_source;
use crate::config::ProjectConfig;
use crate::reporters::{report_with_format, CardSize, OutputFormat, RenderOptions, Style};
use crate::scoring::ScoreEngine;
use crate::source::is_valid_login;
use anyhow::{Context, Result};

/// Run the score command
pub fn run(
    config: &ProjectConfig,
    login: &str,
    offline: bool,
    explain: bool,
    token: Option<&str>,
) -> Result<()> {
    let login = login.trim();
    if !is_valid_login(login) {
        anyhow::bail!("'{}' is not a valid GitHub login", login);
    }

    let offline = offline || config.defaults.offline.unwrap_or(false);
    let source = build_source(config, offline, token);
    let metrics = source
        .fetch(login)
        .with_context(|| format!("Failed to fetch metrics for {}", login))?;

    let engine = ScoreEngine::from_config(config);
    let state = engine.score(&metrics);
    let summary = report_with_format(
        &state,
        &metrics,
        &RenderOptions::new(Style::default(), CardSize::default()),
        OutputFormat::Text,
    )?;
    print!("{summary}");

    if explain {
        println!("\n{}", engine.explain(&metrics));
    }
    Ok(())
}
