//! Card command - fetch, score and render one or more profiles

use crate::config::{resolve_token, ProjectConfig};
use crate::reporters::{
    file_extension, report_with_format, CardSize, OutputFormat, RenderOptions, Style,
};
use crate::scoring::ScoreEngine;
use crate::source::{
    is_valid_login, FallbackSource, GitHubClient, MetricsSource, SimulatedSource,
};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_OUTPUT_DIR: &str = "cards";

/// Flags of the card command, before config defaults are applied
#[derive(Debug, Default)]
pub struct CardArgs {
    pub logins: Vec<String>,
    pub style: Option<String>,
    pub size: Option<String>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub offline: bool,
    pub token: Option<String>,
    pub company: Option<String>,
    pub area: Option<String>,
}

/// Pick the metrics source: simulated when offline, live with fallback otherwise
pub(super) fn build_source(
    config: &ProjectConfig,
    offline: bool,
    token: Option<&str>,
) -> Box<dyn MetricsSource> {
    if offline {
        debug!("Offline mode: using simulated metrics");
        return Box::new(SimulatedSource);
    }
    let client = GitHubClient::new(&config.github, resolve_token(token));
    Box::new(FallbackSource::new(client))
}

/// Create spinner progress style
fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Drop duplicates, keeping first occurrence order
fn dedup_logins(logins: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    logins
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| seen.insert(l.to_lowercase()))
        .collect()
}

fn build_one(
    source: &dyn MetricsSource,
    engine: &ScoreEngine,
    login: &str,
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<String> {
    let metrics = source
        .fetch(login)
        .with_context(|| format!("Failed to fetch metrics for {}", login))?;
    let state = engine.score(&metrics);
    report_with_format(&state, &metrics, options, format)
}

/// Run the card command
pub fn run(config: &ProjectConfig, args: CardArgs, workers: usize) -> Result<()> {
    let defaults = &config.defaults;

    let format_name = args
        .format
        .or_else(|| defaults.format.clone())
        .unwrap_or_else(|| "svg".to_string());
    let format = OutputFormat::from_str(&format_name)?;
    let card_style = Style::parse(args.style.as_deref().or(defaults.style.as_deref()).unwrap_or(""));
    let size = CardSize::parse(args.size.as_deref().or(defaults.size.as_deref()).unwrap_or(""));
    let offline = args.offline || defaults.offline.unwrap_or(false);
    let output_dir = args
        .output
        .or_else(|| defaults.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let logins = dedup_logins(args.logins);
    if let Some(bad) = logins.iter().find(|l| !is_valid_login(l)) {
        anyhow::bail!("'{}' is not a valid GitHub login", bad);
    }

    let source = build_source(config, offline, args.token.as_deref());
    let engine = ScoreEngine::from_config(config);
    // One timestamp for the whole batch
    let options = RenderOptions::new(card_style, size).with_affiliation(
        args.company.or_else(|| defaults.company.clone()),
        args.area.or_else(|| defaults.area.clone()),
    );
    info!(
        "Building {} card(s): style={} size={} format={}",
        logins.len(),
        card_style,
        size,
        format
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style());
    spinner.set_message(format!("Summoning {} character(s)...", logins.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Failed to build worker pool")?;
    let results: Vec<(String, Result<String>)> = pool.install(|| {
        logins
            .par_iter()
            .map(|login| {
                let out = build_one(source.as_ref(), &engine, login, &options, format);
                (login.clone(), out)
            })
            .collect()
    });
    spinner.finish_and_clear();

    if format == OutputFormat::Text {
        let mut failed = 0;
        for (login, result) in results {
            match result {
                Ok(text) => print!("{text}"),
                Err(e) => {
                    failed += 1;
                    eprintln!("{} {}: {:#}", style("✗").red(), login, e);
                }
            }
        }
        if failed > 0 {
            anyhow::bail!("{} card(s) failed", failed);
        }
        return Ok(());
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut failed = 0;
    for (login, result) in results {
        match result {
            Ok(document) => {
                let path = output_dir.join(format!("{}.{}", login, file_extension(format)));
                std::fs::write(&path, document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "{} Wrote {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {:#}", style("✗").red(), login, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} card(s) failed", failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_logins_keeps_order() {
        let logins = vec![
            "octocat".to_string(),
            "torvalds".to_string(),
            "OctoCat".to_string(),
            " torvalds ".to_string(),
        ];
        assert_eq!(dedup_logins(logins), vec!["octocat", "torvalds"]);
    }

    #[test]
    fn test_offline_run_writes_svg_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::default();

        run(
            &config,
            CardArgs {
                logins: vec!["octocat".into(), "torvalds".into()],
                output: Some(dir.path().to_path_buf()),
                offline: true,
                ..Default::default()
            },
            2,
        )
        .unwrap();
        let svg = std::fs::read_to_string(dir.path().join("octocat.svg")).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(dir.path().join("torvalds.svg").exists());

        run(
            &config,
            CardArgs {
                logins: vec!["octocat".into()],
                format: Some("json".into()),
                output: Some(dir.path().to_path_buf()),
                offline: true,
                ..Default::default()
            },
            1,
        )
        .unwrap();
        let json = std::fs::read_to_string(dir.path().join("octocat.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["login"], "octocat");
    }

    #[test]
    fn test_affiliation_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.defaults.company = Some("Config Corp".into());
        config.defaults.area = Some("Data".into());

        run(
            &config,
            CardArgs {
                logins: vec!["octocat".into()],
                output: Some(dir.path().to_path_buf()),
                offline: true,
                company: Some("Flag Inc".into()),
                ..Default::default()
            },
            1,
        )
        .unwrap();
        let svg = std::fs::read_to_string(dir.path().join("octocat.svg")).unwrap();
        assert!(svg.contains("🏢 Flag Inc • 🧭 Data"));
        assert!(!svg.contains("Config Corp"));
    }

    #[test]
    fn test_invalid_login_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            &ProjectConfig::default(),
            CardArgs {
                logins: vec!["../escape".into()],
                output: Some(dir.path().to_path_buf()),
                offline: true,
                ..Default::default()
            },
            1,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a valid GitHub login"));
    }
}
