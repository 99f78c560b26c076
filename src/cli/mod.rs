//! CLI command definitions and handlers

mod card;
mod init;
mod score;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::reporters::{CardSize, Style};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// GuildCard - RPG character cards for GitHub profiles
#[derive(Parser, Debug)]
#[command(name = "guildcard")]
#[command(
    version,
    about = "Turn a GitHub profile into an RPG character card (XP, level, rank, class)",
    after_help = "\
Examples:
  guildcard card octocat                      Write cards/octocat.svg
  guildcard card octocat torvalds --style dark --size large
  guildcard card octocat --format json -o out JSON character sheet
  guildcard card octocat --offline            Simulated metrics, no network
  guildcard score octocat --explain           Show the XP breakdown"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: guildcard.toml or .guildcardrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "4", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build character cards for one or more GitHub logins
    Card {
        /// GitHub logins
        #[arg(required = true, num_args = 1..)]
        logins: Vec<String>,

        /// Card style: medieval, cyberpunk, fantasy, dark, nature, ocean
        #[arg(long, short = 's')]
        style: Option<String>,

        /// Card size: small, medium, large
        #[arg(long)]
        size: Option<String>,

        /// Output format: svg, json, text (text prints to stdout)
        #[arg(long, short = 'f', value_parser = ["svg", "json", "text"])]
        format: Option<String>,

        /// Output directory (default: cards)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Use simulated metrics instead of the GitHub API
        #[arg(long)]
        offline: bool,

        /// GitHub token (default: PERSONAL_TOKEN, GH_TOKEN or GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Company shown on the card (default: the profile's company)
        #[arg(long)]
        company: Option<String>,

        /// Field of work shown next to the company
        #[arg(long)]
        area: Option<String>,
    },

    /// Print the character summary for one login
    Score {
        /// GitHub login
        login: String,

        /// Use simulated metrics instead of the GitHub API
        #[arg(long)]
        offline: bool,

        /// Show the XP formula with a per-metric breakdown
        #[arg(long)]
        explain: bool,

        /// GitHub token (default: PERSONAL_TOKEN, GH_TOKEN or GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// List card styles and sizes
    Themes,

    /// Write an example guildcard.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing guildcard.toml
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

/// Load the explicit config file, or look in the current directory
fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_project_config(Path::new("."))),
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Card {
            logins,
            style,
            size,
            format,
            output,
            offline,
            token,
            company,
            area,
        } => {
            let config = load_config(cli.config.as_deref())?;
            card::run(
                &config,
                card::CardArgs {
                    logins,
                    style,
                    size,
                    format,
                    output,
                    offline,
                    token,
                    company,
                    area,
                },
                cli.workers,
            )
        }

        Commands::Score {
            login,
            offline,
            explain,
            token,
        } => {
            let config = load_config(cli.config.as_deref())?;
            score::run(&config, &login, offline, explain, token.as_deref())
        }

        Commands::Themes => {
            run_themes();
            Ok(())
        }

        Commands::Init { path, force } => init::run(&path, force),

        Commands::Version => {
            println!("guildcard {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_themes() {
    println!("{}", style("Styles").bold());
    for s in Style::ALL {
        let p = s.palette();
        println!(
            "  {:<10} {}",
            style(s.name()).cyan(),
            style(format!(
                "bg {} primary {} accent {} text {}",
                p.background, p.primary, p.accent, p.text
            ))
            .dim()
        );
    }
    println!("\n{}", style("Sizes").bold());
    for size in CardSize::ALL {
        let d = size.dimensions();
        println!(
            "  {:<10} {}",
            style(size.name()).cyan(),
            style(format!("{}x{} (scale {})", d.width, d.height, d.scale)).dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("8"), Ok(8));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_card_requires_login() {
        assert!(Cli::try_parse_from(["guildcard", "card"]).is_err());
        let cli = Cli::try_parse_from(["guildcard", "card", "a", "b", "--offline"]).unwrap();
        match cli.command {
            Commands::Card {
                logins, offline, ..
            } => {
                assert_eq!(logins, vec!["a", "b"]);
                assert!(offline);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_card_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["guildcard", "card", "a", "--format", "pdf"]).is_err());
    }
}
