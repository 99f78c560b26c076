//! Text (terminal) reporter with colors and formatting

use crate::models::{CharacterState, ProfileMetrics, Rank};
use anyhow::Result;

/// Rank colors (ANSI escape codes)
fn rank_color(rank: Rank) -> &'static str {
    match rank {
        Rank::SS | Rank::S => "\x1b[35m", // Magenta
        Rank::A => "\x1b[32m",            // Green
        Rank::B => "\x1b[92m",            // Light green
        Rank::C => "\x1b[33m",            // Yellow
        Rank::D => "\x1b[91m",            // Light red
        Rank::E | Rank::F => "\x1b[90m",  // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BAR_CELLS: usize = 20;

/// Progress as a fixed-width block bar
fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).floor() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

/// Render a character summary as formatted terminal output
pub fn render(state: &CharacterState, metrics: &ProfileMetrics) -> Result<String> {
    let mut out = String::new();
    let rank_c = rank_color(state.rank);

    // Header
    out.push_str(&format!(
        "\n{BOLD}{}{RESET} {DIM}(@{}){RESET}\n",
        metrics.display_name(),
        metrics.login
    ));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Level: {BOLD}{}{RESET}  Rank: {rank_c}{BOLD}{}{RESET}  Class: {BOLD}{}{RESET}\n",
        state.level, state.rank, state.class
    ));
    out.push_str(&format!(
        "XP: {BOLD}{}{RESET}  {} {:.1}%\n\n",
        state.total_xp,
        progress_bar(state.xp_progress),
        state.xp_progress
    ));

    // Activity
    out.push_str(&format!("{BOLD}STATS{RESET}\n"));
    out.push_str(&format!(
        "  Repos: {}  Stars: {}  Forks: {}  Followers: {}\n",
        metrics.public_repos,
        metrics.total_stars(),
        metrics.total_forks(),
        metrics.followers
    ));
    out.push_str(&format!(
        "  Commits: {}  PRs: {}  Issues: {}\n",
        metrics.commits, metrics.prs, metrics.issues
    ));
    if let Some(lang) = &state.primary_language {
        out.push_str(&format!("  Main language: {lang}\n"));
    }
    out.push('\n');

    // Top projects
    out.push_str(&format!("{BOLD}TOP PROJECTS{RESET}\n"));
    if state.top_projects.is_empty() {
        out.push_str(&format!("  {DIM}No public projects yet{RESET}\n"));
    }
    for (i, repo) in state.top_projects.iter().enumerate() {
        // chars() keeps multi-byte names intact
        let name: String = repo.name.chars().take(30).collect();
        let name = if repo.name.chars().count() > 30 {
            format!("{name}...")
        } else {
            name
        };
        out.push_str(&format!(
            "  {DIM}{:>2}{RESET}  {:<33} ★ {:<6} {DIM}{}{RESET}\n",
            i + 1,
            name,
            repo.stars,
            repo.language.as_deref().unwrap_or("-")
        ));
    }

    Ok(out)
}
