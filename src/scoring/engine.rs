//! Profile scorer
//!
//! Turns `ProfileMetrics` into a `CharacterState`. Pure: no I/O, no clock,
//! no randomness.

use super::tiers::{CLASS_TABLE, LEVEL_CURVE, RANK_TABLE};
use crate::config::{ProjectConfig, XpWeights};
use crate::models::{CharacterState, ProfileMetrics, RepoSummary};
use tracing::{debug, info};

/// Number of repositories kept in `top_projects`
pub const TOP_PROJECT_COUNT: usize = 3;

/// XP earned from one metric
#[derive(Debug, Clone, PartialEq)]
pub struct XpContribution {
    pub metric: &'static str,
    pub count: u64,
    pub weight: f64,
    pub xp: f64,
}

/// Per-metric view of how the total was reached
#[derive(Debug, Clone, PartialEq)]
pub struct XpBreakdown {
    pub contributions: Vec<XpContribution>,
    pub total_xp: u64,
}

/// Scoring engine with a fixed weight table
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    weights: XpWeights,
}

impl ScoreEngine {
    pub fn new(weights: XpWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(config.scoring.weights)
    }

    pub fn weights(&self) -> &XpWeights {
        &self.weights
    }

    /// Derive the full character state
    pub fn score(&self, metrics: &ProfileMetrics) -> CharacterState {
        state_from(&self.breakdown(metrics), metrics)
    }

    /// Weighted sum of every metric, floor-truncated
    pub fn breakdown(&self, metrics: &ProfileMetrics) -> XpBreakdown {
        let w = &self.weights;
        let counts = [
            ("repos", metrics.public_repos, w.repos),
            ("followers", metrics.followers, w.followers),
            ("stars", metrics.total_stars(), w.stars),
            ("forks", metrics.total_forks(), w.forks),
            ("commits", metrics.commits, w.commits),
            ("prs", metrics.prs, w.prs),
            ("issues", metrics.issues, w.issues),
        ];

        let contributions: Vec<XpContribution> = counts
            .into_iter()
            .map(|(metric, count, weight)| XpContribution {
                metric,
                count,
                weight,
                xp: count as f64 * weight,
            })
            .collect();

        let sum: f64 = contributions.iter().map(|c| c.xp).sum();
        // `as` saturates on overflow; NaN and negatives collapse to zero
        let total_xp = if sum.is_nan() {
            0
        } else {
            sum.max(0.0).floor() as u64
        };

        debug!(
            "XP breakdown for {}: {}",
            metrics.login,
            contributions
                .iter()
                .map(|c| format!("{}={:.0}", c.metric, c.xp))
                .collect::<Vec<_>>()
                .join(", ")
        );

        XpBreakdown {
            contributions,
            total_xp,
        }
    }

    /// Generate human-readable explanation of the score
    pub fn explain(&self, metrics: &ProfileMetrics) -> String {
        let breakdown = self.breakdown(metrics);
        let state = state_from(&breakdown, metrics);
        let position = LEVEL_CURVE.position(breakdown.total_xp);
        let mut lines = Vec::new();

        lines.push(format!(
            "# {}: Level {} {} (Rank {})\n",
            metrics.display_name(),
            state.level,
            state.class,
            state.rank
        ));

        lines.push("## XP Formula\n".to_string());
        lines.push("```".to_string());
        lines.push(
            self.weights
                .entries()
                .iter()
                .map(|(name, weight)| format!("{name} × {weight}"))
                .collect::<Vec<_>>()
                .join(" + "),
        );
        lines.push("```\n".to_string());

        lines.push("## Contributions\n".to_string());
        for c in &breakdown.contributions {
            lines.push(format!(
                "- **{}**: {} × {} = {:.0} XP",
                c.metric, c.count, c.weight, c.xp
            ));
        }
        lines.push(format!("- **Total**: {} XP\n", breakdown.total_xp));

        lines.push("## Progression\n".to_string());
        lines.push(format!(
            "- Level {} costs {} XP; {:.1}% complete",
            state.level, position.xp_per_level, state.xp_progress
        ));
        let rank_band = RANK_TABLE.band_for(breakdown.total_xp);
        lines.push(format!(
            "- Rank {} covers {}",
            state.rank,
            band_range(rank_band.lower, rank_band.upper)
        ));
        let class_band = CLASS_TABLE.band_for(breakdown.total_xp);
        lines.push(format!(
            "- Class {} covers {}",
            state.class,
            band_range(class_band.lower, class_band.upper)
        ));

        lines.join("\n")
    }
}

/// Score with the default weight table
pub fn score(metrics: &ProfileMetrics) -> CharacterState {
    ScoreEngine::default().score(metrics)
}

fn band_range(lower: u64, upper: Option<u64>) -> String {
    match upper {
        Some(upper) => format!("[{lower}, {upper}) XP"),
        None => format!("{lower}+ XP"),
    }
}

/// Level, rank, class and projects for an already computed breakdown
fn state_from(breakdown: &XpBreakdown, metrics: &ProfileMetrics) -> CharacterState {
    let total_xp = breakdown.total_xp;
    let position = LEVEL_CURVE.position(total_xp);
    let rank = RANK_TABLE.classify(total_xp);
    let class = CLASS_TABLE.classify(total_xp);

    info!(
        "{}: {} XP, level {} ({:.1}%), rank {}, class {}",
        metrics.login, total_xp, position.level, position.progress, rank, class
    );

    CharacterState {
        total_xp,
        level: position.level,
        xp_progress: position.progress,
        rank,
        class: class.to_string(),
        top_projects: top_projects(&metrics.repos),
        primary_language: primary_language(&metrics.repos),
    }
}

/// Most-starred repositories; equal star counts keep input order
fn top_projects(repos: &[RepoSummary]) -> Vec<RepoSummary> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stars.cmp(&a.stars));
    sorted.truncate(TOP_PROJECT_COUNT);
    sorted
}

/// Most frequent repository language; ties go to the first seen
fn primary_language(repos: &[RepoSummary]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for lang in repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|l| !l.trim().is_empty())
    {
        match counts.iter_mut().find(|(name, _)| *name == lang) {
            Some((_, n)) => *n += 1,
            None => counts.push((lang, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (lang, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((lang, n));
        }
    }
    best.map(|(lang, _)| lang.to_string())
}
