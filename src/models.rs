//! Core data models for GuildCard
//!
//! `ProfileMetrics` is what a metrics source hands to the scoring engine,
//! `CharacterState` is what the engine derives from it. Both are plain
//! values rebuilt on every invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single public repository as seen by the scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RepoSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
}

impl RepoSummary {
    pub fn new(name: impl Into<String>, stars: u64) -> Self {
        Self {
            name: name.into(),
            stars,
            ..Default::default()
        }
    }
}

/// Normalized activity counts for one developer profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileMetrics {
    /// Account handle (always present)
    pub login: String,
    /// Display name, if the profile sets one
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    /// PushEvent count among recent events
    #[serde(default)]
    pub commits: u64,
    /// PullRequestEvent count among recent events
    #[serde(default)]
    pub prs: u64,
    /// IssuesEvent count among recent events
    #[serde(default)]
    pub issues: u64,
    #[serde(default)]
    pub repos: Vec<RepoSummary>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileMetrics {
    /// Empty metrics for a handle; every count is zero
    pub fn empty(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Default::default()
        }
    }

    /// Name to print on the card: the profile name when set, the login otherwise
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }

    /// Sum of stargazers over all listed repositories
    pub fn total_stars(&self) -> u64 {
        self.repos.iter().fold(0u64, |acc, r| acc.saturating_add(r.stars))
    }

    /// Sum of forks over all listed repositories
    pub fn total_forks(&self) -> u64 {
        self.repos.iter().fold(0u64, |acc, r| acc.saturating_add(r.forks))
    }
}

/// Rank tier, ordered from lowest to highest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Rank {
    #[default]
    F,
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::F,
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::SS,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rank::F => "F",
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived RPG state for a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub total_xp: u64,
    /// Always >= 1
    pub level: u32,
    /// Percent toward the next level, one decimal, in [0, 100)
    pub xp_progress: f64,
    pub rank: Rank,
    pub class: String,
    /// At most three repositories, most-starred first
    pub top_projects: Vec<RepoSummary>,
    pub primary_language: Option<String>,
}

/// Everything the JSON reporter emits for one profile
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet<'a> {
    pub login: &'a str,
    pub metrics: &'a ProfileMetrics,
    pub state: &'a CharacterState,
}
