//! Deterministic simulated metrics
//!
//! The seed is the 31-multiplier string hash over UTF-16 code units (wrapping
//! i32, absolute value). Values come from the linear congruential generator
//! `seed = (seed * 9301 + 49297) mod 233280`, read as `seed / 233280`.
//! The same login always yields the same metrics.

use super::{FetchResult, MetricsSource};
use crate::models::{ProfileMetrics, RepoSummary};
use chrono::{TimeZone, Utc};

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

const MAX_SIMULATED_REPOS: u64 = 6;

const NAME_PREFIXES: &[&str] = &[
    "quantum", "tiny", "rusty", "async", "pixel", "shadow", "swift", "hyper", "open", "micro",
];
const NAME_SUFFIXES: &[&str] = &[
    "forge", "engine", "kit", "cli", "parser", "server", "bot", "notes", "lab", "toolkit",
];
const LANGUAGES: &[&str] = &[
    "Rust",
    "Python",
    "TypeScript",
    "JavaScript",
    "Go",
    "Java",
    "C++",
    "Ruby",
];
const DESCRIPTIONS: &[&str] = &[
    "Experiments and prototypes",
    "A small utility that does one thing well",
    "Personal dotfiles and setup scripts",
    "Side project built over a weekend",
    "Library for parsing structured text formats quickly and safely",
    "",
];

/// Hash a login into a non-negative seed
pub fn login_seed(login: &str) -> u64 {
    let mut hash: i32 = 0;
    for unit in login.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    hash.unsigned_abs() as u64
}

/// The fixed linear congruential generator
#[derive(Debug, Clone)]
pub struct SeededLcg {
    state: u64,
}

impl SeededLcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state % LCG_MODULUS * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Next integer in the inclusive range `[lo, hi]`
    pub fn range(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        (lo + (self.next_f64() * span).floor() as u64).min(hi)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }
}

/// Simulated metrics for a login
pub fn simulated_metrics(login: &str) -> ProfileMetrics {
    let mut rng = SeededLcg::new(login_seed(login));

    let public_repos = rng.range(3, 60);
    let followers = rng.range(0, 400);
    let commits = rng.range(0, 60);
    let prs = rng.range(0, 20);
    let issues = rng.range(0, 15);

    let repo_count = public_repos.min(MAX_SIMULATED_REPOS);
    let repos = (0..repo_count)
        .map(|_| {
            let name = format!("{}-{}", rng.pick(NAME_PREFIXES), rng.pick(NAME_SUFFIXES));
            let stars = rng.range(0, 300);
            let forks = rng.range(0, stars / 4);
            let language = rng.pick(LANGUAGES);
            let description = rng.pick(DESCRIPTIONS);
            RepoSummary {
                name,
                description: (!description.is_empty()).then(|| description.to_string()),
                stars,
                forks,
                language: Some(language.to_string()),
            }
        })
        .collect();

    let year = 2008 + rng.range(0, 15) as i32;
    let month = rng.range(1, 12) as u32;
    let created_at = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single();

    ProfileMetrics {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://github.com/{login}.png"),
        public_repos,
        followers,
        commits,
        prs,
        issues,
        repos,
        company: None,
        bio: Some("Simulated profile".to_string()),
        created_at,
    }
}

/// Offline source backed by `simulated_metrics`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSource;

impl MetricsSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn fetch(&self, login: &str) -> FetchResult<ProfileMetrics> {
        Ok(simulated_metrics(login))
    }
}
