//! Metrics sources
//!
//! A source turns a login into normalized `ProfileMetrics`. The live source
//! talks to the GitHub REST API; the simulated source derives stable fake
//! numbers from the login so cards can be produced offline.

mod github;
mod simulated;

pub use github::{is_valid_login, normalize, ApiEvent, ApiRepo, ApiUser, GitHubClient};
pub use simulated::{login_seed, simulated_metrics, SeededLcg, SimulatedSource};

use crate::models::ProfileMetrics;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while fetching profile metrics
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("GitHub user '{0}' not found")]
    NotFound(String),

    #[error("'{0}' is not a valid GitHub login")]
    InvalidLogin(String),

    #[error("GitHub API error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Anything that can produce metrics for a login
pub trait MetricsSource: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    fn fetch(&self, login: &str) -> FetchResult<ProfileMetrics>;
}

/// Tries `primary`, and on any error falls back to simulated metrics
pub struct FallbackSource<P> {
    primary: P,
    fallback: SimulatedSource,
}

impl<P: MetricsSource> FallbackSource<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: SimulatedSource,
        }
    }
}

impl<P: MetricsSource> MetricsSource for FallbackSource<P> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn fetch(&self, login: &str) -> FetchResult<ProfileMetrics> {
        match self.primary.fetch(login) {
            Ok(metrics) => Ok(metrics),
            Err(e) => {
                warn!(
                    "{} source failed for {}: {}. Using simulated metrics",
                    self.primary.name(),
                    login,
                    e
                );
                self.fallback.fetch(login)
            }
        }
    }
}
