//! GuildCard - RPG character cards for GitHub profiles
//!
//! Profile metrics go through [`scoring::ScoreEngine`] to produce a
//! [`models::CharacterState`], which [`reporters::render`] turns into an SVG
//! card. Both steps are pure; fetching and file output live at the edges in
//! [`source`] and the CLI.

pub mod cli;
pub mod config;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod source;

pub use models::{CharacterState, ProfileMetrics, Rank, RepoSummary};
pub use reporters::{render, CardSize, RenderOptions, Style, VectorDocument};
pub use scoring::{score, ScoreEngine};
