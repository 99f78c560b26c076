//! Character Scoring System
//!
//! This module turns profile activity into an RPG character: experience,
//! level, rank, and class. Everything here is a pure function of the input
//! metrics.
//!
//! # Scoring Formula
//!
//! ```text
//! XP = repos × 60 + followers × 40 + Σstars × 8 + Σforks × 4
//!    + commits × 2 + PRs × 10 + issues × 5          (floor, never negative)
//! ```
//!
//! Weights come from `[scoring.weights]` in `guildcard.toml`; the numbers
//! above are the defaults.
//!
//! # Level Curve
//!
//! | XP range          | XP per level | Levels |
//! |-------------------|--------------|--------|
//! | 0 – 4 999         | 500          | 1–10   |
//! | 5 000 – 19 999    | 1 000        | 11–25  |
//! | 20 000 – 59 999   | 2 000        | 26–45  |
//! | 60 000 – 159 999  | 5 000        | 46–65  |
//! | 160 000+          | 10 000       | 66+    |
//!
//! # Ranks
//!
//! F < 500 ≤ E < 1 500 ≤ D < 4 000 ≤ C < 8 000 ≤ B < 15 000 ≤ A < 30 000
//! ≤ S < 60 000 ≤ SS
//!
//! # Classes
//!
//! One class per 50 000 XP: Adventurer, Hunter, Knight, Mage, Duke,
//! Archduke, King, Scientist, Sorcerer, Destroyer, and Divine from 500 000 up.

mod engine;
mod tiers;

pub use engine::{score, ScoreEngine, XpBreakdown, XpContribution, TOP_PROJECT_COUNT};
pub use tiers::{
    is_gap_free, is_widening, Band, LevelBand, LevelCurve, LevelPosition, TierTable, CLASS_TABLE,
    LEVEL_CURVE, RANK_TABLE,
};
