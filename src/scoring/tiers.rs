//! Band tables for ranks, classes, and levels
//!
//! Every table is a list of half-open `[lower, upper)` intervals starting at
//! zero with no gaps, and the last band is open-ended. The tables are built
//! in `const` context, so a table that breaks this fails to compile.

use crate::models::Rank;

/// One half-open interval of the XP axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<T> {
    /// Inclusive lower bound
    pub lower: u64,
    /// Exclusive upper bound, `None` for the final open band
    pub upper: Option<u64>,
    pub label: T,
}

impl<T> Band<T> {
    pub const fn new(lower: u64, upper: u64, label: T) -> Self {
        Self {
            lower,
            upper: Some(upper),
            label,
        }
    }

    pub const fn open(lower: u64, label: T) -> Self {
        Self {
            lower,
            upper: None,
            label,
        }
    }

    pub fn contains(&self, xp: u64) -> bool {
        xp >= self.lower && self.upper.map_or(true, |upper| xp < upper)
    }
}

/// True when the bands start at 0, touch end-to-start, are non-empty, and
/// only the last one is open.
pub const fn is_gap_free<T>(bands: &[Band<T>]) -> bool {
    if bands.is_empty() || bands[0].lower != 0 {
        return false;
    }
    let last = bands.len() - 1;
    let mut i = 0;
    while i < bands.len() {
        match bands[i].upper {
            Some(upper) => {
                if i == last || upper <= bands[i].lower || bands[i + 1].lower != upper {
                    return false;
                }
            }
            None => {
                if i != last {
                    return false;
                }
            }
        }
        i += 1;
    }
    true
}

/// An ordered, gap-free classification table
#[derive(Debug, Clone, Copy)]
pub struct TierTable<T: 'static> {
    bands: &'static [Band<T>],
}

impl<T: Copy + 'static> TierTable<T> {
    /// Panics (at compile time when used in a `const`) on a table with gaps
    pub const fn new(bands: &'static [Band<T>]) -> Self {
        assert!(is_gap_free(bands), "tier table must cover [0, inf) without gaps");
        Self { bands }
    }

    /// Band containing `xp`; the open final band catches everything above
    pub fn band_for(&self, xp: u64) -> &Band<T> {
        self.bands
            .iter()
            .find(|b| b.contains(xp))
            .unwrap_or(&self.bands[self.bands.len() - 1])
    }

    pub fn classify(&self, xp: u64) -> T {
        self.band_for(xp).label
    }

    pub fn bands(&self) -> &'static [Band<T>] {
        self.bands
    }
}

const RANK_BANDS: &[Band<Rank>] = &[
    Band::new(0, 500, Rank::F),
    Band::new(500, 1_500, Rank::E),
    Band::new(1_500, 4_000, Rank::D),
    Band::new(4_000, 8_000, Rank::C),
    Band::new(8_000, 15_000, Rank::B),
    Band::new(15_000, 30_000, Rank::A),
    Band::new(30_000, 60_000, Rank::S),
    Band::open(60_000, Rank::SS),
];

pub const RANK_TABLE: TierTable<Rank> = TierTable::new(RANK_BANDS);

const CLASS_BANDS: &[Band<&str>] = &[
    Band::new(0, 50_000, "Adventurer"),
    Band::new(50_000, 100_000, "Hunter"),
    Band::new(100_000, 150_000, "Knight"),
    Band::new(150_000, 200_000, "Mage"),
    Band::new(200_000, 250_000, "Duke"),
    Band::new(250_000, 300_000, "Archduke"),
    Band::new(300_000, 350_000, "King"),
    Band::new(350_000, 400_000, "Scientist"),
    Band::new(400_000, 450_000, "Sorcerer"),
    Band::new(450_000, 500_000, "Destroyer"),
    Band::open(500_000, "Divine"),
];

pub const CLASS_TABLE: TierTable<&'static str> = TierTable::new(CLASS_BANDS);

/// A run of levels sharing the same XP cost per level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    pub start: u64,
    pub xp_per_level: u64,
    /// Levels in this band, `None` for the final open band
    pub levels: Option<u64>,
}

impl LevelBand {
    const fn end(&self) -> Option<u64> {
        match self.levels {
            Some(n) => Some(self.start + self.xp_per_level * n),
            None => None,
        }
    }
}

/// True when the bands start at 0, are contiguous, never narrow, and only
/// the last one is open.
pub const fn is_widening(bands: &[LevelBand]) -> bool {
    if bands.is_empty() || bands[0].start != 0 {
        return false;
    }
    let last = bands.len() - 1;
    let mut i = 0;
    while i < bands.len() {
        let band = bands[i];
        if band.xp_per_level == 0 {
            return false;
        }
        match band.end() {
            Some(end) => {
                if i == last || end <= band.start {
                    return false;
                }
                let next = bands[i + 1];
                if next.start != end || next.xp_per_level < band.xp_per_level {
                    return false;
                }
            }
            None => {
                if i != last {
                    return false;
                }
            }
        }
        i += 1;
    }
    true
}

/// Resolved position on the level curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelPosition {
    pub level: u32,
    /// Percent through the current level, one decimal, in [0, 100)
    pub progress: f64,
    /// XP cost of the current level
    pub xp_per_level: u64,
}

/// Piecewise leveling curve built from widening bands
#[derive(Debug, Clone, Copy)]
pub struct LevelCurve {
    bands: &'static [LevelBand],
}

impl LevelCurve {
    pub const fn new(bands: &'static [LevelBand]) -> Self {
        assert!(is_widening(bands), "level bands must be contiguous and widening");
        Self { bands }
    }

    pub fn position(&self, xp: u64) -> LevelPosition {
        let mut base_level: u64 = 1;
        for band in self.bands {
            match band.end() {
                Some(end) if xp >= end => {
                    base_level += band.levels.unwrap_or(0);
                }
                _ => return Self::within(band, base_level, xp),
            }
        }
        // Unreachable for a widening table: the last band is open
        let last = &self.bands[self.bands.len() - 1];
        Self::within(last, base_level, xp)
    }

    fn within(band: &LevelBand, base_level: u64, xp: u64) -> LevelPosition {
        let width = band.xp_per_level.max(1);
        let offset = xp.saturating_sub(band.start);
        let level = base_level.saturating_add(offset / width);
        let remainder = offset % width;
        // Round half up to tenths of a percent, never reaching 100.0
        let tenths = ((remainder as u128 * 2000 + width as u128) / (2 * width as u128)).min(999);
        LevelPosition {
            level: u32::try_from(level).unwrap_or(u32::MAX),
            progress: tenths as f64 / 10.0,
            xp_per_level: width,
        }
    }

    pub fn bands(&self) -> &'static [LevelBand] {
        self.bands
    }
}

const LEVEL_BANDS: &[LevelBand] = &[
    LevelBand { start: 0, xp_per_level: 500, levels: Some(10) },
    LevelBand { start: 5_000, xp_per_level: 1_000, levels: Some(15) },
    LevelBand { start: 20_000, xp_per_level: 2_000, levels: Some(20) },
    LevelBand { start: 60_000, xp_per_level: 5_000, levels: Some(20) },
    LevelBand { start: 160_000, xp_per_level: 10_000, levels: None },
];

pub const LEVEL_CURVE: LevelCurve = LevelCurve::new(LEVEL_BANDS);

#[cfg(test)]
mod tests {
    use super::*;

    /// Every lower bound, and the values either side of it
    fn edges<T>(bands: &[Band<T>]) -> Vec<u64> {
        bands
            .iter()
            .flat_map(|b| [b.lower.saturating_sub(1), b.lower, b.lower + 1])
            .chain([u64::MAX])
            .collect()
    }

    #[test]
    fn test_builtin_tables_are_gap_free() {
        assert!(is_gap_free(RANK_TABLE.bands()));
        assert!(is_gap_free(CLASS_TABLE.bands()));
        assert!(is_widening(LEVEL_CURVE.bands()));
    }

    #[test]
    fn test_every_edge_maps_to_exactly_one_rank() {
        for xp in edges(RANK_TABLE.bands()) {
            let hits = RANK_TABLE.bands().iter().filter(|b| b.contains(xp)).count();
            assert_eq!(hits, 1, "xp={xp} matched {hits} rank bands");
        }
    }

    #[test]
    fn test_every_edge_maps_to_exactly_one_class() {
        for xp in edges(CLASS_TABLE.bands()) {
            let hits = CLASS_TABLE.bands().iter().filter(|b| b.contains(xp)).count();
            assert_eq!(hits, 1, "xp={xp} matched {hits} class bands");
        }
    }

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(RANK_TABLE.classify(0), Rank::F);
        assert_eq!(RANK_TABLE.classify(499), Rank::F);
        assert_eq!(RANK_TABLE.classify(500), Rank::E);
        assert_eq!(RANK_TABLE.classify(14_999), Rank::B);
        assert_eq!(RANK_TABLE.classify(15_000), Rank::A);
        assert_eq!(RANK_TABLE.classify(59_999), Rank::S);
        assert_eq!(RANK_TABLE.classify(60_000), Rank::SS);
        assert_eq!(RANK_TABLE.classify(u64::MAX), Rank::SS);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(CLASS_TABLE.classify(0), "Adventurer");
        assert_eq!(CLASS_TABLE.classify(49_999), "Adventurer");
        assert_eq!(CLASS_TABLE.classify(50_000), "Hunter");
        assert_eq!(CLASS_TABLE.classify(499_999), "Destroyer");
        assert_eq!(CLASS_TABLE.classify(500_000), "Divine");
        assert_eq!(CLASS_TABLE.classify(u64::MAX), "Divine");
    }

    #[test]
    fn test_rank_is_monotonic_across_table() {
        let mut previous = Rank::F;
        for xp in edges(RANK_TABLE.bands()) {
            let rank = RANK_TABLE.classify(xp);
            assert!(rank >= previous, "rank dropped at xp={xp}");
            previous = rank;
        }
    }

    #[test]
    fn test_gap_detection() {
        const GAP: &[Band<u8>] = &[Band::new(0, 10, 0), Band::open(11, 1)];
        const OVERLAP: &[Band<u8>] = &[Band::new(0, 10, 0), Band::open(9, 1)];
        const NOT_ZERO: &[Band<u8>] = &[Band::new(1, 10, 0), Band::open(10, 1)];
        const CLOSED_END: &[Band<u8>] = &[Band::new(0, 10, 0), Band::new(10, 20, 1)];
        const OPEN_MIDDLE: &[Band<u8>] = &[Band::open(0, 0), Band::open(10, 1)];
        const EMPTY: &[Band<u8>] = &[];
        assert!(!is_gap_free(GAP));
        assert!(!is_gap_free(OVERLAP));
        assert!(!is_gap_free(NOT_ZERO));
        assert!(!is_gap_free(CLOSED_END));
        assert!(!is_gap_free(OPEN_MIDDLE));
        assert!(!is_gap_free(EMPTY));
    }

    #[test]
    fn test_widening_detection() {
        const NARROWING: &[LevelBand] = &[
            LevelBand { start: 0, xp_per_level: 100, levels: Some(2) },
            LevelBand { start: 200, xp_per_level: 50, levels: None },
        ];
        const ZERO_WIDTH: &[LevelBand] = &[LevelBand { start: 0, xp_per_level: 0, levels: None }];
        const DISJOINT: &[LevelBand] = &[
            LevelBand { start: 0, xp_per_level: 100, levels: Some(2) },
            LevelBand { start: 300, xp_per_level: 100, levels: None },
        ];
        assert!(!is_widening(NARROWING));
        assert!(!is_widening(ZERO_WIDTH));
        assert!(!is_widening(DISJOINT));
    }

    #[test]
    fn test_level_zero_xp() {
        let pos = LEVEL_CURVE.position(0);
        assert_eq!(pos.level, 1);
        assert_eq!(pos.progress, 0.0);
    }

    #[test]
    fn test_level_band_edges() {
        assert_eq!(LEVEL_CURVE.position(499).level, 1);
        assert_eq!(LEVEL_CURVE.position(500).level, 2);
        assert_eq!(LEVEL_CURVE.position(4_999).level, 10);
        assert_eq!(LEVEL_CURVE.position(5_000).level, 11);
        assert_eq!(LEVEL_CURVE.position(19_999).level, 25);
        assert_eq!(LEVEL_CURVE.position(20_000).level, 26);
        assert_eq!(LEVEL_CURVE.position(60_000).level, 46);
        assert_eq!(LEVEL_CURVE.position(160_000).level, 66);
        assert_eq!(LEVEL_CURVE.position(170_000).level, 67);
    }

    #[test]
    fn test_level_width_grows() {
        assert_eq!(LEVEL_CURVE.position(100).xp_per_level, 500);
        assert_eq!(LEVEL_CURVE.position(5_000).xp_per_level, 1_000);
        assert_eq!(LEVEL_CURVE.position(200_000).xp_per_level, 10_000);
    }

    #[test]
    fn test_progress_rounding() {
        // 250 / 500 = 50%
        assert_eq!(LEVEL_CURVE.position(250).progress, 50.0);
        // 1 / 500 = 0.2%
        assert_eq!(LEVEL_CURVE.position(1).progress, 0.2);
        // 5_001: 1 / 1000 = 0.1%
        assert_eq!(LEVEL_CURVE.position(5_001).progress, 0.1);
        // 160_005: 5 / 10000 = 0.05% rounds half up to 0.1
        assert_eq!(LEVEL_CURVE.position(160_005).progress, 0.1);
        // 160_004: 0.04% rounds down
        assert_eq!(LEVEL_CURVE.position(160_004).progress, 0.0);
        // 169_999: 99.99% must stay below 100
        assert_eq!(LEVEL_CURVE.position(169_999).progress, 99.9);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut previous = 0;
        for xp in (0..400_000u64).step_by(250) {
            let level = LEVEL_CURVE.position(xp).level;
            assert!(level >= previous, "level dropped at xp={xp}");
            previous = level;
        }
    }

    #[test]
    fn test_huge_xp_saturates() {
        let pos = LEVEL_CURVE.position(u64::MAX);
        assert!(pos.level > 66);
        assert!(pos.progress < 100.0);
    }
}
