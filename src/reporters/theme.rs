//! Card themes and sizes
//!
//! Both are closed enums with a total lookup. Unknown names fall back to
//! `medieval` / `medium` without an error: they only affect presentation.

use std::fmt;

/// Colors used by one card style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
}

/// Visual style of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Medieval,
    Cyberpunk,
    Fantasy,
    Dark,
    Nature,
    Ocean,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Medieval,
        Style::Cyberpunk,
        Style::Fantasy,
        Style::Dark,
        Style::Nature,
        Style::Ocean,
    ];

    /// Case-insensitive lookup; anything unrecognized is `Medieval`
    pub fn parse(name: &str) -> Style {
        match name.trim().to_lowercase().as_str() {
            "cyberpunk" => Style::Cyberpunk,
            "fantasy" => Style::Fantasy,
            "dark" => Style::Dark,
            "nature" => Style::Nature,
            "ocean" => Style::Ocean,
            _ => Style::Medieval,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Medieval => "medieval",
            Style::Cyberpunk => "cyberpunk",
            Style::Fantasy => "fantasy",
            Style::Dark => "dark",
            Style::Nature => "nature",
            Style::Ocean => "ocean",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Style::Medieval => Palette {
                background: "#F4EBD3",
                primary: "#8B4513",
                secondary: "#D8BFA7",
                accent: "#B8860B",
                text: "#4B2E2E",
            },
            Style::Cyberpunk => Palette {
                background: "#0F0C1A",
                primary: "#00FFEA",
                secondary: "#2B003A",
                accent: "#FF00C8",
                text: "#E0E0FF",
            },
            Style::Fantasy => Palette {
                background: "#F9F7FF",
                primary: "#7C4DFF",
                secondary: "#E1D7FF",
                accent: "#FFB300",
                text: "#3A1F6B",
            },
            Style::Dark => Palette {
                background: "#0F0F12",
                primary: "#FF6B6B",
                secondary: "#2A2A33",
                accent: "#FFD166",
                text: "#DCDCDC",
            },
            Style::Nature => Palette {
                background: "#F4FCF2",
                primary: "#2E8B57",
                secondary: "#D8EFE0",
                accent: "#8BC34A",
                text: "#174C31",
            },
            Style::Ocean => Palette {
                background: "#E8F6FF",
                primary: "#0077B6",
                secondary: "#CFEEFF",
                accent: "#00B4D8",
                text: "#083D77",
            },
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canvas size and the factor applied to every base coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

/// Card size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CardSize {
    pub const ALL: [CardSize; 3] = [CardSize::Small, CardSize::Medium, CardSize::Large];

    /// Case-insensitive lookup; anything unrecognized is `Medium`
    pub fn parse(name: &str) -> CardSize {
        match name.trim().to_lowercase().as_str() {
            "small" => CardSize::Small,
            "large" => CardSize::Large,
            _ => CardSize::Medium,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardSize::Small => "small",
            CardSize::Medium => "medium",
            CardSize::Large => "large",
        }
    }

    /// Medium is the 400×560 base layout; the others scale it
    pub fn dimensions(&self) -> Dimensions {
        match self {
            CardSize::Small => Dimensions {
                width: 300,
                height: 420,
                scale: 0.75,
            },
            CardSize::Medium => Dimensions {
                width: 400,
                height: 560,
                scale: 1.0,
            },
            CardSize::Large => Dimensions {
                width: 500,
                height: 700,
                scale: 1.25,
            },
        }
    }
}

impl fmt::Display for CardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse_roundtrips_names() {
        for style in Style::ALL {
            assert_eq!(Style::parse(style.name()), style);
        }
        assert_eq!(Style::parse("  OCEAN "), Style::Ocean);
    }

    #[test]
    fn test_unknown_style_falls_back_to_medieval() {
        assert_eq!(Style::parse("vaporwave"), Style::Medieval);
        assert_eq!(Style::parse(""), Style::Medieval);
        assert_eq!(Style::parse("vaporwave").palette(), Style::Medieval.palette());
    }

    #[test]
    fn test_unknown_size_falls_back_to_medium() {
        assert_eq!(CardSize::parse("huge"), CardSize::Medium);
        assert_eq!(CardSize::parse("Large"), CardSize::Large);
        assert_eq!(CardSize::parse("small"), CardSize::Small);
    }

    #[test]
    fn test_dimensions_match_scale() {
        let base = CardSize::Medium.dimensions();
        for size in CardSize::ALL {
            let d = size.dimensions();
            assert_eq!(d.width as f64, base.width as f64 * d.scale);
            assert_eq!(d.height as f64, base.height as f64 * d.scale);
        }
    }

    #[test]
    fn test_palettes_are_distinct() {
        for (i, a) in Style::ALL.iter().enumerate() {
            for b in &Style::ALL[i + 1..] {
                assert_ne!(a.palette(), b.palette(), "{a} and {b} share a palette");
            }
        }
    }
}
