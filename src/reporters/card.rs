//! SVG character card
//!
//! `render` is a pure function of its three inputs. The only clock value it
//! prints comes from `RenderOptions::generated_at` and lands in a single
//! `<text class="generated-at">` element.

use super::theme::{CardSize, Dimensions, Palette, Style};
use crate::models::{CharacterState, ProfileMetrics, RepoSummary};
use chrono::{DateTime, Utc};
use std::fmt;

/// Descriptions longer than this many characters are cut
pub const DESCRIPTION_LIMIT: usize = 40;

const FONT_FAMILY: &str = "'Segoe UI', Tahoma, sans-serif";
const ATTRIBUTION: &str = "GuildCard";
const DEFAULT_COMPANY: &str = "Independent";
const UNKNOWN_LANGUAGE: &str = "Unknown";
const EMPTY_PROJECTS: &str = "No public projects yet";

// Base layout (medium card, scale 1.0)
const MARGIN: f64 = 24.0;
const AVATAR_SIZE: f64 = 96.0;
const TEXT_X: f64 = 136.0;
const BAR_Y: f64 = 94.0;
const BAR_WIDTH: f64 = 240.0;
const BAR_HEIGHT: f64 = 12.0;
const PROJECTS_Y: f64 = 318.0;
const PROJECT_STRIDE: f64 = 58.0;

/// Presentation choices for one render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub style: Style,
    pub size: CardSize,
    /// Timestamp printed in the footer, together with the account age
    pub generated_at: DateTime<Utc>,
    /// Replaces the profile's company when set
    pub company: Option<String>,
    /// Field of work shown next to the company
    pub area: Option<String>,
}

impl RenderOptions {
    /// Options stamped with the current time
    pub fn new(style: Style, size: CardSize) -> Self {
        Self::with_generated_at(style, size, Utc::now())
    }

    pub fn with_generated_at(style: Style, size: CardSize, generated_at: DateTime<Utc>) -> Self {
        Self {
            style,
            size,
            generated_at,
            company: None,
            area: None,
        }
    }

    /// Company and area overrides; blank values are ignored
    pub fn with_affiliation(mut self, company: Option<String>, area: Option<String>) -> Self {
        self.company = company.filter(|c| !c.trim().is_empty());
        self.area = area.filter(|a| !a.trim().is_empty());
        self
    }
}

/// A complete, standalone SVG document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument(String);

impl VectorDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VectorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<VectorDocument> for String {
    fn from(doc: VectorDocument) -> Self {
        doc.0
    }
}

/// Escape text content (`&`, `<`, `>`)
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value; quotes too
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

/// Cut to `DESCRIPTION_LIMIT` characters plus "..." when longer
pub fn truncate_description(s: &str) -> String {
    if s.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = s.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

/// Emoji tag for a repository language
pub fn language_badge(language: Option<&str>) -> &'static str {
    let Some(lang) = language else {
        return "📦";
    };
    match lang.to_lowercase().as_str() {
        "rust" => "🦀",
        "python" => "🐍",
        "javascript" => "🟨",
        "typescript" => "🔷",
        "go" => "🐹",
        "java" | "kotlin" => "☕",
        "c" | "c++" => "⚙️",
        "c#" => "🎯",
        "ruby" => "💎",
        "php" => "🐘",
        "swift" => "🐦",
        "html" | "css" => "🎨",
        "shell" => "🐚",
        _ => "📄",
    }
}

/// "3 years on GitHub" style text; None when the creation date is unknown
fn account_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
    let created = created_at?;
    let years = now.signed_duration_since(created).num_days().max(0) / 365;
    Some(match years {
        0 => "new on GitHub".to_string(),
        1 => "1 year on GitHub".to_string(),
        n => format!("{n} years on GitHub"),
    })
}

/// Format a coordinate with at most two decimals and no trailing zeros
fn num(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r.fract() == 0.0 {
        format!("{}", r as i64)
    } else {
        let s = format!("{r:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// Scales base coordinates to the chosen card size
struct Canvas<'a> {
    dims: Dimensions,
    palette: Palette,
    out: &'a mut String,
}

impl Canvas<'_> {
    fn s(&self, base: f64) -> String {
        num(base * self.dims.scale)
    }

    /// Base height of the card (before scaling)
    fn base_height(&self) -> f64 {
        self.dims.height as f64 / self.dims.scale
    }

    fn base_width(&self) -> f64 {
        self.dims.width as f64 / self.dims.scale
    }

    fn text(&mut self, x: f64, y: f64, size: f64, extra: &str, content: &str) {
        let line = format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\"{}>{}</text>\n",
            self.s(x),
            self.s(y),
            self.s(size),
            self.palette.text,
            extra,
            content
        );
        self.out.push_str(&line);
    }
}

/// Render the character card
pub fn render(
    state: &CharacterState,
    metrics: &ProfileMetrics,
    options: &RenderOptions,
) -> VectorDocument {
    let dims = options.size.dimensions();
    let palette = options.style.palette();
    let mut out = String::with_capacity(8 * 1024);
    let progress = state.xp_progress.clamp(0.0, 100.0);
    let name = escape_text(metrics.display_name());

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{label}\">\n",
        w = dims.width,
        h = dims.height,
        label = escape_attr(&format!(
            "{} - Level {} {}",
            metrics.display_name(),
            state.level,
            state.class
        )),
    ));

    let mut c = Canvas {
        dims,
        palette,
        out: &mut out,
    };

    // Definitions
    let bar_start = c.s(TEXT_X);
    let bar_end = c.s(TEXT_X + BAR_WIDTH);
    let avatar_center = MARGIN + AVATAR_SIZE / 2.0;
    let defs = format!(
        "  <defs>\n\
         \x20   <linearGradient id=\"card-bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\n\
         \x20     <stop offset=\"0%\" stop-color=\"{bg}\"/>\n\
         \x20     <stop offset=\"100%\" stop-color=\"{sec}\"/>\n\
         \x20   </linearGradient>\n\
         \x20   <linearGradient id=\"xp-bar\" gradientUnits=\"userSpaceOnUse\" x1=\"{bar_start}\" y1=\"0\" x2=\"{bar_end}\" y2=\"0\">\n\
         \x20     <stop offset=\"0%\" stop-color=\"{pri}\"/>\n\
         \x20     <stop offset=\"{p:.1}%\" stop-color=\"{acc}\"/>\n\
         \x20     <stop offset=\"{p:.1}%\" stop-color=\"{sec}\"/>\n\
         \x20     <stop offset=\"100%\" stop-color=\"{sec}\"/>\n\
         \x20   </linearGradient>\n\
         \x20   <clipPath id=\"avatar-clip\"><circle cx=\"{cx}\" cy=\"{cx}\" r=\"{r}\"/></clipPath>\n\
         \x20   <style>text {{ font-family: {FONT_FAMILY}; }}</style>\n\
         \x20 </defs>\n",
        bg = palette.background,
        sec = palette.secondary,
        pri = palette.primary,
        acc = palette.accent,
        p = progress,
        cx = c.s(avatar_center),
        r = c.s(AVATAR_SIZE / 2.0),
    );
    c.out.push_str(&defs);

    // Card background
    let frame = format!(
        "  <rect x=\"2\" y=\"2\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"url(#card-bg)\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        dims.width.saturating_sub(4),
        dims.height.saturating_sub(4),
        c.s(18.0),
        palette.accent,
        c.s(4.0),
    );
    c.out.push_str(&frame);

    // Avatar over a placeholder disc
    let avatar = format!(
        "  <circle class=\"avatar-bg\" cx=\"{cx}\" cy=\"{cx}\" r=\"{r}\" fill=\"{}\"/>\n  <image href=\"{}\" x=\"{m}\" y=\"{m}\" width=\"{d}\" height=\"{d}\" preserveAspectRatio=\"xMidYMid slice\" clip-path=\"url(#avatar-clip)\"/>\n",
        palette.secondary,
        escape_attr(metrics.avatar_url.trim()),
        cx = c.s(avatar_center),
        r = c.s(AVATAR_SIZE / 2.0),
        m = c.s(MARGIN),
        d = c.s(AVATAR_SIZE),
    );
    c.out.push_str(&avatar);
    let ring = format!(
        "  <circle cx=\"{cx}\" cy=\"{cx}\" r=\"{r}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        palette.primary,
        c.s(3.0),
        cx = c.s(avatar_center),
        r = c.s(AVATAR_SIZE / 2.0),
    );
    c.out.push_str(&ring);

    // Identity
    c.text(TEXT_X, 58.0, 20.0, " font-weight=\"700\" class=\"name\"", &name);
    c.text(TEXT_X, 80.0, 12.0, "", &format!("Level {}", state.level));

    // Progress bar: full track plus the filled segment
    let track = format!(
        "  <rect class=\"xp-track\" x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"{rx}\" fill=\"url(#xp-bar)\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        palette.primary,
        x = c.s(TEXT_X),
        y = c.s(BAR_Y),
        w = c.s(BAR_WIDTH),
        h = c.s(BAR_HEIGHT),
        rx = c.s(BAR_HEIGHT / 2.0),
    );
    c.out.push_str(&track);
    let fill = format!(
        "  <rect class=\"xp-fill\" x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"{rx}\" fill=\"url(#xp-bar)\"/>\n",
        x = c.s(TEXT_X),
        y = c.s(BAR_Y),
        w = c.s(BAR_WIDTH * progress / 100.0),
        h = c.s(BAR_HEIGHT),
        rx = c.s(BAR_HEIGHT / 2.0),
    );
    c.out.push_str(&fill);
    let next = format!(
        "{:.1}% to level {}",
        progress,
        state.level.saturating_add(1)
    );
    c.text(TEXT_X, 122.0, 11.0, " opacity=\"0.85\"", &next);

    // Stats
    c.text(
        MARGIN,
        146.0,
        13.0,
        " font-weight=\"700\"",
        &format!("✨ {} XP", state.total_xp),
    );
    c.text(
        MARGIN,
        168.0,
        14.0,
        " font-weight=\"700\" class=\"class\"",
        &format!("⚔️ Class: {}", escape_text(&state.class)),
    );
    c.text(
        MARGIN,
        188.0,
        14.0,
        " class=\"rank\"",
        &format!("🏅 Rank: {}", state.rank),
    );
    c.text(
        MARGIN,
        210.0,
        12.0,
        " class=\"affiliation\"",
        &affiliation_line(metrics, options),
    );
    c.text(
        MARGIN,
        228.0,
        12.0,
        " class=\"language\"",
        &format!(
            "💻 Main language: {}",
            escape_text(state.primary_language.as_deref().unwrap_or(UNKNOWN_LANGUAGE))
        ),
    );
    c.text(
        MARGIN,
        250.0,
        12.0,
        "",
        &format!(
            "📚 Repos: {} • ⭐ Stars: {} • 🍴 Forks: {} • 👥 Followers: {}",
            metrics.public_repos,
            metrics.total_stars(),
            metrics.total_forks(),
            metrics.followers
        ),
    );
    c.text(
        MARGIN,
        268.0,
        12.0,
        "",
        &format!(
            "🔨 Commits: {} • 🔀 PRs: {} • 🐛 Issues: {}",
            metrics.commits, metrics.prs, metrics.issues
        ),
    );

    // Projects
    c.text(MARGIN, 296.0, 14.0, " font-weight=\"700\"", "🏆 Top Projects");
    if state.top_projects.is_empty() {
        c.text(
            MARGIN,
            PROJECTS_Y,
            11.0,
            " font-style=\"italic\" opacity=\"0.8\"",
            EMPTY_PROJECTS,
        );
    }
    for (i, repo) in state.top_projects.iter().enumerate() {
        project_block(&mut c, repo, PROJECTS_Y + i as f64 * PROJECT_STRIDE);
    }

    // Footer
    let footer_y = c.base_height() - 18.0;
    let mut stamp = format!(
        "Generated {}",
        options.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(age) = account_age(metrics.created_at, options.generated_at) {
        stamp.push_str(" • ");
        stamp.push_str(&age);
    }
    c.text(
        MARGIN,
        footer_y,
        10.0,
        " class=\"generated-at\" opacity=\"0.7\"",
        &stamp,
    );
    let right = c.base_width() - MARGIN;
    c.text(
        right,
        footer_y,
        10.0,
        " text-anchor=\"end\" opacity=\"0.7\"",
        ATTRIBUTION,
    );

    out.push_str("</svg>\n");
    VectorDocument(out)
}

/// "🏢 company • 🧭 area"; overrides win over the profile's company
fn affiliation_line(metrics: &ProfileMetrics, options: &RenderOptions) -> String {
    let company = options
        .company
        .as_deref()
        .or(metrics.company.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COMPANY);
    match options.area.as_deref() {
        Some(area) => format!("🏢 {} • 🧭 {}", escape_text(company), escape_text(area)),
        None => format!("🏢 {}", escape_text(company)),
    }
}

fn project_block(c: &mut Canvas<'_>, repo: &RepoSummary, y: f64) {
    c.text(
        MARGIN,
        y,
        13.0,
        " font-weight=\"700\" class=\"project\"",
        &format!("• {}", escape_text(&repo.name)),
    );
    let language = repo.language.as_deref();
    let meta = format!(
        "{} {} • ⭐ {} • 🍴 {}",
        language_badge(language),
        escape_text(language.unwrap_or(UNKNOWN_LANGUAGE)),
        repo.stars,
        repo.forks
    );
    c.text(MARGIN + 12.0, y + 16.0, 11.0, "", &meta);
    let description = repo.description.as_deref().unwrap_or("");
    c.text(
        MARGIN + 12.0,
        y + 31.0,
        10.0,
        " opacity=\"0.85\"",
        &escape_text(&truncate_description(description)),
    );
}
