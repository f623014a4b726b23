//! Theme configuration for the overlay.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use uxlatency_types::Tier;

/// Color and style theme for the overlay.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for green-tier latencies.
    pub green: Color,
    /// Color for orange-tier latencies.
    pub orange: Color,
    /// Color for red-tier latencies.
    pub red: Color,
    /// Color for interactions without a latency.
    pub neutral: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            green: Color::Green,
            orange: Color::Indexed(208),
            red: Color::Red,
            neutral: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            green: Color::Green,
            orange: Color::Indexed(166),
            red: Color::Red,
            neutral: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Color for a tier.
    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Green => self.green,
            Tier::Orange => self.orange,
            Tier::Red => self.red,
            Tier::Neutral => self.neutral,
        }
    }

    /// Get style for a tier
    pub fn tier_style(&self, tier: Tier) -> Style {
        let style = Style::default().fg(self.tier_color(tier));
        match tier {
            Tier::Red => style.add_modifier(Modifier::BOLD),
            Tier::Neutral => style.add_modifier(Modifier::DIM),
            Tier::Green | Tier::Orange => style,
        }
    }
}
