//! Theme system for consistent UI colors across dark and light modes.
//!
//! Provides a centralized theme that automatically detects the OS theme
//! (dark/light mode) and applies appropriate colors.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color
    pub success: Color,
    /// Error state color for errors and the degraded-background border
    pub error: Color,
    /// Warning state color
    pub warning: Color,
    /// Primary text content color
    pub text: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,
    /// Main background color
    pub background: Color,
    /// Surface color for panels and elevated elements
    pub surface: Color,
    /// Active/pressed element color
    pub active: Color,
    /// Inactive/idle element color
    pub inactive: Color,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Theme for an explicit mode preference.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Dark theme for dark terminal backgrounds.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::LightYellow,
            text: Color::White,
            text_muted: Color::DarkGray,
            background: Color::Black,
            surface: Color::Rgb(24, 24, 32),
            active: Color::LightYellow,
            inactive: Color::Gray,
        }
    }

    /// Light theme for light terminal backgrounds.
    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            text: Color::Black,
            text_muted: Color::Gray,
            background: Color::White,
            surface: Color::Rgb(235, 235, 240),
            active: Color::Magenta,
            inactive: Color::DarkGray,
        }
    }
}
