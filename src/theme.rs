//! Theme state machine and the two color palettes.
//! The active palette is the TUI analog of the document-root theme attribute.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// The two presentation themes. Persisted in the config file as
/// `"light"` / `"dark"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Flip the theme unconditionally. Toggling twice is the identity.
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::light(),
            ThemeMode::Dark => Palette::dark(),
        }
    }
}

/// Role colors for the UI
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,      // Active borders, highlights
    pub danger: Color,      // Errors
    pub success: Color,     // Copy confirmation
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints, placeholders
    pub quote: Color,       // Quotation text
    pub bg: Color,          // Background
    pub bg_selected: Color, // Selection background
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Title text
}

impl Palette {
    /// Purple-on-white palette matching the original light page
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(126, 34, 206),
            danger: Color::Rgb(185, 28, 28),
            success: Color::Rgb(21, 128, 61),
            text: Color::Rgb(31, 41, 55),
            text_dim: Color::Rgb(107, 114, 128),
            quote: Color::Rgb(109, 40, 217),
            bg: Color::Rgb(245, 243, 255),
            bg_selected: Color::Rgb(221, 214, 254),
            inactive: Color::Rgb(196, 181, 253),
            header: Color::Rgb(91, 33, 182),
        }
    }

    /// Gray-and-violet palette matching the original dark page
    pub fn dark() -> Self {
        Self {
            accent: Color::Rgb(196, 181, 253),
            danger: Color::Rgb(248, 113, 113),
            success: Color::Rgb(134, 239, 172),
            text: Color::Rgb(229, 231, 235),
            text_dim: Color::Rgb(156, 163, 175),
            quote: Color::Rgb(216, 180, 254),
            bg: Color::Rgb(17, 24, 39),
            bg_selected: Color::Rgb(55, 65, 81),
            inactive: Color::Rgb(75, 85, 99),
            header: Color::Rgb(216, 180, 254),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(ThemeMode::Light.toggle().toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggle().toggle(), ThemeMode::Dark);
    }

    #[test]
    fn toggle_flips_unconditionally() {
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
    }

    #[test]
    fn default_theme_is_light() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn serializes_as_lowercase_names() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let parsed: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ThemeMode::Light);
    }
}
