//! User settings record and theme resolution.
//!
//! # Responsibility
//! - Define every persisted option with its compiled-in default.
//! - Resolve the active theme palette and the Zen-mode snapshot.
//!
//! # Invariants
//! - `Settings::default()` is the exact result of loading with no file.
//! - Color fields hold `#rgb` or `#rrggbb` codes.

use serde::{Deserialize, Serialize};

/// Setting keys whose values must be hex color codes.
pub const COLOR_KEYS: &[&str] = &[
    "accent_color",
    "light_background_color",
    "light_text_color",
    "dark_background_color",
    "dark_text_color",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Screen edge hosting the trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPosition {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Flat application settings, persisted as one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language code matching a file in the language directory.
    pub language: String,
    pub theme: Theme,
    pub accent_color: String,
    pub light_background_color: String,
    pub light_text_color: String,
    pub dark_background_color: String,
    pub dark_text_color: String,
    pub trigger_pos: TriggerPosition,
    pub zen_font_family: String,
    pub zen_font_size: u32,
    pub zen_padding_horiz: u32,
    pub zen_padding_vert: u32,
    pub zen_alignment: TextAlignment,
    /// Background image path; empty means none.
    pub zen_bg_path: String,
    pub zen_editor_transparent: bool,
    pub zen_theme: Theme,
    /// Tasks/notes splitter sizes, top then bottom.
    pub splitter_sizes: [u32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            theme: Theme::Light,
            accent_color: "#007bff".to_string(),
            light_background_color: "#f8f9fa".to_string(),
            light_text_color: "#212529".to_string(),
            dark_background_color: "#2b2b2b".to_string(),
            dark_text_color: "#bbbbbb".to_string(),
            trigger_pos: TriggerPosition::Right,
            zen_font_family: "Calibri".to_string(),
            zen_font_size: 17,
            zen_padding_horiz: 15,
            zen_padding_vert: 10,
            zen_alignment: TextAlignment::Left,
            zen_bg_path: String::new(),
            zen_editor_transparent: true,
            zen_theme: Theme::Light,
            splitter_sizes: [300, 300],
        }
    }
}

/// Colors the host applies for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePalette {
    pub accent: String,
    pub background: String,
    pub text: String,
}

/// Settings snapshot handed to a Zen session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenSettings {
    pub font_family: String,
    pub font_size: u32,
    pub padding_horiz: u32,
    pub padding_vert: u32,
    pub alignment: TextAlignment,
    pub bg_path: String,
    pub editor_transparent: bool,
    pub theme: Theme,
    pub accent_color: String,
}

impl Settings {
    /// Palette for the main panel theme.
    pub fn palette(&self) -> ThemePalette {
        self.palette_for(self.theme)
    }

    /// Palette for an explicit theme, sharing the accent color.
    pub fn palette_for(&self, theme: Theme) -> ThemePalette {
        let (background, text) = match theme {
            Theme::Light => (&self.light_background_color, &self.light_text_color),
            Theme::Dark => (&self.dark_background_color, &self.dark_text_color),
        };
        ThemePalette {
            accent: self.accent_color.clone(),
            background: background.clone(),
            text: text.clone(),
        }
    }

    pub fn zen(&self) -> ZenSettings {
        ZenSettings {
            font_family: self.zen_font_family.clone(),
            font_size: self.zen_font_size,
            padding_horiz: self.zen_padding_horiz,
            padding_vert: self.zen_padding_vert,
            alignment: self.zen_alignment,
            bg_path: self.zen_bg_path.clone(),
            editor_transparent: self.zen_editor_transparent,
            theme: self.zen_theme,
            accent_color: self.accent_color.clone(),
        }
    }

    /// Writes Zen-mode choices back into the flat settings.
    pub fn apply_zen(&mut self, zen: &ZenSettings) {
        self.zen_font_family = zen.font_family.clone();
        self.zen_font_size = zen.font_size;
        self.zen_padding_horiz = zen.padding_horiz;
        self.zen_padding_vert = zen.padding_vert;
        self.zen_alignment = zen.alignment;
        self.zen_bg_path = zen.bg_path.clone();
        self.zen_editor_transparent = zen.editor_transparent;
        self.zen_theme = zen.theme;
        if is_hex_color(&zen.accent_color) {
            self.accent_color = zen.accent_color.clone();
        }
    }
}

/// Accepts `#rgb` and `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::{is_hex_color, Settings, Theme};

    #[test]
    fn hex_color_accepts_short_and_long_forms() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#007BFF"));
        assert!(!is_hex_color("007bff"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn palette_follows_active_theme() {
        let mut settings = Settings::default();
        assert_eq!(settings.palette().background, "#f8f9fa");
        settings.theme = Theme::Dark;
        assert_eq!(settings.palette().background, "#2b2b2b");
        assert_eq!(settings.palette().accent, "#007bff");
    }

    #[test]
    fn zen_snapshot_round_trips_through_apply() {
        let mut settings = Settings::default();
        let mut zen = settings.zen();
        zen.font_size = 22;
        zen.accent_color = "not-a-color".to_string();
        settings.apply_zen(&zen);
        assert_eq!(settings.zen_font_size, 22);
        assert_eq!(settings.accent_color, "#007bff");
    }

    #[test]
    fn enums_serialize_as_snake_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["trigger_pos"], "right");
        assert_eq!(json["zen_alignment"], "left");
    }
}
