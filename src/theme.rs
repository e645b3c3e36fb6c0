use std::path::Path;

use eframe::egui::{self, Color32, Stroke};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// HexColor – `#RRGGBB` (or `#RRGGBBAA`) in config files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Color32);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor(Color32::from_rgb(r, g, b))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color32::from_hex(&s)
            .map(HexColor)
            .map_err(|_| ConfigError::HexColor(s))
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0.to_hex()
    }
}

// ---------------------------------------------------------------------------
// Theme – every cosmetic choice of the dashboard
// ---------------------------------------------------------------------------

/// Colours and sizes for the whole dashboard. Any subset can be overridden
/// from a JSON file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Page background.
    pub background: HexColor,
    /// Default text.
    pub text: HexColor,
    /// Titles, card captions, selected tiles, line chart.
    pub accent: HexColor,
    /// Inset border around each visual.
    pub visual_border: HexColor,
    /// Status colours in sorted-status order; extended with generated hues.
    pub chart_palette: Vec<HexColor>,
    pub table_background: HexColor,
    pub table_text: HexColor,
    pub table_border: HexColor,
    /// Height of the first chart row.
    pub chart_height: f32,
    /// Height of the bar chart / table row.
    pub large_chart_height: f32,
    /// Width of each loan-status tile.
    pub tile_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        let pink = HexColor::rgb(0xF5, 0xA4, 0xC5);
        let white = HexColor::rgb(0xFF, 0xFF, 0xFF);
        Self {
            background: HexColor::rgb(0x89, 0x33, 0x95),
            text: white,
            accent: pink,
            visual_border: HexColor::rgb(0x00, 0x00, 0x00),
            chart_palette: vec![pink, HexColor::rgb(0x66, 0xB3, 0xFF), white],
            table_background: pink,
            table_text: HexColor::rgb(0x00, 0x00, 0x00),
            table_border: white,
            chart_height: 250.0,
            large_chart_height: 500.0,
            tile_width: 200.0,
        }
    }
}

impl Theme {
    /// Default theme, or the default overlaid with a JSON file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Theme::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ThemeIo {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = serde_json::from_str(&text)?;
        log::info!("Loaded theme from {}", path.display());
        Ok(theme)
    }

    pub fn palette(&self) -> Vec<Color32> {
        self.chart_palette.iter().map(|c| c.0).collect()
    }

    /// egui visuals for the whole window.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.background.0;
        visuals.window_fill = self.background.0;
        visuals.override_text_color = Some(self.text.0);
        visuals.selection.bg_fill = self.accent.0;
        visuals.selection.stroke = Stroke::new(1.0, Color32::BLACK);
        visuals
    }
}
