use ratatui::style::Color;

use crate::model::UiConfig;
use crate::view::Severity;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x1B, 0x26),
            text: Color::Rgb(0xC0, 0xCA, 0xF5),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x56, 0x5F, 0x89),
            accent: Color::Rgb(0x7A, 0xA2, 0xF7),
            success: Color::Rgb(0x9E, 0xCE, 0x6A),
            error: Color::Rgb(0xF7, 0x76, 0x8E),
            info: Color::Rgb(0x7D, 0xCF, 0xFF),
            selection_bg: Color::Rgb(0x28, 0x34, 0x57),
            border: Color::Rgb(0x3B, 0x42, 0x61),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "accent" => theme.accent = color,
                    "success" => theme.success = color,
                    "error" => theme.error = color,
                    "info" => theme.info = color,
                    "selection_bg" => theme.selection_bg = color,
                    "border" => theme.border = color,
                    _ => {}
                }
            }
        }
        theme
    }

    /// Toast color for a severity
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Error => self.error,
        }
    }
}
