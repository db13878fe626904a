// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::model::Category;

const PALETTE_VARS: [&str; 2] = ["SIDELINK_TUI_PALETTE", "SIDELINK_PALETTE"];

/// Terminal styles for categories, connectors and chrome.
///
/// Colors come from the ANSI-16 slots, optionally remapped by a palette override. With
/// `NO_COLOR` set, categories fall back to text modifiers.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
    monochrome: bool,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let monochrome = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        let palette = palette_override_from_env()?;
        Ok(Self {
            palette,
            monochrome,
        })
    }

    #[cfg(test)]
    pub(crate) fn monochrome() -> Self {
        Self {
            palette: None,
            monochrome: true,
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi[color as usize],
            None => color.into(),
        }
    }

    pub(crate) fn category_color(&self, category: Category) -> Color {
        self.ansi_color(Ansi16::for_category(category))
    }

    /// Background fill for highlighted text.
    pub(crate) fn highlight_style(&self, category: Category) -> Style {
        if self.monochrome {
            return self.base_style().add_modifier(Modifier::UNDERLINED);
        }
        self.base_style()
            .fg(self.ansi_color(Ansi16::Black))
            .bg(self.category_color(category))
    }

    pub(crate) fn connector_style(&self, category: Category) -> Style {
        if self.monochrome {
            return self.base_style().add_modifier(Modifier::BOLD);
        }
        self.base_style()
            .fg(self.category_color(category))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn unmatched_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::BrightBlack))
            .add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::Yellow))
        } else {
            self.base_style()
        }
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Cyan))
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::White))
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Red))
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    /// `fg,bg` followed by the 16 ANSI slots, black through bright white.
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then 16 ANSI colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let mut ansi = [Color::Reset; 16];
        for (slot, part) in ansi.iter_mut().zip(&parts[2..]) {
            *slot = parse_palette_color(part)?;
        }

        Ok(Self {
            fg: parse_palette_color(parts[0])?,
            bg: parse_palette_color(parts[1])?,
            ansi,
        })
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    for name in PALETTE_VARS {
        let value = match env::var(name) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => continue,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: name.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        return TuiPalette::parse_csv(trimmed).map(Some).map_err(|error| {
            ThemeError::InvalidEnv {
                name: name.to_owned(),
                value: format!("{trimmed} ({error})"),
            }
        });
    }
    Ok(None)
}

/// `#RRGGBB`, `0xRRGGBB`, `RRGGBB` or X11 `rgb:RR/GG/BB` (2 or 4 hex digits per channel).
fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels = rest.split('/').map(parse_hex_channel).collect::<Result<Vec<_>, _>>()?;
        let [r, g, b] = channels[..] else {
            return Err(format!("invalid rgb: value: {trimmed}"));
        };
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = lower
        .strip_prefix('#')
        .or_else(|| lower.strip_prefix("0x"))
        .unwrap_or(&lower);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Ok(Color::Rgb(r, g, b))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|wide| (wide >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!("invalid rgb: component {value} (expected 2 or 4 hex digits)")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    fn for_category(category: Category) -> Self {
        match category {
            Category::Strength => Self::Green,
            Category::Weakness => Self::Red,
            Category::Example => Self::Blue,
            Category::Method => Self::Magenta,
            Category::Ethics => Self::Yellow,
            Category::Evaluation => Self::Cyan,
            Category::Application => Self::BrightMagenta,
        }
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Black => Color::Black,
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Blue => Color::Blue,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightRed => Color::LightRed,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
            Ansi16::BrightBlue => Color::LightBlue,
            Ansi16::BrightMagenta => Color::LightMagenta,
            Ansi16::BrightCyan => Color::LightCyan,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
