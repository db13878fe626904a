// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared view state for the comparison screen.
//!
//! The controller owns one [`ComparisonState`]; front ends read it and watch `rev` to know when
//! to repaint.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Analysis,
    SideBySide,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::SideBySide => "side-by-side",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analysis" => Ok(Self::Analysis),
            "side-by-side" => Ok(Self::SideBySide),
            other => Err(ParseViewModeError {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewModeError {
    value: String,
}

impl fmt::Display for ParseViewModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view mode: {} (expected analysis | side-by-side)", self.value)
    }
}

impl std::error::Error for ParseViewModeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonState {
    rev: u64,
    mode: ViewMode,
    connectors_enabled: bool,
}

impl Default for ComparisonState {
    fn default() -> Self {
        Self {
            rev: 0,
            mode: ViewMode::Analysis,
            connectors_enabled: true,
        }
    }
}

impl ComparisonState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn connectors_enabled(&self) -> bool {
        self.connectors_enabled
    }

    /// Connectors are visible only in side-by-side mode with the toggle on.
    pub fn connectors_visible(&self) -> bool {
        self.mode == ViewMode::SideBySide && self.connectors_enabled
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn set_connectors_enabled(&mut self, enabled: bool) {
        if self.connectors_enabled == enabled {
            return;
        }
        self.connectors_enabled = enabled;
        self.rev = self.rev.wrapping_add(1);
    }

    /// Marks derived content (rows, overlay) as changed without touching the settings.
    pub fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{ComparisonState, ViewMode};

    #[test]
    fn defaults_to_analysis_with_connectors_on() {
        let state = ComparisonState::default();
        assert_eq!(state.mode(), ViewMode::Analysis);
        assert!(state.connectors_enabled());
        assert!(!state.connectors_visible());
    }

    #[test]
    fn setters_bump_rev_only_on_change() {
        let mut state = ComparisonState::default();
        state.set_mode(ViewMode::Analysis);
        state.set_connectors_enabled(true);
        assert_eq!(state.rev(), 0);

        state.set_mode(ViewMode::SideBySide);
        assert_eq!(state.rev(), 1);
        assert!(state.connectors_visible());

        state.set_connectors_enabled(false);
        assert_eq!(state.rev(), 2);
        assert!(!state.connectors_visible());
    }

    #[test]
    fn mode_round_trips_through_its_name() {
        for mode in [ViewMode::Analysis, ViewMode::SideBySide] {
            assert_eq!(mode.as_str().parse::<ViewMode>(), Ok(mode));
        }
        let err = "grid".parse::<ViewMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown view mode: grid (expected analysis | side-by-side)");
    }
}
