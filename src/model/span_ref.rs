// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Which column of the side-by-side layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one annotation span inside a row layout.
///
/// `span` indexes the block's span list (all categories), so a ref stays valid for as long as
/// the row layout it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanRef {
    row: usize,
    side: Side,
    span: usize,
}

impl SpanRef {
    pub fn new(row: usize, side: Side, span: usize) -> Self {
        Self { row, side, span }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl fmt::Display for SpanRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}:{}:s{}", self.row, self.side, self.span)
    }
}
