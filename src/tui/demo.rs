// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::{MarkupError, MarkupReader};
use crate::model::ComparisonSource;

const DEMO_PAGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/demo-page.html"));

pub const DEMO_LEFT: &str = "merit";
pub const DEMO_RIGHT: &str = "distinction";

/// The bundled pair of model answers.
pub fn demo_comparison() -> Result<ComparisonSource, MarkupError> {
    MarkupReader::new()?.extract_comparison(DEMO_PAGE, DEMO_LEFT, DEMO_RIGHT)
}
