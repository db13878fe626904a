// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document input and output.
//!
//! `markup` reads annotated paragraphs out of study pages; `json` is the lossless interchange
//! form of [`crate::model::ComparisonSource`].

pub mod json;
pub mod markup;

pub use json::{
    load_comparison, load_document, parse_comparison, parse_document, save_comparison,
    to_json_pretty, JsonError,
};
pub use markup::{extract_document, parse_blocks, MarkupError, MarkupReader};
