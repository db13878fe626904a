// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sidelink: side-by-side comparison of annotated texts.
//!
//! Two documents whose paragraphs carry category-highlighted spans are paired row by row
//! ([`layout::build_rows`]). Same-category spans across a row are linked by connectors
//! ([`render::draw_connectors`]), and a small view-mode state machine ([`view`]) decides when
//! rows are rebuilt and when connectors are redrawn.

pub mod format;
pub mod layout;
pub mod model;
pub mod render;
pub mod tui;
pub mod ui;
pub mod view;
