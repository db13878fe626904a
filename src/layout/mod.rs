// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for the side-by-side view.
//!
//! `rows` aligns the two documents block by block; `columns` places the aligned rows on a cell
//! grid and answers span geometry queries through [`SpanMeasure`].

pub mod columns;
pub mod measure;
pub mod rows;

pub use columns::{
    layout_columns, CellBox, ColumnsLayout, LayoutOptions, LineFragment, RowBox, SpanBox, Viewport,
};
pub use measure::{MeasuredSpans, SpanMeasure, Unmounted};
pub use rows::{build_rows, Cell, Row, RowLayout};
