// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Documents are ordered blocks of prose carrying category-tagged annotation spans. Geometry
//! types describe measured rectangles; span refs address spans inside a row layout.

pub mod category;
pub mod document;
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod span_ref;

pub use category::{Category, CategoryCounts, ParseCategoryError};
pub use document::{
    AnnotatedDocument, AnnotationSpan, BlockBuilder, BlockError, ComparisonSource, ContentBlock,
};
pub use geometry::{Point, Rect};
pub use ids::{DocumentId, Id, IdError};
pub use span_ref::{Side, SpanRef};
