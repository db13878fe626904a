// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{Rect, SpanRef};

/// Reads live geometry from whatever surface displays the row layout.
///
/// All rectangles are in viewport coordinates. `None` means "not mounted / not laid out yet";
/// callers must treat it as a soft miss, never as an error.
pub trait SpanMeasure {
    /// Bounding box of the connector overlay.
    fn overlay_rect(&self) -> Option<Rect>;

    /// Current bounding box of one annotation span.
    fn measure_span(&self, span: SpanRef) -> Option<Rect>;
}

impl<T: SpanMeasure + ?Sized> SpanMeasure for &T {
    fn overlay_rect(&self) -> Option<Rect> {
        (**self).overlay_rect()
    }

    fn measure_span(&self, span: SpanRef) -> Option<Rect> {
        (**self).measure_span(span)
    }
}

/// A surface with nothing mounted: no overlay, no spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmounted;

impl SpanMeasure for Unmounted {
    fn overlay_rect(&self) -> Option<Rect> {
        None
    }

    fn measure_span(&self, _span: SpanRef) -> Option<Rect> {
        None
    }
}

/// Fixed geometry snapshot, e.g. recorded from a real surface or written by hand in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasuredSpans {
    overlay: Option<Rect>,
    spans: BTreeMap<SpanRef, Rect>,
}

impl MeasuredSpans {
    pub fn new(overlay: Rect) -> Self {
        Self {
            overlay: Some(overlay),
            spans: BTreeMap::new(),
        }
    }

    pub fn without_overlay() -> Self {
        Self::default()
    }

    pub fn with_span(mut self, span: SpanRef, rect: Rect) -> Self {
        self.spans.insert(span, rect);
        self
    }

    pub fn insert(&mut self, span: SpanRef, rect: Rect) {
        self.spans.insert(span, rect);
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

impl SpanMeasure for MeasuredSpans {
    fn overlay_rect(&self) -> Option<Rect> {
        self.overlay
    }

    fn measure_span(&self, span: SpanRef) -> Option<Rect> {
        self.spans.get(&span).copied()
    }
}
