// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-panel connectors.
//!
//! Within each row, the k-th span of a category in the left cell is linked to the k-th span of
//! the same category in the right cell. Pairing stops at the shorter side; extra spans stay
//! unconnected. Categories are visited in [`Category::ALL`] order so output is deterministic.
//!
//! Geometry is read through [`SpanMeasure`]. A connector starts at the right-middle edge of the
//! left span and ends at the left-middle edge of the right span, both expressed relative to the
//! overlay origin. The curve is a cubic Bézier whose control points share the horizontal
//! midpoint, each level with its own endpoint.

use tracing::debug;

use crate::layout::{Row, RowLayout, SpanMeasure};
use crate::model::{Category, Point, Rect, Side, SpanRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorPair {
    left: SpanRef,
    right: SpanRef,
    category: Category,
}

impl ConnectorPair {
    pub fn left(&self) -> SpanRef {
        self.left
    }

    pub fn right(&self) -> SpanRef {
        self.right
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Number of connectors one row produces for one category.
pub fn pair_count(row: &Row, category: Category) -> usize {
    let left = row.left().spans().iter().filter(|span| span.category() == category).count();
    let right = row.right().spans().iter().filter(|span| span.category() == category).count();
    left.min(right)
}

/// All connector pairs for a layout, row by row, category by category.
pub fn pair_connectors(rows: &RowLayout) -> Vec<ConnectorPair> {
    let mut pairs = Vec::new();
    for row in rows.rows() {
        let (Some(left_block), Some(right_block)) = (row.left().block(), row.right().block())
        else {
            continue;
        };

        for category in Category::ALL {
            let left = left_block.spans_of(category).map(|(idx, _)| idx);
            let right = right_block.spans_of(category).map(|(idx, _)| idx);
            pairs.extend(left.zip(right).map(|(l, r)| ConnectorPair {
                left: SpanRef::new(row.index(), Side::Left, l),
                right: SpanRef::new(row.index(), Side::Right, r),
                category,
            }));
        }
    }
    pairs
}

/// A drawn connector in overlay-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorPath {
    pair: ConnectorPair,
    from: Point,
    to: Point,
}

impl ConnectorPath {
    pub fn new(pair: ConnectorPair, from: Point, to: Point) -> Self {
        Self { pair, from, to }
    }

    pub fn pair(&self) -> &ConnectorPair {
        &self.pair
    }

    pub fn category(&self) -> Category {
        self.pair.category
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn mid_x(&self) -> f64 {
        (self.from.x + self.to.x) / 2.0
    }

    /// Bézier control points: `(mid_x, from.y)` and `(mid_x, to.y)`.
    pub fn control_points(&self) -> (Point, Point) {
        let mx = self.mid_x();
        (Point::new(mx, self.from.y), Point::new(mx, self.to.y))
    }

    /// Point on the curve at `t` in `0.0..=1.0`.
    pub fn point_at(&self, t: f64) -> Point {
        let (c1, c2) = self.control_points();
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point::new(
            a * self.from.x + b * c1.x + c * c2.x + d * self.to.x,
            a * self.from.y + b * c1.y + c * c2.y + d * self.to.y,
        )
    }

    /// SVG path data: `M x1 y1 C mx y1, mx y2, x2 y2`.
    pub fn path_d(&self) -> String {
        let (c1, c2) = self.control_points();
        let mut out = String::with_capacity(64);
        out.push_str("M ");
        push_point(&mut out, self.from, " C ");
        push_point(&mut out, c1, ", ");
        push_point(&mut out, c2, ", ");
        push_point(&mut out, self.to, "");
        out
    }
}

fn push_point(out: &mut String, point: Point, sep: &str) {
    out.push_str(&coord(point.x).to_string());
    out.push(' ');
    out.push_str(&coord(point.y).to_string());
    out.push_str(sep);
}

/// Two decimals is plenty for screen output and keeps paths stable across float noise.
fn coord(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// The vector layer connectors are drawn into.
///
/// Every draw replaces the whole content, so observers never see a partial set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    bounds: Option<Rect>,
    paths: Vec<ConnectorPath>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay rectangle (viewport coordinates) at the time of the last non-empty draw.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn paths(&self) -> &[ConnectorPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.bounds = None;
        self.paths.clear();
    }

    /// Serializes the overlay as an inline `<svg>` element sized to its bounds.
    ///
    /// Each connector becomes `<path class="sbs-path <category>" d="...">`; styling is left to
    /// the stylesheet. An empty overlay still yields the element so it can be swapped in place.
    pub fn to_svg(&self) -> String {
        let bounds = self.bounds.unwrap_or(Rect::ZERO);
        let mut out = String::with_capacity(96 + self.paths.len() * 96);
        out.push_str(r#"<svg class="sbs-overlay" width=""#);
        out.push_str(&coord(bounds.width).to_string());
        out.push_str(r#"" height=""#);
        out.push_str(&coord(bounds.height).to_string());
        out.push_str(r#"" aria-hidden="true">"#);
        for path in &self.paths {
            out.push_str(r#"<path class="sbs-path "#);
            out.push_str(path.category().as_str());
            out.push_str(r#"" data-left=""#);
            out.push_str(&path.pair.left.to_string());
            out.push_str(r#"" data-right=""#);
            out.push_str(&path.pair.right.to_string());
            out.push_str(r#"" d=""#);
            out.push_str(&path.path_d());
            out.push_str(r#""/>"#);
        }
        out.push_str("</svg>");
        out
    }

    fn replace(&mut self, bounds: Rect, paths: Vec<ConnectorPath>) {
        self.bounds = Some(bounds);
        self.paths = paths;
    }
}

/// Computes connector paths from current geometry.
///
/// Returns `None` when the surface has no overlay mounted. Spans the surface cannot measure
/// fall back to [`Rect::ZERO`]; the next draw after layout settles corrects them.
pub fn plan_connectors<M: SpanMeasure + ?Sized>(
    rows: &RowLayout,
    measure: &M,
) -> Option<(Rect, Vec<ConnectorPath>)> {
    let bounds = measure.overlay_rect()?;
    let measure_or_zero = |span: SpanRef| {
        measure.measure_span(span).unwrap_or_else(|| {
            debug!(%span, "span not measured yet; using zero rect");
            Rect::ZERO
        })
    };

    let paths = pair_connectors(rows)
        .into_iter()
        .map(|pair| {
            let left = measure_or_zero(pair.left);
            let right = measure_or_zero(pair.right);
            ConnectorPath::new(
                pair,
                bounds.to_local(left.right_middle()),
                bounds.to_local(right.left_middle()),
            )
        })
        .collect();

    Some((bounds, paths))
}

/// Clears `overlay`, then redraws it when `enabled` and both rows and overlay surface exist.
///
/// Never fails; missing inputs leave the overlay empty. Returns the number of drawn connectors.
pub fn draw_connectors<M: SpanMeasure + ?Sized>(
    rows: Option<&RowLayout>,
    enabled: bool,
    measure: &M,
    overlay: &mut Overlay,
) -> usize {
    overlay.clear();
    if !enabled {
        return 0;
    }

    let Some(rows) = rows else {
        debug!("no row layout mounted; skipping connector draw");
        return 0;
    };

    match plan_connectors(rows, measure) {
        Some((bounds, paths)) => {
            overlay.replace(bounds, paths);
            overlay.len()
        }
        None => {
            debug!("no overlay surface; skipping connector draw");
            0
        }
    }
}

#[cfg(test)]
mod tests;
