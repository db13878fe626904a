// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cell-grid layout pass for the side-by-side view.
//!
//! Word-wraps each cell into its column, aligns rows to the taller cell and records where every
//! annotation span ended up. The result answers [`SpanMeasure`] queries the same way a browser
//! answers `getBoundingClientRect`.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use super::measure::SpanMeasure;
use super::rows::{Cell, RowLayout};
use crate::model::{Category, Rect, Side, SpanRef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Width of each text column, in cells.
    pub column_width: usize,
    /// Cells between the two columns, where connectors run.
    pub gutter_width: usize,
    /// Blank lines between consecutive rows.
    pub row_gap: usize,
    /// Size of one cell in output units (1.0 for terminals, pixels for HTML).
    pub cell_width: f64,
    pub line_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_width: 40,
            gutter_width: 10,
            row_gap: 1,
            cell_width: 1.0,
            line_height: 1.0,
        }
    }
}

impl LayoutOptions {
    pub const MIN_COLUMN_WIDTH: usize = 8;

    /// Pixel metrics matching the stylesheet of the HTML export (13px monospace, 20px lines).
    pub fn html() -> Self {
        Self {
            column_width: 56,
            gutter_width: 12,
            row_gap: 1,
            cell_width: 7.8,
            line_height: 20.0,
        }
    }

    /// Splits `total_width` cells evenly into two columns around the gutter.
    pub fn fit_width(mut self, total_width: usize) -> Self {
        let available = total_width.saturating_sub(self.gutter_width);
        self.column_width = (available / 2).max(Self::MIN_COLUMN_WIDTH);
        self
    }

    pub fn total_width(&self) -> usize {
        self.column_width * 2 + self.gutter_width
    }

    pub fn column_x(&self, side: Side) -> usize {
        match side {
            Side::Left => 0,
            Side::Right => self.column_width + self.gutter_width,
        }
    }
}

/// Visible window onto the laid-out rows, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub scroll_top: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            scroll_top: 0,
        }
    }

    pub fn scrolled_to(mut self, scroll_top: usize) -> Self {
        self.scroll_top = scroll_top;
        self
    }
}

/// A horizontal run of span cells on one content line. `x1` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFragment {
    pub line: usize,
    pub x0: usize,
    pub x1: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBox {
    category: Category,
    fragments: SmallVec<[LineFragment; 2]>,
}

impl SpanBox {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn fragments(&self) -> &[LineFragment] {
        &self.fragments
    }

    /// Union of all fragments in content coordinates; `None` when nothing of the span is visible.
    fn content_rect(&self, options: &LayoutOptions) -> Option<Rect> {
        self.fragments
            .iter()
            .map(|frag| {
                Rect::new(
                    frag.x0 as f64 * options.cell_width,
                    frag.line as f64 * options.line_height,
                    (frag.x1 - frag.x0) as f64 * options.cell_width,
                    options.line_height,
                )
            })
            .reduce(|acc, rect| acc.union(&rect))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBox {
    x: usize,
    lines: Vec<String>,
    unmatched: bool,
}

impl CellBox {
    pub fn x(&self) -> usize {
        self.x
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_unmatched(&self) -> bool {
        self.unmatched
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBox {
    index: usize,
    top: usize,
    height: usize,
    left: CellBox,
    right: CellBox,
}

impl RowBox {
    pub fn index(&self) -> usize {
        self.index
    }

    /// First content line of the row.
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, side: Side) -> &CellBox {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnsLayout {
    options: LayoutOptions,
    viewport: Viewport,
    rows: Vec<RowBox>,
    spans: BTreeMap<SpanRef, SpanBox>,
    total_lines: usize,
}

impl ColumnsLayout {
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn rows(&self) -> &[RowBox] {
        &self.rows
    }

    pub fn spans(&self) -> &BTreeMap<SpanRef, SpanBox> {
        &self.spans
    }

    pub fn span(&self, span: SpanRef) -> Option<&SpanBox> {
        self.spans.get(&span)
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport.height)
    }

    /// The rows container in viewport coordinates. Scrolling moves it up.
    pub fn container_rect(&self) -> Rect {
        Rect::new(
            0.0,
            -(self.viewport.scroll_top as f64) * self.options.line_height,
            self.options.total_width() as f64 * self.options.cell_width,
            self.total_lines as f64 * self.options.line_height,
        )
    }
}

impl SpanMeasure for ColumnsLayout {
    fn overlay_rect(&self) -> Option<Rect> {
        Some(self.container_rect())
    }

    fn measure_span(&self, span: SpanRef) -> Option<Rect> {
        let rect = self.spans.get(&span)?.content_rect(&self.options)?;
        let origin = self.container_rect();
        Some(Rect::new(rect.left + origin.left, rect.top + origin.top, rect.width, rect.height))
    }
}

/// Runs the layout pass for `rows` at the given options and viewport.
pub fn layout_columns(
    rows: &RowLayout,
    options: LayoutOptions,
    viewport: Viewport,
) -> ColumnsLayout {
    let column_width = options.column_width.max(1);
    let mut boxes = Vec::with_capacity(rows.len());
    let mut spans = BTreeMap::new();
    let mut top = 0usize;

    for (idx, row) in rows.rows().iter().enumerate() {
        if idx > 0 {
            top += options.row_gap;
        }

        let cells = [Side::Left, Side::Right].map(|side| {
            let x = options.column_x(side);
            match row.cell(side) {
                Cell::Unmatched => CellBox {
                    x,
                    lines: Vec::new(),
                    unmatched: true,
                },
                Cell::Block { block, .. } => {
                    let wrapped = wrap_text(block.text(), column_width);
                    for (span_idx, span) in block.spans().iter().enumerate() {
                        let fragments = wrapped.fragments(span.start(), span.end(), x, top);
                        spans.insert(
                            SpanRef::new(row.index(), side, span_idx),
                            SpanBox {
                                category: span.category(),
                                fragments,
                            },
                        );
                    }
                    CellBox {
                        x,
                        lines: wrapped.lines,
                        unmatched: false,
                    }
                }
            }
        });

        let height = cells.iter().map(|cell| cell.lines.len()).max().unwrap_or(0).max(1);
        let [left, right] = cells;
        boxes.push(RowBox {
            index: row.index(),
            top,
            height,
            left,
            right,
        });
        top += height;
    }

    ColumnsLayout {
        options,
        viewport,
        rows: boxes,
        spans,
        total_lines: top,
    }
}

struct WrappedText {
    lines: Vec<String>,
    /// `(line, col)` of every char; `None` for whitespace swallowed by a line break.
    positions: Vec<Option<(usize, usize)>>,
}

impl WrappedText {
    /// Cell in front of char `idx`: that char's cell, or the cell after the last visible
    /// char before it.
    fn caret(&self, idx: usize) -> (usize, usize) {
        if let Some(Some(pos)) = self.positions.get(idx) {
            return *pos;
        }
        self.positions[..idx.min(self.positions.len())]
            .iter()
            .rev()
            .flatten()
            .next()
            .map_or((0, 0), |&(line, col)| (line, col + 1))
    }

    fn fragments(
        &self,
        start: usize,
        end: usize,
        x_offset: usize,
        line_offset: usize,
    ) -> SmallVec<[LineFragment; 2]> {
        let end = end.min(self.positions.len());
        let mut fragments = SmallVec::<[LineFragment; 2]>::new();
        if start >= end {
            let (line, col) = self.caret(end);
            let x = col + x_offset;
            fragments.push(LineFragment { line: line + line_offset, x0: x, x1: x });
            return fragments;
        }

        for &(line, col) in self.positions[start.min(end)..end].iter().flatten() {
            let line = line + line_offset;
            let x = col + x_offset;
            match fragments.last_mut() {
                Some(frag) if frag.line == line => {
                    frag.x0 = frag.x0.min(x);
                    frag.x1 = frag.x1.max(x + 1);
                }
                _ => fragments.push(LineFragment { line, x0: x, x1: x + 1 }),
            }
        }

        fragments
    }
}

/// Greedy word wrap. Words longer than `width` are hard-broken.
fn wrap_text(text: &str, width: usize) -> WrappedText {
    let width = width.max(1);
    let chars = text.chars().collect::<Vec<_>>();
    let mut positions = vec![None; chars.len()];
    let mut lines = Vec::<String>::new();
    let mut current = String::new();
    let mut col = 0usize;
    let mut pending_space = None::<std::ops::Range<usize>>;
    let mut idx = 0usize;

    while idx < chars.len() {
        let start = idx;
        if chars[idx].is_whitespace() {
            while idx < chars.len() && chars[idx].is_whitespace() {
                idx += 1;
            }
            pending_space = Some(start..idx);
            continue;
        }

        while idx < chars.len() && !chars[idx].is_whitespace() {
            idx += 1;
        }
        let word_len = idx - start;
        let space = pending_space.take().unwrap_or(start..start);

        if col > 0 && col + space.len() + word_len > width {
            lines.push(std::mem::take(&mut current));
            col = 0;
        }
        if col > 0 {
            for pos in space {
                positions[pos] = Some((lines.len(), col));
                current.push(' ');
                col += 1;
            }
        }
        for pos in start..idx {
            if col >= width {
                lines.push(std::mem::take(&mut current));
                col = 0;
            }
            positions[pos] = Some((lines.len(), col));
            current.push(chars[pos]);
            col += 1;
        }
    }
    lines.push(current);

    WrappedText { lines, positions }
}

#[cfg(test)]
mod tests {
    use super::{layout_columns, wrap_text, LayoutOptions, LineFragment, Viewport};
    use crate::layout::measure::SpanMeasure;
    use crate::layout::rows::build_rows;
    use crate::model::{fixtures, Rect, Side, SpanRef};

    fn narrow() -> LayoutOptions {
        LayoutOptions {
            column_width: 12,
            gutter_width: 6,
            row_gap: 1,
            cell_width: 1.0,
            line_height: 1.0,
        }
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let wrapped = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(wrapped.lines, vec!["the quick", "brown fox", "jumps"]);
        // The space before "brown" is swallowed by the break.
        assert_eq!(wrapped.positions[9], None);
        assert_eq!(wrapped.positions[10], Some((1, 0)));
    }

    #[test]
    fn wrap_hard_breaks_long_words_and_collapses_nothing_else() {
        let wrapped = wrap_text("abcdefghij xy", 4);
        assert_eq!(wrapped.lines, vec!["abcd", "efgh", "ij", "xy"]);

        let wrapped = wrap_text("", 4);
        assert_eq!(wrapped.lines, vec![""]);
    }

    #[test]
    fn wrap_keeps_inner_whitespace_runs_on_one_line() {
        let wrapped = wrap_text("a  b", 10);
        assert_eq!(wrapped.lines, vec!["a  b"]);
        assert_eq!(wrapped.positions[3], Some((0, 3)));
    }

    #[test]
    fn fragments_split_across_lines() {
        let wrapped = wrap_text("the quick brown fox", 10);
        // "quick brown" spans chars 4..15
        let frags = wrapped.fragments(4, 15, 100, 7);
        assert_eq!(
            frags.as_slice(),
            &[
                LineFragment { line: 7, x0: 104, x1: 109 },
                LineFragment { line: 8, x0: 100, x1: 105 },
            ]
        );
    }

    #[test]
    fn empty_ranges_get_a_zero_width_caret() {
        let wrapped = wrap_text("the quick brown fox", 10);
        assert_eq!(
            wrapped.fragments(4, 4, 100, 7).as_slice(),
            &[LineFragment { line: 7, x0: 104, x1: 104 }]
        );
        // Swallowed break whitespace: caret sits after "quick".
        assert_eq!(
            wrapped.fragments(9, 9, 0, 0).as_slice(),
            &[LineFragment { line: 0, x0: 9, x1: 9 }]
        );
        assert_eq!(
            wrapped.fragments(19, 19, 0, 0).as_slice(),
            &[LineFragment { line: 1, x0: 9, x1: 9 }]
        );
        assert_eq!(
            wrap_text("", 10).fragments(0, 0, 3, 2).as_slice(),
            &[LineFragment { line: 2, x0: 3, x1: 3 }]
        );
    }

    #[test]
    fn rows_align_to_the_taller_cell_and_stack_with_gaps() {
        let (left, right) = fixtures::scenario_a();
        let rows = build_rows(&left, &right);
        let layout = layout_columns(&rows, narrow(), Viewport::new(30, 10));

        // "The essay names the study." wraps to 3 lines at width 12.
        let first = &layout.rows()[0];
        assert_eq!(first.top(), 0);
        assert_eq!(first.cell(Side::Left).lines(), &["The essay", "names the", "study."]);
        assert_eq!(first.height(), 3);

        let second = &layout.rows()[1];
        assert_eq!(second.top(), 4);
        assert!(second.cell(Side::Left).is_unmatched());
        assert_eq!(second.cell(Side::Right).x(), 18);
        assert_eq!(layout.total_lines(), second.top() + second.height());
    }

    #[test]
    fn measured_rects_follow_scroll_but_stay_fixed_relative_to_overlay() {
        let (left, right) = fixtures::scenario_a();
        let rows = build_rows(&left, &right);
        let span = SpanRef::new(0, Side::Right, 0);

        let top = layout_columns(&rows, narrow(), Viewport::new(30, 3));
        let scrolled = layout_columns(&rows, narrow(), Viewport::new(30, 3).scrolled_to(2));

        let a = top.measure_span(span).expect("span");
        let b = scrolled.measure_span(span).expect("span");
        assert_eq!(b.top, a.top - 2.0);

        let overlay_a = top.overlay_rect().expect("overlay");
        let overlay_b = scrolled.overlay_rect().expect("overlay");
        assert_eq!(a.top - overlay_a.top, b.top - overlay_b.top);
        assert_eq!(top.max_scroll(), top.total_lines() - 3);
    }

    #[test]
    fn wrapped_span_measures_as_union_of_fragments() {
        let (left, right) = fixtures::scenario_a();
        let rows = build_rows(&left, &right);
        let layout = layout_columns(&rows, narrow(), Viewport::new(30, 10));

        // Right block: "The essay analyses the study." -> "The essay", "analyses the", "study."
        let rect = layout.measure_span(SpanRef::new(0, Side::Right, 0)).expect("span");
        assert_eq!(rect, Rect::new(18.0, 1.0, 12.0, 2.0));
    }

    #[test]
    fn pixel_metrics_scale_rects() {
        let (left, right) = fixtures::scenario_b();
        let rows = build_rows(&left, &right);
        let options = LayoutOptions {
            column_width: 40,
            ..LayoutOptions::html()
        };
        let layout = layout_columns(&rows, options, Viewport::new(200, 40));

        let rect = layout.measure_span(SpanRef::new(0, Side::Right, 0)).expect("span");
        assert_eq!(rect.height, 20.0);
        assert_eq!(rect.top, 0.0);
        assert_eq!(rect.left, (40.0 + 12.0 + 10.0) * 7.8);
    }
}
