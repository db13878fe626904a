// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output surfaces for a laid-out comparison.
//!
//! `connectors` owns the pairing rule and the vector overlay. `side_by_side` rasterizes a
//! [`ColumnsLayout`](crate::layout::ColumnsLayout) plus its overlay onto a [`Canvas`] for the
//! terminal; `html` writes the same structure as markup with an inline SVG layer.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{Category, SpanRef};

pub mod connectors;
pub mod html;
pub mod side_by_side;

pub use connectors::{
    draw_connectors, pair_connectors, pair_count, plan_connectors, ConnectorPair, ConnectorPath,
    Overlay,
};
pub use html::{render_html_page, render_side_by_side_html};
pub use side_by_side::{render_side_by_side_annotated, render_side_by_side_text};

/// A run of cells on one rendered line: `(y, x0, x1)`, both ends inclusive.
pub type LineSpan = (usize, usize, usize);

/// Where each annotation span landed in the rendered text.
pub type HighlightIndex = BTreeMap<SpanRef, Vec<LineSpan>>;

/// Rendered text plus the cell runs the UI needs to style it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedRender {
    pub text: String,
    pub highlight_index: HighlightIndex,
    /// Cells occupied by connector strokes, tagged with the connector category.
    pub connector_runs: Vec<(Category, LineSpan)>,
    /// Placeholder text of unmatched cells.
    pub unmatched_runs: Vec<LineSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxEdges(u8);

impl BoxEdges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1 << 0);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);
    const HORIZONTAL: Self = Self(Self::LEFT.0 | Self::RIGHT.0);
    const VERTICAL: Self = Self(Self::UP.0 | Self::DOWN.0);

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn to_char(self) -> char {
        match self.0 {
            0 => ' ',
            1..=3 => '─',
            4 | 8 | 12 => '│',
            10 => '╭',
            9 => '╮',
            6 => '╰',
            5 => '╯',
            14 => '├',
            13 => '┤',
            11 => '┬',
            7 => '┴',
            _ => '┼',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CanvasCell {
    Blank,
    Text(char),
    Stroke(BoxEdges),
}

/// A fixed-size, bounds-checked character grid.
///
/// Text always wins: strokes are only laid into cells no text has claimed, and overlapping
/// strokes merge into junctions (`┼`, `├`, ...) instead of overwriting each other. Each stroke
/// cell remembers the category of the last connector that touched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<CanvasCell>,
    tints: Vec<Option<Category>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![CanvasCell::Blank; len],
            tints: vec![None; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(match self.cells[idx] {
            CanvasCell::Blank => ' ',
            CanvasCell::Text(ch) => ch,
            CanvasCell::Stroke(edges) => edges.to_char(),
        })
    }

    /// Category of the stroke at `(x, y)`; `None` for text and blank cells.
    pub fn tint(&self, x: usize, y: usize) -> Result<Option<Category>, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.tints[idx])
    }

    /// Writes `text` left-to-right from `(x, y)`, clipping at the right edge.
    ///
    /// Spaces count as text, so strokes never cut through a line of prose.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }

        for (offset, ch) in text.chars().enumerate() {
            let cx = x + offset;
            if cx >= self.width {
                break;
            }
            let idx = (y * self.width) + cx;
            self.cells[idx] = CanvasCell::Text(ch);
            self.tints[idx] = None;
        }

        Ok(())
    }

    /// Draws a connector as a rounded step: along `y0` to `mid_x`, down or up to `y1`, then
    /// along `y1` to `x1`. Cells holding text are skipped. Returns the number of stroke cells
    /// laid down.
    ///
    /// All coordinates must be in bounds; on error nothing is drawn.
    pub fn draw_step(
        &mut self,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
        mid_x: usize,
        category: Category,
    ) -> Result<usize, CanvasError> {
        for (x, y) in [(x0, y0), (x1, y1), (mid_x, y0)] {
            self.index_of(x, y)?;
        }

        let mut drawn = 0;
        if y0 == y1 {
            for x in x0.min(x1)..=x0.max(x1) {
                drawn += self.stroke(x, y0, BoxEdges::HORIZONTAL, category);
            }
            return Ok(drawn);
        }

        let toward = |from: usize, to: usize| match from.cmp(&to) {
            std::cmp::Ordering::Less => BoxEdges::LEFT,
            std::cmp::Ordering::Greater => BoxEdges::RIGHT,
            std::cmp::Ordering::Equal => BoxEdges::NONE,
        };
        let (leaving, arriving) = if y1 > y0 {
            (BoxEdges::DOWN, BoxEdges::UP)
        } else {
            (BoxEdges::UP, BoxEdges::DOWN)
        };

        for x in range_excluding(x0, mid_x) {
            drawn += self.stroke(x, y0, BoxEdges::HORIZONTAL, category);
        }
        drawn += self.stroke(mid_x, y0, toward(x0, mid_x).union(leaving), category);
        for y in (y0.min(y1) + 1)..y0.max(y1) {
            drawn += self.stroke(mid_x, y, BoxEdges::VERTICAL, category);
        }
        drawn += self.stroke(mid_x, y1, arriving.union(toward(x1, mid_x)), category);
        for x in range_excluding(x1, mid_x) {
            drawn += self.stroke(x, y1, BoxEdges::HORIZONTAL, category);
        }

        Ok(drawn)
    }

    /// Renders the grid with trailing spaces and trailing empty lines removed.
    pub fn to_trimmed_string(&self) -> String {
        let mut lines = (0..self.height)
            .map(|y| {
                let line = (0..self.width)
                    .map(|x| self.get(x, y).unwrap_or(' '))
                    .collect::<String>();
                line.trim_end_matches(' ').to_owned()
            })
            .collect::<Vec<_>>();

        while matches!(lines.last(), Some(line) if line.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    /// Horizontal runs of stroke cells sharing a category, scanning top to bottom.
    pub fn stroke_runs(&self) -> Vec<(Category, LineSpan)> {
        let mut runs = Vec::<(Category, LineSpan)>::new();
        for y in 0..self.height {
            let row = &self.tints[y * self.width..(y + 1) * self.width];
            for (x, tint) in row.iter().enumerate() {
                let Some(category) = *tint else {
                    continue;
                };
                match runs.last_mut() {
                    Some((last, (ly, _, x1)))
                        if *last == category && *ly == y && *x1 + 1 == x =>
                    {
                        *x1 = x;
                    }
                    _ => runs.push((category, (y, x, x))),
                }
            }
        }
        runs
    }

    fn stroke(&mut self, x: usize, y: usize, edges: BoxEdges, category: Category) -> usize {
        let idx = (y * self.width) + x;
        let merged = match self.cells[idx] {
            CanvasCell::Text(_) => return 0,
            CanvasCell::Blank => edges,
            CanvasCell::Stroke(existing) => existing.union(edges),
        };
        self.cells[idx] = CanvasCell::Stroke(merged);
        self.tints[idx] = Some(category);
        1
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok((y * self.width) + x)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CanvasError {
        CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Cells strictly between `from` (inclusive) and `to` (exclusive), in either direction.
fn range_excluding(from: usize, to: usize) -> std::ops::Range<usize> {
    if from <= to {
        from..to
    } else {
        (to + 1)..(from + 1)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.get(x, y).map_err(|_| fmt::Error)?)?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};
    use crate::model::Category;

    fn dotted(width: usize, height: usize) -> Canvas {
        let mut canvas = Canvas::new(width, height).expect("canvas");
        for y in 0..height {
            canvas.write_str(0, y, &".".repeat(width)).expect("row");
        }
        canvas
    }

    #[test]
    fn write_str_clips_at_right_edge() {
        let mut c = Canvas::new(4, 1).expect("canvas");
        c.write_str(2, 0, "abcdef").unwrap();
        assert_eq!(c.to_string(), "  ab");
    }

    #[test]
    fn out_of_bounds_access_errors() {
        let c = Canvas::new(2, 2).expect("canvas");
        assert_eq!(
            c.get(0, 2).unwrap_err(),
            CanvasError::OutOfBounds {
                x: 0,
                y: 2,
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn rejects_area_overflow() {
        let err = Canvas::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            CanvasError::AreaOverflow {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn flat_step_is_a_straight_line() {
        let mut c = Canvas::new(6, 1).expect("canvas");
        let drawn = c.draw_step((1, 0), (4, 0), 2, Category::Method).unwrap();
        assert_eq!(drawn, 4);
        assert_eq!(c.to_string(), " ──── ");
    }

    #[test]
    fn descending_step_uses_rounded_corners() {
        let mut c = Canvas::new(7, 4).expect("canvas");
        c.draw_step((0, 0), (6, 3), 3, Category::Strength).unwrap();
        assert_eq!(c.to_string(), "───╮   \n   │   \n   │   \n   ╰───");
    }

    #[test]
    fn ascending_step_mirrors_the_corners() {
        let mut c = Canvas::new(5, 3).expect("canvas");
        c.draw_step((0, 2), (4, 0), 2, Category::Weakness).unwrap();
        assert_eq!(c.to_string(), "  ╭──\n  │  \n──╯  ");
    }

    #[test]
    fn strokes_skip_text_cells() {
        let mut c = dotted(5, 1);
        c.write_str(0, 0, "ab   ").unwrap();
        let mut blank = Canvas::new(5, 1).expect("canvas");
        blank.write_str(0, 0, "ab").unwrap();

        assert_eq!(c.draw_step((0, 0), (4, 0), 2, Category::Ethics).unwrap(), 0);
        assert_eq!(blank.draw_step((0, 0), (4, 0), 2, Category::Ethics).unwrap(), 3);
        assert_eq!(blank.to_string(), "ab───");
    }

    #[test]
    fn crossing_strokes_merge_into_junctions() {
        let mut c = Canvas::new(5, 3).expect("canvas");
        c.draw_step((0, 0), (4, 2), 2, Category::Method).unwrap();
        c.draw_step((0, 2), (4, 0), 2, Category::Ethics).unwrap();
        assert_eq!(c.to_string(), "──┬──\n  │  \n──┴──");
        assert_eq!(c.tint(2, 1).unwrap(), Some(Category::Ethics));
    }

    #[test]
    fn out_of_bounds_step_draws_nothing() {
        let mut c = Canvas::new(3, 2).expect("canvas");
        assert!(c.draw_step((0, 0), (3, 1), 1, Category::Example).is_err());
        assert_eq!(c.to_trimmed_string(), "");
    }

    #[test]
    fn stroke_runs_group_by_line_and_category() {
        let mut c = Canvas::new(7, 4).expect("canvas");
        c.draw_step((0, 0), (6, 3), 3, Category::Strength).unwrap();
        assert_eq!(
            c.stroke_runs(),
            vec![
                (Category::Strength, (0, 0, 3)),
                (Category::Strength, (1, 3, 3)),
                (Category::Strength, (2, 3, 3)),
                (Category::Strength, (3, 3, 6)),
            ]
        );
    }

    #[test]
    fn trimmed_string_drops_trailing_blanks() {
        let mut c = Canvas::new(4, 3).expect("canvas");
        c.write_str(0, 0, "A  ").unwrap();
        assert_eq!(c.to_trimmed_string(), "A");
    }
}
