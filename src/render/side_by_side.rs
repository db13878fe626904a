// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::trace;

use super::{AnnotatedRender, Canvas, CanvasError, ConnectorPath, HighlightIndex, Overlay};
use crate::layout::{ColumnsLayout, LayoutOptions};
use crate::model::Side;

/// Text shown in place of a missing block.
pub const UNMATCHED_PLACEHOLDER: &str = "(unmatched)";

/// Renders the whole laid-out comparison (not just the visible window) as plain text.
pub fn render_side_by_side_text(
    layout: &ColumnsLayout,
    overlay: &Overlay,
) -> Result<String, CanvasError> {
    Ok(render_side_by_side_annotated(layout, overlay)?.text)
}

/// Like [`render_side_by_side_text`], plus the cell runs of spans, connectors and placeholders.
///
/// Overlay coordinates are local to the rows container, which is exactly the content grid, so
/// connectors land on the right lines regardless of the scroll offset they were drawn at.
pub fn render_side_by_side_annotated(
    layout: &ColumnsLayout,
    overlay: &Overlay,
) -> Result<AnnotatedRender, CanvasError> {
    let options = layout.options();
    let mut canvas = Canvas::new(options.total_width(), layout.total_lines().max(1))?;
    let mut unmatched_runs = Vec::new();

    for row in layout.rows() {
        for side in [Side::Left, Side::Right] {
            let cell = row.cell(side);
            if cell.is_unmatched() {
                let placeholder = clip(UNMATCHED_PLACEHOLDER, options.column_width);
                let len = placeholder.chars().count();
                canvas.write_str(cell.x(), row.top(), &placeholder)?;
                if len > 0 {
                    unmatched_runs.push((row.top(), cell.x(), cell.x() + len - 1));
                }
                continue;
            }
            for (offset, line) in cell.lines().iter().enumerate() {
                canvas.write_str(cell.x(), row.top() + offset, line)?;
            }
        }
    }

    let mut highlight_index = HighlightIndex::new();
    for (span_ref, span_box) in layout.spans() {
        let runs = span_box
            .fragments()
            .iter()
            .filter(|frag| frag.x1 > frag.x0)
            .map(|frag| (frag.line, frag.x0, frag.x1 - 1))
            .collect::<Vec<_>>();
        if !runs.is_empty() {
            highlight_index.insert(*span_ref, runs);
        }
    }

    for path in overlay.paths() {
        let (from, to, mid_x) = cell_endpoints(path, options, &canvas);
        let drawn = canvas.draw_step(from, to, mid_x, path.category())?;
        trace!(left = %path.pair().left(), drawn, "rasterized connector");
    }

    Ok(AnnotatedRender {
        text: canvas.to_trimmed_string(),
        highlight_index,
        connector_runs: canvas.stroke_runs(),
        unmatched_runs,
    })
}

/// Maps a connector from layout units to canvas cells.
///
/// The stroke starts in the first cell after the left span, ends in the last cell before the
/// right span and turns at the column of the curve's control points. Everything is clamped
/// into the canvas so degenerate geometry still yields a drawable stroke.
fn cell_endpoints(
    path: &ConnectorPath,
    options: &LayoutOptions,
    canvas: &Canvas,
) -> ((usize, usize), (usize, usize), usize) {
    let max_x = canvas.width().saturating_sub(1);
    let max_y = canvas.height().saturating_sub(1);
    let to_cell = |value: f64, unit: f64, max: usize| -> usize {
        if !value.is_finite() || value <= 0.0 || unit <= 0.0 {
            return 0;
        }
        ((value / unit).floor() as usize).min(max)
    };

    let from = path.from();
    let to = path.to();
    let x0 = to_cell(from.x, options.cell_width, max_x);
    let y0 = to_cell(from.y, options.line_height, max_y);
    let x1 = to_cell(to.x, options.cell_width, max_x + 1).saturating_sub(1).max(x0);
    let y1 = to_cell(to.y, options.line_height, max_y);
    let mid_x = to_cell(path.mid_x(), options.cell_width, max_x).clamp(x0, x1);

    ((x0, y0), (x1, y1), mid_x)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
