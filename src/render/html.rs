// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static HTML export.
//!
//! Cells carry the block markup verbatim, so highlight classes survive and the page stylesheet
//! colors them. The overlay is an absolutely positioned `<svg>` over the rows container.

use super::Overlay;
use crate::layout::{Cell, ColumnsLayout, RowLayout};
use crate::model::document::escape_html;
use crate::model::{Category, Side};

/// Stroke color per category, in [`Category::ALL`] order.
pub const CATEGORY_COLORS: [&str; 7] = [
    "#2e7d32", "#c62828", "#1565c0", "#6a1b9a", "#ef6c00", "#00838f", "#ad1457",
];

pub fn category_color(category: Category) -> &'static str {
    CATEGORY_COLORS[category.index()]
}

/// The rows container with its overlay, as an HTML fragment.
pub fn render_side_by_side_html(rows: &RowLayout, overlay: &Overlay) -> String {
    let mut out = String::with_capacity(256 + rows.len() * 512);
    let mut buf = itoa::Buffer::new();

    out.push_str(r#"<div class="sbs-rows" data-left=""#);
    out.push_str(&escape_html(rows.left_id().as_str()));
    out.push_str(r#"" data-right=""#);
    out.push_str(&escape_html(rows.right_id().as_str()));
    out.push_str("\">\n");

    for row in rows.rows() {
        out.push_str(r#"  <div class="sbs-row" data-row=""#);
        out.push_str(buf.format(row.index()));
        out.push_str("\">\n");
        for side in [Side::Left, Side::Right] {
            push_cell(&mut out, &mut buf, side, row.cell(side));
        }
        out.push_str("  </div>\n");
    }

    out.push_str("  ");
    out.push_str(&overlay.to_svg());
    out.push_str("\n</div>\n");
    out
}

fn push_cell(out: &mut String, buf: &mut itoa::Buffer, side: Side, cell: &Cell) {
    out.push_str("    <div class=\"sbs-cell");
    if cell.is_unmatched() {
        out.push_str(" unmatched");
    }
    out.push_str("\" data-side=\"");
    out.push_str(side.as_str());
    out.push('"');
    if let Some(ordinal) = cell.ordinal() {
        out.push_str(" data-ordinal=\"");
        out.push_str(buf.format(ordinal));
        out.push('"');
    }
    out.push('>');
    out.push_str(cell.markup());
    out.push_str("</div>\n");
}

/// A standalone page: stylesheet sized to `layout`'s metrics, headings, then the fragment.
///
/// Connector geometry in `overlay` must come from the same `layout`, otherwise paths will not
/// line up with the text.
pub fn render_html_page(
    rows: &RowLayout,
    layout: &ColumnsLayout,
    overlay: &Overlay,
    titles: (&str, &str),
) -> String {
    let options = layout.options();
    let mut buf = itoa::Buffer::new();
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>");
    out.push_str(&escape_html(titles.0));
    out.push_str(" vs ");
    out.push_str(&escape_html(titles.1));
    out.push_str("</title>\n<style>\n");
    out.push_str("body { font: 13px/");
    out.push_str(buf.format(options.line_height.round() as u64));
    out.push_str("px ui-monospace, monospace; margin: 1rem; }\n");
    out.push_str(".sbs-head, .sbs-row { display: grid; grid-template-columns: ");
    push_columns(&mut out, &mut buf, options.column_width, options.gutter_width);
    out.push_str("; }\n.sbs-head { font-weight: bold; }\n");
    out.push_str(".sbs-rows { position: relative; }\n");
    out.push_str(".sbs-row { margin-bottom: ");
    out.push_str(buf.format(options.row_gap));
    out.push_str("lh; }\n");
    out.push_str(".sbs-cell[data-side=\"right\"] { grid-column: 3; }\n");
    out.push_str(
        ".sbs-cell.unmatched { outline: 1px dashed #999; outline-offset: -1px; min-height: 1lh; }\n",
    );
    out.push_str(".highlight-tooltip { display: none; }\n");
    out.push_str(
        ".sbs-overlay { position: absolute; left: 0; top: 0; pointer-events: none; \
         overflow: visible; }\n",
    );
    out.push_str(".sbs-path { fill: none; stroke-width: 2; opacity: 0.8; }\n");
    for category in Category::ALL {
        let color = category_color(category);
        out.push('.');
        out.push_str(category.class_name());
        out.push_str(" { background: ");
        out.push_str(color);
        out.push_str("33; }\n.sbs-path.");
        out.push_str(category.as_str());
        out.push_str(" { stroke: ");
        out.push_str(color);
        out.push_str("; }\n");
    }
    out.push_str("</style>\n</head>\n<body>\n<div class=\"sbs-head\"><div>");
    out.push_str(&escape_html(titles.0));
    out.push_str("</div><div style=\"grid-column: 3\">");
    out.push_str(&escape_html(titles.1));
    out.push_str("</div></div>\n");
    out.push_str(&render_side_by_side_html(rows, overlay));
    out.push_str("</body>\n</html>\n");
    out
}

fn push_columns(out: &mut String, buf: &mut itoa::Buffer, column: usize, gutter: usize) {
    for (idx, width) in [column, gutter, column].into_iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(buf.format(width));
        out.push_str("ch");
    }
}
