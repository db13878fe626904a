// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Titles, footer, help and summary lines used by TUI rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::theme::TuiTheme;
use crate::layout::LayoutOptions;
use crate::model::Side;
use crate::ui::ViewMode;
use crate::view::SummaryLine;

const FOOTER_BRAND: &str = "sidelink";
const CATEGORY_COLUMN: usize = 12;
const COUNT_COLUMN: usize = 8;

pub(super) fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail.map(str::trim).filter(|tail| !tail.is_empty()) {
        title.push(' ');
        title.push_str(tail);
    }
    title.push(' ');
    title
}

pub(super) fn side_by_side_title(
    labels: Option<(&str, &str)>,
    connectors_enabled: bool,
    links: usize,
) -> String {
    let tail = match (labels, connectors_enabled) {
        (None, _) => String::new(),
        (Some((left, right)), true) => format!("{left} ⇄ {right} · {links} links"),
        (Some((left, right)), false) => format!("{left} ⇄ {right} · connectors off"),
    };
    view_title("Side by side", 's', Some(&tail))
}

/// Document labels placed over their columns.
pub(super) fn column_header(
    labels: (&str, &str),
    options: &LayoutOptions,
    style: Style,
) -> Line<'static> {
    let left = clip(labels.0, options.column_width);
    let pad = options.column_x(Side::Right).saturating_sub(left.chars().count());
    Line::from(vec![
        Span::styled(left, style),
        Span::raw(" ".repeat(pad)),
        Span::styled(clip(labels.1, options.column_width), style),
    ])
}

/// The analysis table: one line per category, counts per document and connector count.
pub(super) fn summary_lines(
    summary: &[SummaryLine],
    labels: (&str, &str),
    theme: &TuiTheme,
) -> Vec<Line<'static>> {
    let bold = theme.base_style().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<cat$}{:>num$}{:>num$}{:>num$}",
            "category",
            clip(labels.0, COUNT_COLUMN - 1),
            clip(labels.1, COUNT_COLUMN - 1),
            "links",
            cat = CATEGORY_COLUMN,
            num = COUNT_COLUMN,
        ),
        bold,
    ))];

    for line in summary {
        let name = format!("{:<cat$}", line.category.as_str(), cat = CATEGORY_COLUMN);
        let counts = format!(
            "{:>num$}{:>num$}{:>num$}",
            line.left,
            line.right,
            line.links,
            num = COUNT_COLUMN
        );
        lines.push(Line::from(vec![
            Span::styled(name, theme.highlight_style(line.category)),
            Span::styled(counts, theme.base_style()),
        ]));
    }

    let total = summary.iter().map(|line| line.links).sum::<usize>();
    lines.push(Line::default());
    lines.push(Line::from(format!(
        "{total} connectors in side-by-side view. Press s to open it."
    )));
    lines
}

pub(super) fn footer_line(
    mode: ViewMode,
    connectors_enabled: bool,
    toast: Option<&str>,
    theme: &TuiTheme,
) -> Line<'static> {
    let switch = match mode {
        ViewMode::Analysis => ("s", "side-by-side"),
        ViewMode::SideBySide => ("a", "analysis"),
    };
    let connectors = if connectors_enabled { "connectors: on" } else { "connectors: off" };
    let entries = [switch, ("c", connectors), ("j/k", "scroll"), ("?", "help"), ("q", "quit")];

    let mut spans = vec![Span::styled(
        format!("{FOOTER_BRAND} "),
        theme.base_style().add_modifier(Modifier::BOLD),
    )];
    for (key, label) in entries {
        spans.push(Span::styled(format!("[{key}]"), theme.footer_key_style()));
        spans.push(Span::styled(format!(" {label}  "), theme.footer_label_style()));
    }
    if let Some(toast) = toast {
        spans.push(Span::styled(toast.to_owned(), theme.error_style()));
    }
    Line::from(spans)
}

pub(super) fn help_lines() -> Vec<Line<'static>> {
    [
        "s / a / Tab   side-by-side / analysis / switch",
        "c             toggle connectors",
        "r             rebuild rows",
        "j k ↓ ↑       scroll one line",
        "wheel         scroll three lines",
        "PgDn PgUp     scroll one page",
        "g G           top / bottom",
        "?             close this help",
        "q Esc         quit",
    ]
    .into_iter()
    .map(Line::from)
    .collect()
}

/// A `width`×`height` rect centered in `area`, shrunk to fit.
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut out = text.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}
