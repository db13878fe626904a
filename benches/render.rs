// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sidelink::layout::{build_rows, layout_columns, LayoutOptions, Viewport};
use sidelink::render::{
    draw_connectors, render_html_page, render_side_by_side_text, Overlay,
};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.rows`, `layout.columns`, `render.connectors`,
//   `render.text`, `render.html`
// - Case IDs (the string after the `/`) come from `fixtures::Case::id` and must stay stable so
//   results remain comparable over time.
fn benches_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout.rows");
    for case in fixtures::Case::ALL {
        let source = fixtures::fixture(case);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let rows = build_rows(black_box(&source.left), black_box(&source.right));
                black_box(rows.len())
            })
        });
    }
    group.finish();

    let options = LayoutOptions::default().fit_width(120);
    let viewport = Viewport::new(options.total_width(), 40);

    let mut group = c.benchmark_group("layout.columns");
    for case in fixtures::Case::ALL {
        let source = fixtures::fixture(case);
        let rows = build_rows(&source.left, &source.right);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let layout = layout_columns(black_box(&rows), options, viewport);
                black_box(layout.total_lines())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.connectors");
    for case in fixtures::Case::ALL {
        let source = fixtures::fixture(case);
        let rows = build_rows(&source.left, &source.right);
        let layout = layout_columns(&rows, options, viewport);
        group.bench_function(case.id(), move |b| {
            let mut overlay = Overlay::new();
            b.iter(|| {
                let drawn = draw_connectors(Some(black_box(&rows)), true, &layout, &mut overlay);
                black_box(drawn)
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.text");
    for case in fixtures::Case::ALL {
        let source = fixtures::fixture(case);
        let rows = build_rows(&source.left, &source.right);
        let layout = layout_columns(&rows, options, viewport);
        let mut overlay = Overlay::new();
        draw_connectors(Some(&rows), true, &layout, &mut overlay);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let text = render_side_by_side_text(black_box(&layout), black_box(&overlay))
                    .expect("render_side_by_side_text");
                black_box(text.len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.html");
    for case in fixtures::Case::ALL {
        let source = fixtures::fixture(case);
        let rows = build_rows(&source.left, &source.right);
        let options = LayoutOptions::html();
        let layout = layout_columns(&rows, options, Viewport::new(options.total_width(), 40));
        let mut overlay = Overlay::new();
        draw_connectors(Some(&rows), true, &layout, &mut overlay);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let page = render_html_page(
                    black_box(&rows),
                    black_box(&layout),
                    black_box(&overlay),
                    ("Merit answer", "Distinction answer"),
                );
                black_box(page.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render
}
criterion_main!(benches);
