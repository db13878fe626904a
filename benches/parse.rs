// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sidelink::format::{parse_comparison, to_json_pretty, MarkupReader};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `format.parse_page`, `format.parse_json`
// - Case IDs (the string after the `/`) come from `fixtures::Case::id` and must stay stable so
//   results remain comparable over time.
fn benches_parse(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("format.parse_page");
        let reader = MarkupReader::new().expect("reader");

        for case in fixtures::Case::ALL {
            let page = fixtures::page(case);
            group.throughput(Throughput::Bytes(page.len() as u64));
            let reader = reader.clone();
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let source = reader
                        .extract_comparison(black_box(&page), "merit", "distinction")
                        .expect("extract_comparison");
                    black_box(fixtures::checksum_source(&source))
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("format.parse_json");

        for case in fixtures::Case::ALL {
            let json = to_json_pretty(&fixtures::fixture(case)).expect("to_json_pretty");
            group.throughput(Throughput::Bytes(json.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let source = parse_comparison(black_box(&json)).expect("parse_comparison");
                    black_box(fixtures::checksum_source(&source))
                })
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_parse
}
criterion_main!(benches);
