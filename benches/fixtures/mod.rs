// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use sidelink::model::{AnnotatedDocument, Category, ComparisonSource, ContentBlock, DocumentId};

const WORDS: [&str; 12] = [
    "attachment", "the", "study", "suggests", "observed", "infants", "that", "behaviour",
    "across", "cultures", "however", "sample",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeLongText,
    Uneven,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeLongText => "large_long_text",
            Self::Uneven => "uneven",
        }
    }

    pub const ALL: [Case; 4] = [Self::Small, Self::MediumDense, Self::LargeLongText, Self::Uneven];

    /// `(left blocks, right blocks, highlights per block, words between highlights)`
    fn shape(self) -> (usize, usize, usize, usize) {
        match self {
            Self::Small => (4, 4, 2, 6),
            Self::MediumDense => (24, 24, 8, 3),
            Self::LargeLongText => (120, 120, 3, 40),
            Self::Uneven => (60, 15, 4, 12),
        }
    }
}

fn words(seed: usize, count: usize) -> String {
    let mut out = String::new();
    for idx in 0..count {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(WORDS[(seed + idx * 7) % WORDS.len()]);
    }
    out
}

fn block(seed: usize, highlights: usize, gap: usize) -> ContentBlock {
    let mut builder = ContentBlock::builder();
    for idx in 0..highlights {
        let category = Category::ALL[(seed + idx) % Category::ALL.len()];
        builder = builder
            .text(&words(seed + idx, gap))
            .text(" ")
            .highlight(category, &words(seed * 3 + idx, 2 + idx % 3))
            .text(" ");
    }
    builder.text(&words(seed + 1, gap)).text(".").build()
}

fn document(id: &str, seed: usize, blocks: usize, highlights: usize, gap: usize) -> AnnotatedDocument {
    let blocks = (0..blocks).map(|idx| block(seed + idx, highlights, gap)).collect();
    AnnotatedDocument::new(DocumentId::new(id).expect("valid id"), blocks)
}

pub fn fixture(case: Case) -> ComparisonSource {
    let (left, right, highlights, gap) = case.shape();
    ComparisonSource::new(
        document("merit", 0, left, highlights, gap).with_title("Merit answer"),
        document("distinction", 5, right, highlights, gap).with_title("Distinction answer"),
    )
}

/// The fixture as a static page with one section per document.
pub fn page(case: Case) -> String {
    let source = fixture(case);
    let mut out = String::from("<!DOCTYPE html>\n<html><body>\n");
    for doc in [&source.left, &source.right] {
        out.push_str("<section id=\"");
        out.push_str(doc.id().as_str());
        out.push_str("\">\n<h2>");
        out.push_str(doc.label());
        out.push_str("</h2>\n<div class=\"example-text\">\n");
        for block in doc.blocks() {
            out.push_str("<p>");
            out.push_str(block.markup());
            out.push_str("</p>\n");
        }
        out.push_str("</div>\n</section>\n");
    }
    out.push_str("</body></html>\n");
    out
}

pub fn checksum_source(source: &ComparisonSource) -> u64 {
    let mut acc = 0u64;
    for doc in [&source.left, &source.right] {
        acc = acc.wrapping_mul(131).wrapping_add(doc.id().as_str().len() as u64);
        for block in doc.blocks() {
            acc = acc.wrapping_mul(131).wrapping_add(block.text().len() as u64);
            for span in block.spans() {
                acc = acc
                    .wrapping_mul(131)
                    .wrapping_add(span.category().index() as u64)
                    .wrapping_add(span.len() as u64);
            }
        }
    }
    acc
}
