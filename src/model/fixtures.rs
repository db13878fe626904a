// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use super::category::Category;
use super::document::{AnnotatedDocument, ContentBlock};
use super::ids::DocumentId;

fn doc(id: &str, blocks: Vec<ContentBlock>) -> AnnotatedDocument {
    AnnotatedDocument::new(DocumentId::new(id).expect("document id"), blocks)
}

fn single(category: Category, text: &str) -> ContentBlock {
    ContentBlock::builder().text("The essay ").highlight(category, text).text(".").build()
}

/// Block with `count` spans of one category separated by filler text.
pub(crate) fn repeated(category: Category, count: usize) -> ContentBlock {
    let mut builder = ContentBlock::builder();
    for idx in 0..count {
        if idx > 0 {
            builder = builder.text(" and ");
        }
        builder = builder.highlight(category, &format!("{category} {idx}"));
    }
    builder.build()
}

/// left=[P1(strength)], right=[Q1(strength), Q2(weakness)].
pub(crate) fn scenario_a() -> (AnnotatedDocument, AnnotatedDocument) {
    let left = doc("merit", vec![single(Category::Strength, "names the study")]);
    let right = doc(
        "distinction",
        vec![
            single(Category::Strength, "analyses the study"),
            single(Category::Weakness, "questions validity"),
        ],
    );
    (left, right)
}

/// left=[], right=[Q1].
pub(crate) fn scenario_b() -> (AnnotatedDocument, AnnotatedDocument) {
    let left = doc("merit", Vec::new());
    let right = doc("distinction", vec![single(Category::Ethics, "cites BPS guidance")]);
    (left, right)
}

/// left=[P1(example×2)], right=[Q1(example×1)].
pub(crate) fn scenario_c() -> (AnnotatedDocument, AnnotatedDocument) {
    let left = doc("merit", vec![repeated(Category::Example, 2)]);
    let right = doc("distinction", vec![repeated(Category::Example, 1)]);
    (left, right)
}

/// Two rows with every category represented at least once on both sides.
pub(crate) fn mixed_pair() -> (AnnotatedDocument, AnnotatedDocument) {
    let left = doc(
        "merit",
        vec![
            ContentBlock::builder()
                .highlight(Category::Method, "Interviews")
                .text(" were used; ")
                .highlight(Category::Ethics, "consent")
                .text(" was gained and ")
                .highlight(Category::Method, "a survey")
                .text(" followed.")
                .build(),
            ContentBlock::builder()
                .highlight(Category::Evaluation, "This matters")
                .text(" because it ")
                .highlight(Category::Application, "helps schools")
                .text(".")
                .build(),
        ],
    );
    let right = doc(
        "distinction",
        vec![
            ContentBlock::builder()
                .text("A ")
                .highlight(Category::Method, "semi-structured interview design")
                .text(" balanced depth with ")
                .highlight(Category::Ethics, "informed consent")
                .text(".")
                .build(),
            ContentBlock::builder()
                .highlight(Category::Application, "Policy makers")
                .text(" can act, though ")
                .highlight(Category::Evaluation, "generalisability is limited")
                .text(".")
                .build(),
        ],
    );
    (left, right)
}
