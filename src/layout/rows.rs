// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{AnnotatedDocument, AnnotationSpan, ContentBlock, DocumentId, Side, SpanRef};

/// One side of a row: a copy of the source block, or an unmatched placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Block {
        /// Position of the block in its source document.
        ordinal: usize,
        block: ContentBlock,
    },
    Unmatched,
}

impl Cell {
    pub fn block(&self) -> Option<&ContentBlock> {
        match self {
            Self::Block { block, .. } => Some(block),
            Self::Unmatched => None,
        }
    }

    /// Position of the copied block in its source document.
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Self::Block { ordinal, .. } => Some(*ordinal),
            Self::Unmatched => None,
        }
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::Unmatched)
    }

    /// Verbatim markup of the copied block; empty for placeholders.
    pub fn markup(&self) -> &str {
        self.block().map(ContentBlock::markup).unwrap_or("")
    }

    pub fn spans(&self) -> &[AnnotationSpan] {
        self.block().map(ContentBlock::spans).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    index: usize,
    left: Cell,
    right: Cell,
}

impl Row {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn left(&self) -> &Cell {
        &self.left
    }

    pub fn right(&self) -> &Cell {
        &self.right
    }

    pub fn cell(&self, side: Side) -> &Cell {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// True when either side is a placeholder.
    pub fn is_unmatched(&self) -> bool {
        self.left.is_unmatched() || self.right.is_unmatched()
    }

    /// Every span in this row, left cell first, each in document order.
    pub fn span_refs(&self) -> impl Iterator<Item = (SpanRef, &AnnotationSpan)> + '_ {
        [Side::Left, Side::Right].into_iter().flat_map(move |side| {
            self.cell(side)
                .spans()
                .iter()
                .enumerate()
                .map(move |(idx, span)| (SpanRef::new(self.index, side, idx), span))
        })
    }
}

/// Row-aligned two-column layout built from a pair of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    left_id: DocumentId,
    right_id: DocumentId,
    rows: Vec<Row>,
}

impl RowLayout {
    pub fn left_id(&self) -> &DocumentId {
        &self.left_id
    }

    pub fn right_id(&self) -> &DocumentId {
        &self.right_id
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn span(&self, span_ref: SpanRef) -> Option<&AnnotationSpan> {
        self.row(span_ref.row())?.cell(span_ref.side()).spans().get(span_ref.span())
    }

    pub fn span_count(&self) -> usize {
        self.rows.iter().map(|row| row.left.spans().len() + row.right.spans().len()).sum()
    }
}

/// Pairs block `i` of `left` with block `i` of `right`.
///
/// Produces `max(left.len(), right.len())` rows. Blocks are cloned, so both documents stay
/// intact; the missing side of a short document becomes [`Cell::Unmatched`]. Calling this twice
/// on the same inputs yields equal layouts.
pub fn build_rows(left: &AnnotatedDocument, right: &AnnotatedDocument) -> RowLayout {
    let row_count = left.len().max(right.len());
    let rows = (0..row_count)
        .map(|index| Row {
            index,
            left: copy_cell(left, index),
            right: copy_cell(right, index),
        })
        .collect();

    RowLayout {
        left_id: left.id().clone(),
        right_id: right.id().clone(),
        rows,
    }
}

fn copy_cell(doc: &AnnotatedDocument, index: usize) -> Cell {
    match doc.blocks().get(index) {
        Some(block) => Cell::Block {
            ordinal: index,
            block: block.clone(),
        },
        None => Cell::Unmatched,
    }
}
