// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::DocumentId;

/// A tagged character range inside a block's plain text.
///
/// `start..end` counts `char`s, not bytes, so it lines up with cell-based layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSpan {
    category: Category,
    start: usize,
    end: usize,
}

impl AnnotationSpan {
    pub fn new(category: Category, start: usize, end: usize) -> Self {
        Self { category, start, end }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One paragraph of a document.
///
/// `markup` is the rendered inner markup and is treated as opaque: layouts copy it verbatim.
/// `text` is the plain text the spans index into. Spans are kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    markup: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    spans: Vec<AnnotationSpan>,
}

impl ContentBlock {
    pub fn new(
        markup: impl Into<String>,
        text: impl Into<String>,
        mut spans: Vec<AnnotationSpan>,
    ) -> Self {
        // Stable: spans sharing a start keep the order they were given in.
        spans.sort_by_key(|span| span.start);
        Self {
            markup: markup.into(),
            text: text.into(),
            spans,
        }
    }

    pub fn builder() -> BlockBuilder {
        BlockBuilder::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[AnnotationSpan] {
        &self.spans
    }

    /// Spans of one category in document order, paired with their index in [`Self::spans`].
    pub fn spans_of(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (usize, &AnnotationSpan)> + '_ {
        self.spans.iter().enumerate().filter(move |(_, span)| span.category == category)
    }

    pub fn validate(&self) -> Result<(), BlockError> {
        let text_len = self.text.chars().count();
        for (idx, span) in self.spans.iter().enumerate() {
            if span.start > span.end || span.end > text_len {
                return Err(BlockError::SpanOutOfRange {
                    span: idx,
                    start: span.start,
                    end: span.end,
                    text_len,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    SpanOutOfRange {
        span: usize,
        start: usize,
        end: usize,
        text_len: usize,
    },
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpanOutOfRange {
                span,
                start,
                end,
                text_len,
            } => write!(
                f,
                "span #{span} range {start}..{end} does not fit text of length {text_len}"
            ),
        }
    }
}

impl std::error::Error for BlockError {}

/// Builds a block from plain and highlighted segments, producing matching markup.
#[derive(Debug, Default, Clone)]
pub struct BlockBuilder {
    markup: String,
    text: String,
    text_len: usize,
    spans: Vec<AnnotationSpan>,
}

impl BlockBuilder {
    pub fn text(mut self, text: &str) -> Self {
        self.markup.push_str(&escape_html(text));
        self.push_text(text);
        self
    }

    pub fn highlight(mut self, category: Category, text: &str) -> Self {
        let start = self.text_len;
        self.markup.push_str("<span class=\"highlight ");
        self.markup.push_str(category.class_name());
        self.markup.push_str("\">");
        self.markup.push_str(&escape_html(text));
        self.markup.push_str("</span>");
        self.push_text(text);
        self.spans.push(AnnotationSpan::new(category, start, self.text_len));
        self
    }

    pub fn build(self) -> ContentBlock {
        ContentBlock::new(self.markup, self.text, self.spans)
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.text_len += text.chars().count();
    }
}

/// An ordered sequence of blocks identified by a document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    blocks: Vec<ContentBlock>,
}

impl AnnotatedDocument {
    pub fn new(id: DocumentId, blocks: Vec<ContentBlock>) -> Self {
        Self {
            id,
            title: None,
            blocks,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title if set, document key otherwise.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.id.as_str())
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// The two documents shown in the comparison view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSource {
    pub left: AnnotatedDocument,
    pub right: AnnotatedDocument,
}

impl ComparisonSource {
    pub fn new(left: AnnotatedDocument, right: AnnotatedDocument) -> Self {
        Self { left, right }
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
