// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reader for annotated study pages.
//!
//! Understands just enough HTML to pull paragraphs out of a page section: tags, attributes,
//! comments, raw-text elements and the common character references. Each `<p>` becomes a
//! [`ContentBlock`] whose markup is the verbatim inner HTML and whose plain text is what a reader
//! sees, with whitespace collapsed and tooltip content left out. Elements carrying a
//! `highlight-<category>` class become annotation spans over that plain text.

use std::fmt;
use std::ops::Range;

use memchr::{memchr, memmem};
use regex::Regex;
use tracing::{debug, warn};

use crate::model::{
    AnnotatedDocument, AnnotationSpan, Category, ComparisonSource, ContentBlock, DocumentId,
    IdError,
};

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const TOOLTIP_CLASS: &str = "highlight-tooltip";
const BODY_CLASS: &str = "example-text";

#[derive(Debug, Clone, PartialEq)]
pub enum MarkupError {
    UnterminatedTag { offset: usize },
    UnterminatedComment { offset: usize },
    MismatchedClose {
        expected: Option<String>,
        found: String,
        offset: usize,
    },
    SectionNotFound { key: String },
    InvalidKey { key: String, source: IdError },
    Pattern(regex::Error),
}

impl MarkupError {
    fn shifted(self, base: usize) -> Self {
        match self {
            Self::UnterminatedTag { offset } => Self::UnterminatedTag {
                offset: offset + base,
            },
            Self::UnterminatedComment { offset } => Self::UnterminatedComment {
                offset: offset + base,
            },
            Self::MismatchedClose {
                expected,
                found,
                offset,
            } => Self::MismatchedClose {
                expected,
                found,
                offset: offset + base,
            },
            other => other,
        }
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedTag { offset } => write!(f, "unterminated tag at byte {offset}"),
            Self::UnterminatedComment { offset } => {
                write!(f, "unterminated comment at byte {offset}")
            }
            Self::MismatchedClose {
                expected: Some(expected),
                found,
                offset,
            } => write!(f, "closing </{found}> at byte {offset} does not match open <{expected}>"),
            Self::MismatchedClose {
                expected: None,
                found,
                offset,
            } => write!(f, "closing </{found}> at byte {offset} has no open element"),
            Self::SectionNotFound { key } => write!(f, "no element with id \"{key}\""),
            Self::InvalidKey { key, source } => write!(f, "invalid document key {key:?}: {source}"),
            Self::Pattern(err) => write!(f, "attribute pattern: {err}"),
        }
    }
}

impl std::error::Error for MarkupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidKey { source, .. } => Some(source),
            Self::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

/// Parses every `<p>` in `fragment` into a block.
pub fn parse_blocks(fragment: &str) -> Result<Vec<ContentBlock>, MarkupError> {
    MarkupReader::new()?.parse_blocks(fragment)
}

/// Reads the paragraphs of `#<key> .example-text` from a full page.
pub fn extract_document(page: &str, key: &str) -> Result<AnnotatedDocument, MarkupError> {
    MarkupReader::new()?.extract_document(page, key)
}

#[derive(Debug, Clone)]
pub struct MarkupReader {
    attribute: Regex,
}

impl MarkupReader {
    pub fn new() -> Result<Self, MarkupError> {
        let attribute = Regex::new(
            r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )
        .map_err(MarkupError::Pattern)?;
        Ok(Self { attribute })
    }

    pub fn parse_blocks(&self, fragment: &str) -> Result<Vec<ContentBlock>, MarkupError> {
        self.parse_blocks_at(fragment, 0)
    }

    pub fn extract_document(&self, page: &str, key: &str) -> Result<AnnotatedDocument, MarkupError> {
        let id = DocumentId::new(key).map_err(|source| MarkupError::InvalidKey {
            key: key.to_owned(),
            source,
        })?;

        let section = self
            .find_element(page, |_, attrs| self.attribute(attrs, "id").as_deref() == Some(key))?
            .ok_or_else(|| MarkupError::SectionNotFound {
                key: key.to_owned(),
            })?;

        let section_src = &page[section.clone()];
        let body = self
            .find_element(section_src, |_, attrs| self.has_class(attrs, BODY_CLASS))
            .map_err(|err| err.shifted(section.start))?
            .map(|inner| (section.start + inner.start)..(section.start + inner.end))
            .unwrap_or_else(|| {
                debug!(key, "no .{BODY_CLASS} inside section; reading the whole section");
                section.clone()
            });

        let blocks = self.parse_blocks_at(&page[body.clone()], body.start)?;
        if blocks.is_empty() {
            warn!(key, "section has no paragraphs");
        }

        let title = self
            .find_element(section_src, |name, _| matches!(name, "h1" | "h2" | "h3"))
            .map_err(|err| err.shifted(section.start))?
            .map(|heading| plain_text(&section_src[heading]))
            .filter(|title| !title.is_empty());

        let doc = AnnotatedDocument::new(id, blocks);
        Ok(match title {
            Some(title) => doc.with_title(title),
            None => doc,
        })
    }

    /// Both documents of a comparison from one page.
    pub fn extract_comparison(
        &self,
        page: &str,
        left_key: &str,
        right_key: &str,
    ) -> Result<ComparisonSource, MarkupError> {
        Ok(ComparisonSource::new(
            self.extract_document(page, left_key)?,
            self.extract_document(page, right_key)?,
        ))
    }

    fn parse_blocks_at(&self, src: &str, base: usize) -> Result<Vec<ContentBlock>, MarkupError> {
        let mut tokens = Tokenizer::new(src);
        let mut stack = Vec::<Frame>::new();
        let mut block = None::<BlockState>;
        let mut blocks = Vec::new();

        while let Some(token) = tokens.next_token().map_err(|err| err.shifted(base))? {
            match token.kind {
                TokenKind::Text => {
                    if let Some(state) = block.as_mut() {
                        state.push_text(&src[token.start..token.end]);
                    }
                }
                TokenKind::Open {
                    name,
                    attrs,
                    self_closing,
                } => {
                    if name == "p" {
                        if let Some(pos) = stack.iter().rposition(|f| f.kind == FrameKind::Block) {
                            for frame in stack.drain(pos..).rev() {
                                close_frame(frame, &mut block, &mut blocks, src, token.start);
                            }
                        }
                        if !self_closing {
                            stack.push(Frame {
                                name,
                                kind: FrameKind::Block,
                            });
                            block = Some(BlockState::new(token.end));
                        }
                        continue;
                    }

                    if self_closing || is_void(&name) {
                        let Some(state) = block.as_mut() else {
                            continue;
                        };
                        if name == "br" {
                            state.push_text(" ");
                        }
                        // A highlighted `<img>` still counts as a highlight.
                        let kind = self.open_inline(attrs, state);
                        close_frame(Frame { name, kind }, &mut block, &mut blocks, src, token.end);
                        continue;
                    }

                    let kind = match block.as_mut() {
                        Some(state) => self.open_inline(attrs, state),
                        None => FrameKind::Plain,
                    };
                    stack.push(Frame { name, kind });
                }
                TokenKind::Close { name } => {
                    let Some(pos) = stack.iter().rposition(|frame| frame.name == name) else {
                        if is_void(&name) {
                            continue;
                        }
                        return Err(MarkupError::MismatchedClose {
                            expected: stack.last().map(|frame| frame.name.clone()),
                            found: name,
                            offset: base + token.start,
                        });
                    };
                    for frame in stack.drain(pos..).rev() {
                        close_frame(frame, &mut block, &mut blocks, src, token.start);
                    }
                }
            }
        }

        for frame in stack.drain(..).rev() {
            close_frame(frame, &mut block, &mut blocks, src, src.len());
        }

        Ok(blocks)
    }

    fn open_inline(&self, attrs: &str, state: &mut BlockState) -> FrameKind {
        if state.tooltip_depth > 0 {
            return FrameKind::Plain;
        }
        let Some(class) = self.attribute(attrs, "class") else {
            return FrameKind::Plain;
        };

        let mut tokens = class.split_ascii_whitespace();
        if tokens.clone().any(|token| token == TOOLTIP_CLASS) {
            state.tooltip_depth += 1;
            return FrameKind::Tooltip;
        }
        match tokens.find_map(Category::from_class_name) {
            Some(category) => FrameKind::Span {
                slot: state.open_span(category),
            },
            None => FrameKind::Plain,
        }
    }

    /// Value of attribute `wanted` (case-insensitive name) with references decoded.
    fn attribute(&self, attrs: &str, wanted: &str) -> Option<String> {
        self.attribute
            .captures_iter(attrs)
            .find(|caps| caps.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case(wanted)))
            .map(|caps| {
                let raw = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());
                let mut out = String::with_capacity(raw.len());
                decode_references(raw, |ch| out.push(ch));
                out
            })
    }

    fn has_class(&self, attrs: &str, class: &str) -> bool {
        self.attribute(attrs, "class")
            .is_some_and(|value| value.split_ascii_whitespace().any(|token| token == class))
    }

    /// Inner byte range of the first element matching `pred`, or `None`.
    ///
    /// An element left open runs to the end of `src`.
    fn find_element(
        &self,
        src: &str,
        pred: impl Fn(&str, &str) -> bool,
    ) -> Result<Option<Range<usize>>, MarkupError> {
        struct Found {
            name: String,
            inner_start: usize,
            depth: usize,
        }

        let mut tokens = Tokenizer::new(src);
        let mut target = None::<Found>;

        while let Some(token) = tokens.next_token()? {
            match token.kind {
                TokenKind::Open {
                    name,
                    attrs,
                    self_closing,
                } => {
                    if self_closing || is_void(&name) {
                        continue;
                    }
                    match target.as_mut() {
                        Some(found) => {
                            if found.name == name {
                                found.depth += 1;
                            }
                        }
                        None => {
                            if pred(&name, attrs) {
                                target = Some(Found {
                                    name,
                                    inner_start: token.end,
                                    depth: 0,
                                });
                            }
                        }
                    }
                }
                TokenKind::Close { name } => {
                    if let Some(found) = target.as_mut() {
                        if found.name == name {
                            if found.depth == 0 {
                                return Ok(Some(found.inner_start..token.start));
                            }
                            found.depth -= 1;
                        }
                    }
                }
                TokenKind::Text => {}
            }
        }

        Ok(target.map(|found| found.inner_start..src.len()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Block,
    Span { slot: usize },
    Tooltip,
    Plain,
}

#[derive(Debug)]
struct Frame {
    name: String,
    kind: FrameKind,
}

fn close_frame(
    frame: Frame,
    block: &mut Option<BlockState>,
    blocks: &mut Vec<ContentBlock>,
    src: &str,
    end: usize,
) {
    match frame.kind {
        FrameKind::Block => {
            if let Some(state) = block.take() {
                blocks.push(state.finish(src, end));
            }
        }
        FrameKind::Span { slot } => {
            if let Some(state) = block.as_mut() {
                state.close_span(slot);
            }
        }
        FrameKind::Tooltip => {
            if let Some(state) = block.as_mut() {
                state.tooltip_depth = state.tooltip_depth.saturating_sub(1);
            }
        }
        FrameKind::Plain => {}
    }
}

/// Plain text of one paragraph under construction.
#[derive(Debug)]
struct BlockState {
    inner_start: usize,
    text: String,
    len: usize,
    pending_space: bool,
    tooltip_depth: usize,
    spans: Vec<AnnotationSpan>,
}

impl BlockState {
    fn new(inner_start: usize) -> Self {
        Self {
            inner_start,
            text: String::new(),
            len: 0,
            pending_space: false,
            tooltip_depth: 0,
            spans: Vec::new(),
        }
    }

    fn push_text(&mut self, raw: &str) {
        if self.tooltip_depth > 0 {
            return;
        }
        decode_references(raw, |ch| self.push_char(ch));
    }

    /// Collapses whitespace runs to one space and drops leading/trailing whitespace.
    fn push_char(&mut self, ch: char) {
        if ch.is_whitespace() {
            self.pending_space = self.len > 0;
            return;
        }
        if self.pending_space {
            self.text.push(' ');
            self.len += 1;
            self.pending_space = false;
        }
        self.text.push(ch);
        self.len += 1;
    }

    /// Index the next visible char will get.
    fn next_char_index(&self) -> usize {
        self.len + usize::from(self.pending_space)
    }

    /// Reserves the span's slot at its opening tag, so spans stay in element order even
    /// when one ends up with no visible text.
    fn open_span(&mut self, category: Category) -> usize {
        let start = self.next_char_index();
        self.spans.push(AnnotationSpan::new(category, start, start));
        self.spans.len() - 1
    }

    /// An element without visible text keeps a zero-length span at its position.
    fn close_span(&mut self, slot: usize) {
        let Some(span) = self.spans.get_mut(slot) else {
            return;
        };
        let start = span.start().min(self.len);
        *span = AnnotationSpan::new(span.category(), start, self.len);
    }

    fn finish(self, src: &str, end: usize) -> ContentBlock {
        let end = end.max(self.inner_start);
        ContentBlock::new(&src[self.inner_start..end], self.text, self.spans)
    }
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Visible text of a markup snippet, whitespace collapsed.
fn plain_text(src: &str) -> String {
    let mut state = BlockState::new(0);
    let mut tokens = Tokenizer::new(src);
    while let Ok(Some(token)) = tokens.next_token() {
        if token.kind == TokenKind::Text {
            state.push_text(&src[token.start..token.end]);
        }
    }
    state.text
}

/// Decodes `&amp;`-style references, feeding chars to `emit`. Unknown references pass through.
fn decode_references(raw: &str, mut emit: impl FnMut(char)) {
    let bytes = raw.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(amp) = memchr(b'&', &bytes[pos..]).map(|idx| pos + idx) else {
            raw[pos..].chars().for_each(&mut emit);
            return;
        };
        raw[pos..amp].chars().for_each(&mut emit);

        let decoded = memchr(b';', &bytes[amp..bytes.len().min(amp + 12)])
            .and_then(|semi| reference_char(&raw[amp + 1..amp + semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                emit(ch);
                pos = amp + semi + 1;
            }
            None => {
                emit('&');
                pos = amp + 1;
            }
        }
    }
}

fn reference_char(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "hellip" => Some('\u{2026}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind<'a> {
    Text,
    Open {
        name: String,
        attrs: &'a str,
        self_closing: bool,
    },
    Close {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'a> {
    start: usize,
    end: usize,
    kind: TokenKind<'a>,
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    raw_text_end: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_text_end: None,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, MarkupError> {
        let bytes = self.src.as_bytes();
        loop {
            let start = self.pos;
            if start >= bytes.len() {
                return Ok(None);
            }

            if let Some(closing) = self.raw_text_end.take() {
                let end = memmem::find(&bytes[start..], closing.as_bytes())
                    .map_or(bytes.len(), |idx| start + idx);
                self.pos = end;
                if end > start {
                    return Ok(Some(self.text(start, end)));
                }
                continue;
            }

            if bytes[start] != b'<' {
                let end = memchr(b'<', &bytes[start..]).map_or(bytes.len(), |idx| start + idx);
                self.pos = end;
                return Ok(Some(self.text(start, end)));
            }

            let rest = &bytes[start..];
            if rest.starts_with(b"<!--") {
                let close = memmem::find(&rest[4..], b"-->")
                    .ok_or(MarkupError::UnterminatedComment { offset: start })?;
                self.pos = start + 4 + close + 3;
                continue;
            }
            if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
                let close =
                    memchr(b'>', rest).ok_or(MarkupError::UnterminatedTag { offset: start })?;
                self.pos = start + close + 1;
                continue;
            }

            let is_close = rest.get(1) == Some(&b'/');
            let name_start = start + 1 + usize::from(is_close);
            if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
                // A bare `<` in prose.
                let end =
                    memchr(b'<', &bytes[start + 1..]).map_or(bytes.len(), |idx| start + 1 + idx);
                self.pos = end;
                return Ok(Some(self.text(start, end)));
            }

            let tag_end = find_tag_end(bytes, name_start)
                .ok_or(MarkupError::UnterminatedTag { offset: start })?;
            let name_end = bytes[name_start..tag_end]
                .iter()
                .position(|b| b.is_ascii_whitespace() || *b == b'/')
                .map_or(tag_end, |idx| name_start + idx);
            let name = self.src[name_start..name_end].to_ascii_lowercase();
            self.pos = tag_end + 1;

            if is_close {
                return Ok(Some(Token {
                    start,
                    end: self.pos,
                    kind: TokenKind::Close { name },
                }));
            }

            let inner = self.src[name_end..tag_end].trim_end();
            let self_closing = inner.ends_with('/');
            let attrs = inner.trim_end_matches('/');
            if !self_closing {
                self.raw_text_end = match name.as_str() {
                    "script" => Some("</script"),
                    "style" => Some("</style"),
                    _ => None,
                };
            }

            return Ok(Some(Token {
                start,
                end: self.pos,
                kind: TokenKind::Open {
                    name,
                    attrs,
                    self_closing,
                },
            }));
        }
    }

    fn text(&self, start: usize, end: usize) -> Token<'a> {
        Token {
            start,
            end,
            kind: TokenKind::Text,
        }
    }
}

/// Position of the `>` closing a tag, skipping quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None::<u8>;
    for (idx, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(idx),
            None => {}
        }
    }
    None
}
