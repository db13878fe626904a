// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON form of a comparison.
//!
//! ```json
//! { "left":  { "id": "merit", "title": "Merit", "blocks": [ { "markup": "...", "text": "...",
//!              "spans": [ { "category": "strength", "start": 10, "end": 25 } ] } ] },
//!   "right": { "id": "distinction", "blocks": [] } }
//! ```
//!
//! Loading validates every block, so span ranges can be trusted downstream.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::{AnnotatedDocument, BlockError, ComparisonSource};

#[derive(Debug)]
pub enum JsonError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    InvalidBlock {
        document: String,
        block: usize,
        source: BlockError,
    },
}

impl JsonError {
    fn at(self, path: &Path) -> Self {
        match self {
            Self::Json { path: None, source } => Self::Json {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json {
                path: Some(path),
                source,
            } => write!(f, "{}: {source}", path.display()),
            Self::Json { path: None, source } => write!(f, "json: {source}"),
            Self::InvalidBlock {
                document,
                block,
                source,
            } => write!(f, "document {document} block #{block}: {source}"),
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidBlock { source, .. } => Some(source),
        }
    }
}

pub fn parse_comparison(json: &str) -> Result<ComparisonSource, JsonError> {
    let source: ComparisonSource =
        serde_json::from_str(json).map_err(|source| JsonError::Json { path: None, source })?;
    validate_document(&source.left)?;
    validate_document(&source.right)?;
    Ok(source)
}

pub fn parse_document(json: &str) -> Result<AnnotatedDocument, JsonError> {
    let doc: AnnotatedDocument =
        serde_json::from_str(json).map_err(|source| JsonError::Json { path: None, source })?;
    validate_document(&doc)?;
    Ok(doc)
}

pub fn to_json_pretty(source: &ComparisonSource) -> Result<String, JsonError> {
    serde_json::to_string_pretty(source).map_err(|source| JsonError::Json { path: None, source })
}

pub fn load_document(path: &Path) -> Result<AnnotatedDocument, JsonError> {
    let raw = read(path)?;
    parse_document(&raw).map_err(|err| err.at(path))
}

pub fn load_comparison(path: &Path) -> Result<ComparisonSource, JsonError> {
    let raw = read(path)?;
    let source = parse_comparison(&raw).map_err(|err| err.at(path))?;
    info!(
        path = %path.display(),
        left = source.left.len(),
        right = source.right.len(),
        "loaded comparison"
    );
    Ok(source)
}

/// Writes next to `path` and renames into place, so readers never see a partial file.
pub fn save_comparison(path: &Path, source: &ComparisonSource) -> Result<(), JsonError> {
    let mut contents = to_json_pretty(source)?;
    contents.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents.as_bytes()).map_err(|source| JsonError::Io {
        path: tmp.clone(),
        source,
    })?;
    rename_overwrite(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        JsonError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn read(path: &Path) -> Result<String, JsonError> {
    fs::read_to_string(path).map_err(|source| JsonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_document(doc: &AnnotatedDocument) -> Result<(), JsonError> {
    for (block, content) in doc.blocks().iter().enumerate() {
        content.validate().map_err(|source| JsonError::InvalidBlock {
            document: doc.id().to_string(),
            block,
            source,
        })?;
    }
    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
