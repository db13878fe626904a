// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::document::AnnotatedDocument;

const CLASS_PREFIX: &str = "highlight-";

/// Pedagogical feature marked by an annotation span.
///
/// The set is closed. [`Category::ALL`] is the iteration order used wherever output must be
/// deterministic (connector drawing, summaries, exports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Weakness,
    Example,
    Method,
    Ethics,
    Evaluation,
    Application,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Strength,
        Category::Weakness,
        Category::Example,
        Category::Method,
        Category::Ethics,
        Category::Evaluation,
        Category::Application,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Weakness => "weakness",
            Self::Example => "example",
            Self::Method => "method",
            Self::Ethics => "ethics",
            Self::Evaluation => "evaluation",
            Self::Application => "application",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// CSS class carried by highlight elements of this category (`highlight-strength`, ...).
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Strength => "highlight-strength",
            Self::Weakness => "highlight-weakness",
            Self::Example => "highlight-example",
            Self::Method => "highlight-method",
            Self::Ethics => "highlight-ethics",
            Self::Evaluation => "highlight-evaluation",
            Self::Application => "highlight-application",
        }
    }

    /// Parses a single class token like `highlight-method`.
    ///
    /// Returns `None` for tokens without the prefix and for unknown suffixes
    /// (`highlight-tooltip` is a common non-category token).
    pub fn from_class_name(token: &str) -> Option<Self> {
        token.strip_prefix(CLASS_PREFIX).and_then(|rest| rest.parse().ok())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError { value: s.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    value: String,
}

impl ParseCategoryError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown annotation category: {}", self.value)
    }
}

impl std::error::Error for ParseCategoryError {}

/// Number of annotation spans per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts([usize; 7]);

impl CategoryCounts {
    pub fn from_document(doc: &AnnotatedDocument) -> Self {
        let mut counts = Self::default();
        for span in doc.blocks().iter().flat_map(|block| block.spans()) {
            counts.0[span.category().index()] += 1;
        }
        counts
    }

    pub fn get(&self, category: Category) -> usize {
        self.0[category.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|category| (category, self.get(category)))
    }
}
