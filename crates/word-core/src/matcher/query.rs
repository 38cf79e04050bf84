use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dict::{MAX_WORD_LEN, MIN_WORD_LEN};

/// Rack characters standing for a blank tile.
pub const BLANK_MARKERS: &[char] = &['?', '*'];
/// Mask characters matching any letter.
pub const MASK_WILDCARDS: &[char] = &['_', '?', '.'];

pub(crate) fn is_blank(c: char) -> bool {
    BLANK_MARKERS.contains(&c)
}

pub(crate) fn is_wildcard(c: char) -> bool {
    MASK_WILDCARDS.contains(&c)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid rack character {0:?} (expected A-Z, '?' or '*')")]
    InvalidRackChar(char),

    #[error("invalid pattern character {0:?} (expected A-Z, '_', '?' or '.')")]
    InvalidPatternChar(char),

    #[error("pattern length {0} outside 2..=15")]
    PatternLength(usize),

    #[error("word length {0} outside 2..=15")]
    LengthOutOfRange(usize),

    #[error("{field} must contain only letters A-Z, got {value:?}")]
    InvalidFilter { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One search request.
///
/// `letters` alone is an anagram query, `pattern` a mask query (with
/// `letters` as its pool), and neither a plain filter over the dictionary.
/// Empty strings and an empty `selected_lengths` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub letters: Option<String>,
    pub pattern: Option<String>,
    /// Anagram queries only: accept words shorter than the rack.
    pub allow_partial: bool,
    pub selected_lengths: BTreeSet<usize>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub contains: Option<String>,
    /// Every letter must appear somewhere in the word.
    pub contains_all: Option<String>,
    pub q_without_u: bool,
    pub no_vowels: bool,
    pub is_vowel_heavy: bool,
    pub sort_order: SortOrder,
    /// Truncate after sorting.
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn builder() -> SearchQueryBuilder {
        SearchQueryBuilder::default()
    }

    /// Trimmed, uppercased and validated copy of this query.
    pub fn normalized(&self) -> Result<Self, QueryError> {
        let letters = clean(&self.letters);
        if let Some(rack) = &letters {
            if let Some(c) = rack.chars().find(|&c| !c.is_ascii_uppercase() && !is_blank(c)) {
                return Err(QueryError::InvalidRackChar(c));
            }
        }

        let pattern = clean(&self.pattern);
        if let Some(mask) = &pattern {
            if let Some(c) = mask.chars().find(|&c| !c.is_ascii_uppercase() && !is_wildcard(c)) {
                return Err(QueryError::InvalidPatternChar(c));
            }
            if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&mask.len()) {
                return Err(QueryError::PatternLength(mask.len()));
            }
        }

        if let Some(&n) = self
            .selected_lengths
            .iter()
            .find(|n| !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(*n))
        {
            return Err(QueryError::LengthOutOfRange(n));
        }

        Ok(Self {
            letters,
            pattern,
            allow_partial: self.allow_partial,
            selected_lengths: self.selected_lengths.clone(),
            starts_with: letters_only("startsWith", &self.starts_with)?,
            ends_with: letters_only("endsWith", &self.ends_with)?,
            contains: letters_only("contains", &self.contains)?,
            contains_all: letters_only("containsAll", &self.contains_all)?,
            q_without_u: self.q_without_u,
            no_vowels: self.no_vowels,
            is_vowel_heavy: self.is_vowel_heavy,
            sort_order: self.sort_order,
            limit: self.limit,
        })
    }
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_ascii_uppercase())
        .filter(|v| !v.is_empty())
}

fn letters_only(field: &'static str, value: &Option<String>) -> Result<Option<String>, QueryError> {
    match clean(value) {
        Some(v) if !v.bytes().all(|b| b.is_ascii_uppercase()) => {
            Err(QueryError::InvalidFilter { field, value: v })
        }
        other => Ok(other),
    }
}

/// Builds a validated [`SearchQuery`].
#[derive(Debug, Default)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    pub fn letters(mut self, rack: impl Into<String>) -> Self {
        self.query.letters = Some(rack.into());
        self
    }

    pub fn pattern(mut self, mask: impl Into<String>) -> Self {
        self.query.pattern = Some(mask.into());
        self
    }

    pub fn allow_partial(mut self, yes: bool) -> Self {
        self.query.allow_partial = yes;
        self
    }

    pub fn lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.query.selected_lengths.extend(lengths);
        self
    }

    pub fn starts_with(mut self, s: impl Into<String>) -> Self {
        self.query.starts_with = Some(s.into());
        self
    }

    pub fn ends_with(mut self, s: impl Into<String>) -> Self {
        self.query.ends_with = Some(s.into());
        self
    }

    pub fn contains(mut self, s: impl Into<String>) -> Self {
        self.query.contains = Some(s.into());
        self
    }

    pub fn contains_all(mut self, s: impl Into<String>) -> Self {
        self.query.contains_all = Some(s.into());
        self
    }

    pub fn q_without_u(mut self, yes: bool) -> Self {
        self.query.q_without_u = yes;
        self
    }

    pub fn no_vowels(mut self, yes: bool) -> Self {
        self.query.no_vowels = yes;
        self
    }

    pub fn vowel_heavy(mut self, yes: bool) -> Self {
        self.query.is_vowel_heavy = yes;
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.query.sort_order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<SearchQuery, QueryError> {
        self.query.normalized()
    }
}
