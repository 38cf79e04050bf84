//! Prefix/suffix compression for word lists.
//!
//! Each `encode` call measures which candidate affixes are common in the
//! corpus and ships the retained tables inside the payload. `decode` only
//! indexes into those tables, so the priority order used by `encode`
//! (common word, then prefix, then suffix, then literal; first table entry
//! wins) never has to be reproduced on the way back.

use serde::{Deserialize, Serialize};

use super::word_set::{normalize_word, WordSet};
use super::{frame, unframe, CodecError};

const MAGIC: &[u8; 4] = b"WSCX";
const VERSION: u8 = 1;

/// An affix must occur in more than this many words to be retained.
const MIN_SUPPORT: usize = 10;
const MAX_TABLE_LEN: usize = 20;

/// Very common words stored as an index into this list.
pub const COMMON_WORDS: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "ANY", "CAN", "HAD", "HER", "WAS",
    "ONE", "OUR", "OUT", "DAY", "GET", "HAS", "HIM", "HIS", "HOW", "MAN", "NEW", "NOW", "OLD",
    "SEE", "TWO", "WAY", "WHO", "BOY", "DID", "ITS", "LET", "PUT", "SAY", "SHE", "TOO", "USE",
    "THAT", "WITH", "HAVE", "THIS", "WILL", "YOUR", "FROM", "THEY", "KNOW", "WANT", "BEEN",
    "GOOD", "MUCH", "SOME", "TIME", "VERY", "WHEN", "COME", "HERE", "JUST", "LIKE", "LONG",
    "MAKE", "MANY", "OVER", "SUCH", "TAKE", "THAN", "THEM", "WELL", "WERE", "WHAT", "ABOUT",
    "THERE", "THEIR", "WHICH", "WOULD", "OTHER", "THESE", "FIRST", "COULD", "PEOPLE",
];

const CANDIDATE_PREFIXES: &[&str] = &[
    "UN", "RE", "IN", "DIS", "EN", "NON", "OVER", "MIS", "SUB", "PRE", "INTER", "FORE", "DE",
    "TRANS", "SUPER", "SEMI", "ANTI", "MID", "UNDER", "OUT", "IM", "IR", "IL", "CO", "EX",
    "PRO", "COUNTER", "MICRO", "MULTI", "POST",
];

const CANDIDATE_SUFFIXES: &[&str] = &[
    "S", "ES", "ED", "ING", "INGS", "LY", "ER", "ERS", "EST", "NESS", "MENT", "MENTS", "ABLE",
    "IBLE", "TION", "TIONS", "SION", "IST", "ISM", "IZE", "ISE", "FUL", "LESS", "OUS", "IVE",
    "AL", "IAL", "IC", "ITY", "ATE", "ATED",
];

/// One encoded word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    /// Index into [`COMMON_WORDS`].
    Common(u16),
    /// Index into the payload's prefix table, followed by the rest of the word.
    Prefix(u8, String),
    /// The word minus its suffix, followed by an index into the suffix table.
    Suffix(String, u8),
    Literal(String),
}

/// Decoded form of an encoded payload: the per-encode tables plus entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedWords {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub entries: Vec<Entry>,
}

impl CompressedWords {
    pub fn build(words: &WordSet) -> Self {
        let prefixes = retain_affixes(words, CANDIDATE_PREFIXES, |w, p| w.starts_with(p));
        let suffixes = retain_affixes(words, CANDIDATE_SUFFIXES, |w, s| w.ends_with(s));
        tracing::debug!(
            prefixes = prefixes.len(),
            suffixes = suffixes.len(),
            "codec tables retained"
        );

        let entries = words
            .iter()
            .map(|word| encode_word(word, &prefixes, &suffixes))
            .collect();

        Self {
            prefixes,
            suffixes,
            entries,
        }
    }

    /// Expand entries back to words, in encoded order.
    pub fn expand(&self) -> Result<Vec<String>, CodecError> {
        self.entries
            .iter()
            .map(|entry| {
                let word = match entry {
                    Entry::Common(i) => lookup(COMMON_WORDS, *i as usize, "common")?.to_string(),
                    Entry::Prefix(i, rest) => {
                        let prefix = lookup(&self.prefixes, *i as usize, "prefix")?;
                        format!("{prefix}{rest}")
                    }
                    Entry::Suffix(stem, i) => {
                        let suffix = lookup(&self.suffixes, *i as usize, "suffix")?;
                        format!("{stem}{suffix}")
                    }
                    Entry::Literal(word) => word.clone(),
                };
                // Reject anything the ingestion path would not have produced.
                match normalize_word(&word) {
                    Some(w) if w == word => Ok(word),
                    _ => Err(CodecError::InvalidWord(word)),
                }
            })
            .collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let body = bincode::serialize(self).map_err(CodecError::Serialize)?;
        Ok(frame(MAGIC, VERSION, &body))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let body = unframe(data, MAGIC, VERSION)?;
        bincode::deserialize(body).map_err(CodecError::Deserialize)
    }
}

/// Encode a word set into a self-describing compressed payload.
pub fn encode(words: &WordSet) -> Result<Vec<u8>, CodecError> {
    CompressedWords::build(words).to_bytes()
}

/// Decode a payload produced by [`encode`].
pub fn decode(data: &[u8]) -> Result<WordSet, CodecError> {
    let words = CompressedWords::from_bytes(data)?.expand()?;
    Ok(WordSet::from_normalized(words))
}

/// Keep candidates matched by more than `MIN_SUPPORT` words, most frequent
/// first (candidate order breaks ties), capped at `MAX_TABLE_LEN`.
fn retain_affixes(
    words: &WordSet,
    candidates: &[&str],
    matches: impl Fn(&str, &str) -> bool,
) -> Vec<String> {
    let mut counted: Vec<(&str, usize)> = candidates
        .iter()
        .map(|&affix| (affix, words.iter().filter(|&w| matches(w, affix)).count()))
        .filter(|&(_, count)| count > MIN_SUPPORT)
        .collect();
    // Stable sort keeps candidate order among equal counts.
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted
        .into_iter()
        .take(MAX_TABLE_LEN)
        .map(|(affix, _)| affix.to_string())
        .collect()
}

fn encode_word(word: &str, prefixes: &[String], suffixes: &[String]) -> Entry {
    if let Some(i) = COMMON_WORDS.iter().position(|&c| c == word) {
        return Entry::Common(i as u16);
    }
    if let Some(i) = prefixes.iter().position(|p| word.starts_with(p.as_str())) {
        return Entry::Prefix(i as u8, word[prefixes[i].len()..].to_string());
    }
    if let Some(i) = suffixes.iter().position(|s| word.ends_with(s.as_str())) {
        return Entry::Suffix(word[..word.len() - suffixes[i].len()].to_string(), i as u8);
    }
    Entry::Literal(word.to_string())
}

fn lookup<'a, T: AsRef<str>>(
    table: &'a [T],
    index: usize,
    name: &'static str,
) -> Result<&'a str, CodecError> {
    table
        .get(index)
        .map(|s| s.as_ref())
        .ok_or(CodecError::TableIndex {
            table: name,
            index,
            len: table.len(),
        })
}
