use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 15;

/// Trim, uppercase and validate a raw word-list line.
///
/// Returns `None` for empty lines, words outside
/// `MIN_WORD_LEN..=MAX_WORD_LEN`, and words with characters other than A–Z.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_ascii_uppercase();
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) {
        return None;
    }
    if !word.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    Some(word)
}

/// Sorted-letter signature identifying a word's anagram class.
pub fn alphagram(word: &str) -> String {
    let mut bytes = word.as_bytes().to_vec();
    bytes.sort_unstable();
    // Sorting ASCII bytes keeps the string valid UTF-8.
    String::from_utf8(bytes).unwrap_or_default()
}

/// Immutable, deduplicated dictionary.
///
/// Words are kept in lexicographic order so every scan is deterministic.
/// Membership is a hash lookup; the alphagram index maps each anagram class
/// to positions in `words`.
#[derive(Clone, Default)]
pub struct WordSet {
    words: Vec<Arc<str>>,
    members: HashSet<Arc<str>>,
    by_alphagram: HashMap<Box<str>, Vec<u32>>,
}

impl WordSet {
    /// Build from raw lines, normalizing each one and dropping invalid words.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_normalized(
            lines
                .into_iter()
                .filter_map(|line| normalize_word(line.as_ref())),
        )
    }

    /// Parse a newline-delimited word-list resource.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Build from words that already passed [`normalize_word`].
    pub(crate) fn from_normalized(words: impl IntoIterator<Item = String>) -> Self {
        let mut sorted: Vec<String> = words.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let words: Vec<Arc<str>> = sorted.into_iter().map(Arc::from).collect();
        let members: HashSet<Arc<str>> = words.iter().cloned().collect();

        let mut by_alphagram: HashMap<Box<str>, Vec<u32>> = HashMap::new();
        for (i, word) in words.iter().enumerate() {
            by_alphagram
                .entry(alphagram(word).into_boxed_str())
                .or_default()
                .push(i as u32);
        }

        Self {
            words,
            members,
            by_alphagram,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate members in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|w| &**w)
    }

    /// Members whose alphagram equals `signature`, in lexicographic order.
    pub fn anagram_class(&self, signature: &str) -> impl Iterator<Item = &str> + '_ {
        self.by_alphagram
            .get(signature)
            .into_iter()
            .flatten()
            .map(|&i| &*self.words[i as usize])
    }

    /// Returns (word_count, anagram_class_count).
    pub fn stats(&self) -> (usize, usize) {
        (self.words.len(), self.by_alphagram.len())
    }
}

impl PartialEq for WordSet {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for WordSet {}

impl std::fmt::Debug for WordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordSet")
            .field("len", &self.words.len())
            .field("classes", &self.by_alphagram.len())
            .finish()
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_lines(iter)
    }
}
