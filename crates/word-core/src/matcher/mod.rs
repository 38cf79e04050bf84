//! Anagram, pattern and hook queries over an immutable `WordSet`.
//!
//! Every query is a read-only scan (or an alphagram index lookup), so one
//! `WordSet` can serve any number of concurrent `MatchEngine`s.

mod pool;
mod query;

pub use pool::LetterPool;
pub use query::{
    QueryError, SearchQuery, SearchQueryBuilder, SortOrder, BLANK_MARKERS, MASK_WILDCARDS,
};

use serde::Serialize;

use crate::dict::{alphagram, WordSet, MAX_WORD_LEN, MIN_WORD_LEN};
use crate::frequency::tables::VOWELS;

pub const DEFAULT_WORD_ANAGRAM_LIMIT: usize = 20;

const VOWEL_HEAVY_RATIO: f64 = 0.6;

/// Single letters that extend a word into another dictionary word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hooks {
    pub front: Vec<char>,
    pub back: Vec<char>,
}

pub struct MatchEngine<'a> {
    words: &'a WordSet,
}

impl<'a> MatchEngine<'a> {
    pub fn new(words: &'a WordSet) -> Self {
        Self { words }
    }

    /// Run a query: match, filter, sort, then truncate to `limit`.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<String>, QueryError> {
        let query = query.normalized()?;
        let mut results = match (&query.pattern, &query.letters) {
            (Some(mask), letters) => {
                let pool = letters.as_deref().map(LetterPool::parse).transpose()?;
                self.pattern_matches(mask, pool.as_ref())
            }
            (None, Some(rack)) => {
                let pool = LetterPool::parse(rack)?;
                self.anagram_matches(rack, &pool, query.allow_partial)
            }
            (None, None) => self.words.iter().collect(),
        };

        results.retain(|word| passes_filters(word, &query));
        sort_words(&mut results, query.sort_order);
        if let Some(limit) = query.limit {
            results.truncate(limit);
        }
        Ok(results.into_iter().map(str::to_string).collect())
    }

    pub fn anagrams(&self, rack: &str, allow_partial: bool) -> Result<Vec<String>, QueryError> {
        self.search(&SearchQuery {
            letters: Some(rack.to_string()),
            allow_partial,
            ..SearchQuery::default()
        })
    }

    pub fn pattern(&self, mask: &str, pool: Option<&str>) -> Result<Vec<String>, QueryError> {
        self.search(&SearchQuery {
            pattern: Some(mask.to_string()),
            letters: pool.map(str::to_string),
            ..SearchQuery::default()
        })
    }

    /// Front and back hooks of `word`, each in A-Z order.
    pub fn hooks(&self, word: &str) -> Hooks {
        let word = word.trim().to_ascii_uppercase();
        let mut candidate = String::with_capacity(word.len() + 1);

        let front = (b'A'..=b'Z')
            .map(char::from)
            .filter(|&letter| {
                candidate.clear();
                candidate.push(letter);
                candidate.push_str(&word);
                self.words.contains(&candidate)
            })
            .collect();

        let back = (b'A'..=b'Z')
            .map(char::from)
            .filter(|&letter| {
                candidate.clear();
                candidate.push_str(&word);
                candidate.push(letter);
                self.words.contains(&candidate)
            })
            .collect();

        Hooks { front, back }
    }

    /// Other dictionary words with the same letters as `word`, sorted
    /// lexicographically and truncated to `limit`.
    pub fn word_anagrams(&self, word: &str, limit: usize) -> Vec<String> {
        let word = word.trim().to_ascii_uppercase();
        self.words
            .anagram_class(&alphagram(&word))
            .filter(|&w| w != word)
            .take(limit)
            .map(str::to_string)
            .collect()
    }

    fn anagram_matches(&self, rack: &str, pool: &LetterPool, allow_partial: bool) -> Vec<&'a str> {
        // Without blanks an exact match is precisely the rack's anagram class.
        if pool.blanks() == 0 && !allow_partial {
            return self.words.anagram_class(&alphagram(rack)).collect();
        }
        let size = pool.len();
        self.words
            .iter()
            .filter(|w| {
                if allow_partial {
                    w.len() <= size
                } else {
                    w.len() == size
                }
            })
            .filter(|w| pool.can_build(w))
            .collect()
    }

    fn pattern_matches(&self, mask: &str, pool: Option<&LetterPool>) -> Vec<&'a str> {
        let mask = mask.as_bytes();

        // The mask's fixed letters are the same for every candidate, so they
        // are taken from the pool once up front.
        let remaining = match pool {
            Some(pool) => {
                let mut pool = pool.clone();
                if !pool.take_all(mask.iter().copied().filter(u8::is_ascii_uppercase)) {
                    return Vec::new();
                }
                Some(pool)
            }
            None => None,
        };

        self.words
            .iter()
            .filter(|w| w.len() == mask.len())
            .filter(|w| {
                w.bytes()
                    .zip(mask)
                    .all(|(b, &m)| !m.is_ascii_uppercase() || b == m)
            })
            .filter(|w| match &remaining {
                None => true,
                Some(pool) => pool.clone().take_all(
                    w.bytes()
                        .zip(mask)
                        .filter(|(_, m)| !m.is_ascii_uppercase())
                        .map(|(b, _)| b),
                ),
            })
            .collect()
    }
}

fn passes_filters(word: &str, query: &SearchQuery) -> bool {
    let len = word.len();
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len) {
        return false;
    }
    if !query.selected_lengths.is_empty() && !query.selected_lengths.contains(&len) {
        return false;
    }
    if !query.starts_with.as_deref().map_or(true, |p| word.starts_with(p))
        || !query.ends_with.as_deref().map_or(true, |s| word.ends_with(s))
        || !query.contains.as_deref().map_or(true, |s| word.contains(s))
    {
        return false;
    }
    if let Some(letters) = &query.contains_all {
        if !letters.bytes().all(|b| word.as_bytes().contains(&b)) {
            return false;
        }
    }
    if query.q_without_u && !(word.contains('Q') && !word.contains('U')) {
        return false;
    }

    let vowels = word.bytes().filter(|b| VOWELS.contains(b)).count();
    if query.no_vowels && vowels > 0 {
        return false;
    }
    if query.is_vowel_heavy && vowels as f64 / len as f64 <= VOWEL_HEAVY_RATIO {
        return false;
    }
    true
}

/// Length in `order`, then lexicographic ascending within a length.
fn sort_words(words: &mut [&str], order: SortOrder) {
    words.sort_unstable_by(|a, b| {
        let by_len = a.len().cmp(&b.len());
        let by_len = match order {
            SortOrder::Asc => by_len,
            SortOrder::Desc => by_len.reverse(),
        };
        by_len.then_with(|| a.cmp(b))
    });
}
