//! Heuristic commonness scoring.
//!
//! `score` is a pure function of the word's letters and length plus the
//! curated lists in [`tables`]. Each rule adjusts a running score that is
//! only clamped once, after every rule has been applied.

pub mod tables;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dict::{frame, unframe, CodecError, WordSet};
use tables::{
    HIGH_FREQUENCY_PATTERNS, HIGH_FREQUENCY_WORDS, HIGH_POINT_LETTERS, LETTER_POINTS,
    LOW_FREQUENCY_PATTERNS, MEDIUM_FREQUENCY_PATTERNS, SHORT_GAME_WORDS, VOWELS,
};

const MAGIC: &[u8; 4] = b"WSFQ";
const VERSION: u8 = 1;

const BASE_FREQUENCY: i32 = 50;
const BASE_GAME_FREQUENCY: i32 = 30;
const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Common,
    Uncommon,
    Rare,
    Expert,
}

impl Difficulty {
    pub fn from_frequency(frequency: u8) -> Self {
        if frequency >= 70 {
            Self::Common
        } else if frequency >= 50 {
            Self::Uncommon
        } else if frequency >= 25 {
            Self::Rare
        } else {
            Self::Expert
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyRecord {
    /// 1–100, higher is more common.
    pub frequency: u8,
    /// 1–100, estimated appearance rate in tournament play.
    pub game_frequency: u8,
    pub difficulty: Difficulty,
    pub scrabble_score: u32,
    pub length: u8,
}

/// Score a word, including the curated-list overrides.
pub fn score(word: &str) -> FrequencyRecord {
    apply_overrides(word, &base_record(word))
}

/// Heuristic record before curated-list overrides.
pub fn base_record(word: &str) -> FrequencyRecord {
    let bytes = word.as_bytes();
    let len = bytes.len();
    let mut frequency = BASE_FREQUENCY;
    let mut game_frequency = BASE_GAME_FREQUENCY;

    // Bands are checked in order; the first match wins.
    let (df, dg) = if len <= 4 {
        (30, 40)
    } else if len <= 6 {
        (20, 20)
    } else if len <= 8 {
        (10, 10)
    } else if len >= 12 {
        (-30, -20)
    } else {
        (0, 0)
    };
    frequency += df;
    game_frequency += dg;

    for (patterns, df, dg) in [
        (HIGH_FREQUENCY_PATTERNS, 15, 10),
        (MEDIUM_FREQUENCY_PATTERNS, 8, 5),
        (LOW_FREQUENCY_PATTERNS, -10, -5),
    ] {
        let hits = patterns.iter().filter(|p| word.contains(*p)).count() as i32;
        frequency += df * hits;
        game_frequency += dg * hits;
    }

    if len > 0 {
        let vowels = bytes.iter().filter(|&&b| VOWELS.contains(&b)).count();
        let ratio = vowels as f64 / len as f64;
        if ratio > 0.6 {
            frequency -= 15;
        } else if ratio < 0.2 {
            frequency -= 20;
        }
    }

    let heavy = bytes
        .iter()
        .filter(|&&b| HIGH_POINT_LETTERS.contains(&b))
        .count() as i32;
    frequency -= 20 * heavy;
    game_frequency -= 15 * heavy;

    let frequency = clamp_score(frequency);
    FrequencyRecord {
        frequency,
        game_frequency: clamp_score(game_frequency),
        difficulty: Difficulty::from_frequency(frequency),
        scrabble_score: scrabble_score(word),
        length: len.min(u8::MAX as usize) as u8,
    }
}

/// Apply curated-list boosts to a base record.
///
/// Pure in `base`, so repeating it over the same base record gives the same
/// capped result.
pub fn apply_overrides(word: &str, base: &FrequencyRecord) -> FrequencyRecord {
    let mut record = *base;
    if HIGH_FREQUENCY_WORDS.contains(&word) {
        record.frequency = boost(base.frequency, 30);
        record.game_frequency = boost(base.game_frequency, 20);
        record.difficulty = Difficulty::Common;
    } else if SHORT_GAME_WORDS.contains(&word) {
        record.frequency = boost(base.frequency, 25);
        record.game_frequency = boost(base.game_frequency, 35);
        if matches!(base.difficulty, Difficulty::Rare | Difficulty::Expert) {
            record.difficulty = Difficulty::Uncommon;
        }
    }
    record
}

/// Sum of standard tile values; non-letters score zero.
pub fn scrabble_score(word: &str) -> u32 {
    word.bytes()
        .filter(|b| b.is_ascii_uppercase())
        .map(|b| LETTER_POINTS[(b - b'A') as usize])
        .sum()
}

fn clamp_score(value: i32) -> u8 {
    value.clamp(1, MAX_SCORE) as u8
}

fn boost(value: u8, by: i32) -> u8 {
    (value as i32 + by).min(MAX_SCORE) as u8
}

/// Frequency records for every word of a `WordSet`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    records: HashMap<Box<str>, FrequencyRecord>,
}

impl FrequencyTable {
    /// Score every word, `chunk_size` words at a time, yielding the thread
    /// between chunks so a shared host is not starved during a full build.
    pub fn build(words: &WordSet, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        let mut records = HashMap::with_capacity(words.len());
        let mut done = 0usize;
        let mut iter = words.iter().peekable();
        while iter.peek().is_some() {
            for word in iter.by_ref().take(chunk_size) {
                records.insert(Box::from(word), score(word));
                done += 1;
            }
            tracing::debug!(done, total = words.len(), "frequency chunk scored");
            std::thread::yield_now();
        }
        Self { records }
    }

    pub fn get(&self, word: &str) -> Option<&FrequencyRecord> {
        self.records.get(word)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize records in `words` iteration order (the order the word codec
    /// writes entries in).
    pub fn to_bytes(&self, words: &WordSet) -> Result<Vec<u8>, CodecError> {
        let ordered: Vec<FrequencyRecord> = words
            .iter()
            .map(|w| self.records.get(w).copied().unwrap_or_else(|| score(w)))
            .collect();
        let body = bincode::serialize(&ordered).map_err(CodecError::Serialize)?;
        Ok(frame(MAGIC, VERSION, &body))
    }

    /// Restore a table written by [`FrequencyTable::to_bytes`] for the same words.
    pub fn from_bytes(data: &[u8], words: &WordSet) -> Result<Self, CodecError> {
        let body = unframe(data, MAGIC, VERSION)?;
        let ordered: Vec<FrequencyRecord> =
            bincode::deserialize(body).map_err(CodecError::Deserialize)?;
        if ordered.len() != words.len() {
            return Err(CodecError::LengthMismatch {
                words: words.len(),
                records: ordered.len(),
            });
        }
        let mut records = HashMap::with_capacity(ordered.len());
        for (word, record) in words.iter().zip(ordered) {
            if record.length as usize != word.len() {
                return Err(CodecError::InvalidWord(word.to_string()));
            }
            records.insert(Box::from(word), record);
        }
        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests;
