use super::query::{is_blank, QueryError};

/// Multiset of rack letters plus a count of blank tiles.
///
/// `take` consumes the letter itself when available and falls back to a
/// blank, so a blank is only spent on letters the rack lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPool {
    counts: [u32; 26],
    blanks: u32,
}

impl LetterPool {
    /// Parse an uppercase rack. Blank markers count as wildcard tiles.
    pub fn parse(rack: &str) -> Result<Self, QueryError> {
        let mut pool = Self::default();
        for c in rack.chars() {
            if c.is_ascii_uppercase() {
                pool.counts[(c as u8 - b'A') as usize] += 1;
            } else if is_blank(c) {
                pool.blanks += 1;
            } else {
                return Err(QueryError::InvalidRackChar(c));
            }
        }
        Ok(pool)
    }

    /// Total tiles, blanks included.
    pub fn len(&self) -> usize {
        (self.counts.iter().sum::<u32>() + self.blanks) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn blanks(&self) -> u32 {
        self.blanks
    }

    pub fn count(&self, letter: u8) -> u32 {
        if letter.is_ascii_uppercase() {
            self.counts[(letter - b'A') as usize]
        } else {
            0
        }
    }

    /// Remove one `letter`, or one blank in its place.
    pub fn take(&mut self, letter: u8) -> bool {
        if !letter.is_ascii_uppercase() {
            return false;
        }
        let slot = &mut self.counts[(letter - b'A') as usize];
        if *slot > 0 {
            *slot -= 1;
            true
        } else if self.blanks > 0 {
            self.blanks -= 1;
            true
        } else {
            false
        }
    }

    /// Remove every letter of `letters`; `false` as soon as one is missing.
    /// The pool may be partly consumed on failure.
    pub fn take_all(&mut self, letters: impl IntoIterator<Item = u8>) -> bool {
        letters.into_iter().all(|b| self.take(b))
    }

    /// Whether `word` can be spelled from this pool.
    pub fn can_build(&self, word: &str) -> bool {
        if word.len() > self.len() {
            return false;
        }
        self.clone().take_all(word.bytes())
    }
}
