//! Curated tables feeding the frequency heuristic.

/// Substrings typical of everyday vocabulary.
pub const HIGH_FREQUENCY_PATTERNS: &[&str] = &["ING", "ED", "ER", "LY", "TION", "EST", "ES", "RE"];

pub const MEDIUM_FREQUENCY_PATTERNS: &[&str] =
    &["UN", "IN", "ABLE", "NESS", "MENT", "FUL", "OUS", "IVE", "AL", "IST"];

/// Letter clusters that mostly show up in obscure or borrowed words.
pub const LOW_FREQUENCY_PATTERNS: &[&str] =
    &["PH", "XY", "ZZ", "KH", "AE", "OE", "YX", "CZ", "UU", "WK"];

pub const HIGH_FREQUENCY_WORDS: &[&str] = &[
    "THE", "BE", "TO", "OF", "AND", "IN", "THAT", "HAVE", "IT", "FOR", "NOT", "ON", "WITH", "HE",
    "AS", "YOU", "DO", "AT", "THIS", "BUT", "HIS", "BY", "FROM", "THEY", "WE", "SAY", "HER",
    "SHE", "OR", "AN", "WILL", "MY", "ONE", "ALL", "WOULD", "THERE", "THEIR", "WHAT", "SO", "UP",
    "OUT", "IF", "ABOUT", "WHO", "GET", "WHICH", "GO", "ME", "WHEN", "MAKE", "CAN", "LIKE",
    "TIME", "NO", "JUST", "HIM", "KNOW", "TAKE", "PEOPLE", "INTO", "YEAR", "YOUR", "GOOD", "SOME",
    "COULD", "THEM", "SEE", "OTHER", "THAN", "THEN", "NOW", "LOOK", "ONLY", "COME", "ITS", "OVER",
    "THINK", "ALSO", "BACK", "AFTER", "USE", "TWO", "HOW", "OUR", "WORK", "FIRST", "WELL", "WAY",
    "EVEN", "NEW", "WANT", "BECAUSE", "ANY", "THESE", "GIVE", "DAY", "MOST", "US",
];

/// Short words that carry a lot of weight in tournament play.
pub const SHORT_GAME_WORDS: &[&str] = &[
    "QI", "ZA", "XI", "XU", "JO", "KI", "KA", "OX", "AX", "EX", "ZO", "OE", "AA", "QAT", "QIS",
    "ZAS", "ZAX", "XIS", "JOE", "KOI", "ZEK", "ZOA", "ADZ", "CAZ", "FEZ", "WIZ", "JEU", "SUQ",
    "QOPH", "FAQIR", "TRANQ",
];

/// Letters that sharply reduce how often a word turns up in play.
pub const HIGH_POINT_LETTERS: &[u8] = b"JQXZ";

pub const VOWELS: &[u8] = b"AEIOU";

/// Standard English tile values, indexed by `letter - b'A'`.
pub const LETTER_POINTS: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];
