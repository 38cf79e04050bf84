use proptest::prelude::*;

use crate::dict::{decode, encode, CodecError, CompressedWords, Entry, WordSet};

fn sample_set() -> WordSet {
    let mut words: Vec<String> = Vec::new();
    // Enough UN- and -ING words to clear the support threshold.
    for stem in [
        "ABLE", "BOLT", "CLEAR", "DONE", "EASY", "FAIR", "GIRD", "HOOK", "IRON", "JAM", "KIND",
        "LOCK", "MASK",
    ] {
        words.push(format!("UN{stem}"));
    }
    for stem in [
        "SING", "RING", "BRING", "WALK", "TALK", "JUMP", "PLAY", "READ", "LOOK", "COOK", "BAK",
        "HAT", "PARK",
    ] {
        words.push(format!("{stem}ING"));
    }
    words.extend(["THE", "AND", "ZEBRA", "QUIZ", "RE"].map(String::from));
    WordSet::from_lines(words)
}

#[test]
fn test_roundtrip_sample() {
    let set = sample_set();
    let bytes = encode(&set).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, set);
}

#[test]
fn test_roundtrip_empty() {
    let set = WordSet::default();
    let decoded = decode(&encode(&set).unwrap()).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_tables_require_support() {
    let compressed = CompressedWords::build(&sample_set());
    assert!(compressed.prefixes.contains(&"UN".to_string()));
    assert!(compressed.suffixes.contains(&"ING".to_string()));
    // "RE" only prefixes a couple of words.
    assert!(!compressed.prefixes.contains(&"RE".to_string()));
    assert!(compressed.prefixes.len() <= 20);
    assert!(compressed.suffixes.len() <= 20);
}

#[test]
fn test_entry_priority() {
    let compressed = CompressedWords::build(&sample_set());
    let un = compressed.prefixes.iter().position(|p| p == "UN").unwrap() as u8;
    let ing = compressed.suffixes.iter().position(|s| s == "ING").unwrap() as u8;

    let entry_for = |word: &str| {
        let set = sample_set();
        let pos = set.iter().position(|w| w == word).unwrap();
        compressed.entries[pos].clone()
    };

    assert!(matches!(entry_for("THE"), Entry::Common(_)));
    assert_eq!(entry_for("UNABLE"), Entry::Prefix(un, "ABLE".into()));
    assert_eq!(entry_for("WALKING"), Entry::Suffix("WALK".into(), ing));
    assert_eq!(entry_for("ZEBRA"), Entry::Literal("ZEBRA".into()));
}

#[test]
fn test_prefix_wins_over_suffix() {
    let compressed = CompressedWords::build(&sample_set());
    let set = sample_set();
    // UNSING matches both UN- and -ING; the prefix table is consulted first.
    let mut words: Vec<String> = set.iter().map(String::from).collect();
    words.push("UNSING".into());
    let set = WordSet::from_lines(words);
    let rebuilt = CompressedWords::build(&set);
    let pos = set.iter().position(|w| w == "UNSING").unwrap();
    assert!(matches!(rebuilt.entries[pos], Entry::Prefix(_, _)));
    assert_eq!(rebuilt.prefixes, compressed.prefixes);
}

#[test]
fn test_decode_truncated() {
    let bytes = encode(&sample_set()).unwrap();
    let err = decode(&bytes[..bytes.len() - 3]).unwrap_err();
    assert!(matches!(err, CodecError::Checksum { .. }));
    assert!(matches!(decode(&bytes[..4]), Err(CodecError::InvalidHeader)));
}

#[test]
fn test_decode_bad_magic() {
    let mut bytes = encode(&sample_set()).unwrap();
    bytes[0] = b'X';
    assert!(matches!(
        decode(&bytes),
        Err(CodecError::InvalidMagic { .. })
    ));
}

#[test]
fn test_decode_bad_version() {
    let mut bytes = encode(&sample_set()).unwrap();
    bytes[4] = 99;
    assert!(matches!(
        decode(&bytes),
        Err(CodecError::UnsupportedVersion(99))
    ));
}

#[test]
fn test_decode_table_index_out_of_range() {
    let compressed = CompressedWords {
        prefixes: vec!["UN".into()],
        suffixes: vec![],
        entries: vec![Entry::Suffix("WALK".into(), 3)],
    };
    let bytes = compressed.to_bytes().unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(CodecError::TableIndex { table: "suffix", index: 3, len: 0 })
    ));
}

#[test]
fn test_decode_rejects_invalid_word() {
    let compressed = CompressedWords {
        prefixes: vec![],
        suffixes: vec![],
        entries: vec![Entry::Literal("lowercase".into())],
    };
    let bytes = compressed.to_bytes().unwrap();
    assert!(matches!(decode(&bytes), Err(CodecError::InvalidWord(_))));
}

proptest! {
    #[test]
    fn prop_roundtrip(words in prop::collection::vec("[A-Z]{2,15}", 0..300)) {
        let set = WordSet::from_lines(&words);
        let decoded = decode(&encode(&set).unwrap()).unwrap();
        prop_assert_eq!(decoded, set);
    }

    #[test]
    fn prop_roundtrip_affix_heavy(
        stems in prop::collection::vec("[A-Z]{1,8}", 0..120),
    ) {
        let words: Vec<String> = stems
            .iter()
            .flat_map(|s| [format!("UN{s}"), format!("{s}ING"), format!("RE{s}S")])
            .collect();
        let set = WordSet::from_lines(&words);
        let decoded = decode(&encode(&set).unwrap()).unwrap();
        prop_assert_eq!(decoded, set);
    }
}
