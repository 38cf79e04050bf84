use std::path::Path;

use word_core::dict::normalize_word;
use word_core::frequency;
use word_core::matcher::{MatchEngine, SearchQuery};

use super::dict_ops::read_word_set;

pub fn search(word_file: &str, query: &SearchQuery) {
    let words = die!(read_word_set(Path::new(word_file)), "Error: {}");
    let results = die!(MatchEngine::new(&words).search(query), "Error: {}");
    for word in &results {
        println!("{word}");
    }
    eprintln!("{} result(s)", results.len());
}

pub fn hooks(word_file: &str, word: &str) {
    let words = die!(read_word_set(Path::new(word_file)), "Error: {}");
    let hooks = MatchEngine::new(&words).hooks(word);
    let front: String = hooks.front.iter().collect();
    let back: String = hooks.back.iter().collect();
    println!("front: {front}");
    println!("back:  {back}");
}

pub fn anagrams(word_file: &str, word: &str, limit: usize) {
    let words = die!(read_word_set(Path::new(word_file)), "Error: {}");
    for anagram in MatchEngine::new(&words).word_anagrams(word, limit) {
        println!("{anagram}");
    }
}

pub fn score(word: &str) {
    let Some(word) = normalize_word(word) else {
        eprintln!("Error: {word:?} is not a 2-15 letter A-Z word");
        std::process::exit(1);
    };
    let record = frequency::score(&word);
    let json = die!(serde_json::to_string_pretty(&record), "Error: {}");
    println!("{word}\n{json}");
}
