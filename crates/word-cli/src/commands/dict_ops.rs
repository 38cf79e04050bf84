use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use word_core::dict::{self, CompressedWords, WordSet};
use word_core::loader::{HttpSource, WordSource};
use word_core::settings::Settings;

/// Read a word list that is either plain text or an encoded payload.
pub fn read_word_set(path: &Path) -> Result<WordSet, String> {
    let bytes = fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    if let Ok(words) = dict::decode(&bytes) {
        return Ok(words);
    }
    let text = String::from_utf8(bytes)
        .map_err(|_| format!("{}: neither a word payload nor UTF-8 text", path.display()))?;
    Ok(WordSet::from_text(&text))
}

/// One word per line, in lexicographic order.
pub fn word_lines(words: &WordSet) -> String {
    let mut out = String::with_capacity(words.len() * 8);
    for word in words.iter() {
        let _ = writeln!(out, "{word}");
    }
    out
}

pub fn fetch(settings: &Settings, output_file: &str) {
    let source = HttpSource::new(
        &settings.source.url,
        Duration::from_millis(settings.source.timeout_ms),
    );
    eprintln!("Fetching {}...", source.describe());
    let text = die!(
        settings.retry_policy().run(move |_| source.fetch()),
        "Error fetching word list: {}"
    );

    let words = WordSet::from_text(&text);
    let (count, classes) = words.stats();
    die!(
        fs::write(output_file, word_lines(&words)),
        "Error writing {output_file}: {}"
    );
    eprintln!("Wrote {output_file}: {count} words, {classes} anagram classes");
}

pub fn compress(input_file: &str, output_file: &str) {
    let words = die!(read_word_set(Path::new(input_file)), "Error: {}");
    let compressed = CompressedWords::build(&words);
    let bytes = die!(compressed.to_bytes(), "Error encoding words: {}");
    die!(
        fs::write(output_file, &bytes),
        "Error writing {output_file}: {}"
    );

    let plain = word_lines(&words).len();
    eprintln!(
        "{} words, {} prefixes, {} suffixes",
        words.len(),
        compressed.prefixes.len(),
        compressed.suffixes.len()
    );
    eprintln!(
        "Wrote {output_file} ({} bytes, {:.1}% of {} plain)",
        bytes.len(),
        bytes.len() as f64 * 100.0 / plain.max(1) as f64,
        plain
    );
}

pub fn decompress(input_file: &str, output_file: Option<&str>) {
    let bytes = die!(fs::read(input_file), "Error reading {input_file}: {}");
    let words = die!(dict::decode(&bytes), "Error decoding {input_file}: {}");
    let text = word_lines(&words);
    match output_file {
        Some(out) => {
            die!(fs::write(out, text), "Error writing {out}: {}");
            eprintln!("Wrote {out}: {} words", words.len());
        }
        None => print!("{text}"),
    }
}
