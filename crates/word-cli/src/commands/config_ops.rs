use std::fs;

use word_core::settings::{self, Settings};

/// `--settings` file if given, else the embedded defaults.
pub fn load_settings(file: Option<&str>) -> Settings {
    match file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            die!(settings::parse_settings_toml(&content), "Error in {file}: {}")
        }
        None => Settings::default(),
    }
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: source.url={}, source.max_attempts={}, cache.max_age_hours={}, frequency.chunk_size={}",
        s.source.url, s.source.max_attempts, s.cache.max_age_hours, s.frequency.chunk_size
    );
}
