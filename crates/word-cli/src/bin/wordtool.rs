use std::path::PathBuf;

use clap::{Parser, Subcommand};

use word_cli::commands::{config_ops, dict_ops, search_ops};
use word_cli::logging;
use word_core::matcher::{SearchQuery, SortOrder};

#[derive(Parser)]
#[command(name = "wordtool", about = "Word list and word search tool")]
struct Cli {
    /// Settings TOML file (default: embedded settings)
    #[arg(long, global = true)]
    settings: Option<String>,

    /// Write JSONL traces to <DIR>/wordtool-trace.jsonl instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    trace_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the configured word list, normalized, one word per line
    Fetch {
        /// Output file
        output_file: String,
    },
    /// Encode a word list into a compressed payload
    Compress {
        /// Word list (text or payload)
        input_file: String,
        /// Output payload file
        output_file: String,
    },
    /// Decode a compressed payload back to one word per line
    Decompress {
        /// Payload file
        input_file: String,
        /// Output file (default: stdout)
        output_file: Option<String>,
    },
    /// Anagram, pattern or filter search
    Search {
        /// Word list (text or payload)
        word_file: String,
        /// Rack letters; '?' or '*' is a blank
        #[arg(long)]
        letters: Option<String>,
        /// Fixed-length mask; '_', '?' or '.' matches any letter
        #[arg(long)]
        pattern: Option<String>,
        /// Accept words shorter than the rack
        #[arg(long)]
        partial: bool,
        /// Allowed word lengths, comma separated
        #[arg(long, value_delimiter = ',')]
        lengths: Vec<usize>,
        #[arg(long)]
        starts_with: Option<String>,
        #[arg(long)]
        ends_with: Option<String>,
        #[arg(long)]
        contains: Option<String>,
        /// Letters that must all appear somewhere in the word
        #[arg(long)]
        contains_all: Option<String>,
        /// Words with Q but no U
        #[arg(long)]
        q_without_u: bool,
        #[arg(long)]
        no_vowels: bool,
        /// More than 60% vowels
        #[arg(long)]
        vowel_heavy: bool,
        /// Longest words first
        #[arg(long)]
        desc: bool,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Front and back hooks of a word
    Hooks {
        /// Word list (text or payload)
        word_file: String,
        word: String,
    },
    /// Other words with the same letters
    Anagrams {
        /// Word list (text or payload)
        word_file: String,
        word: String,
        /// Maximum number of results (default: search.word_anagram_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the frequency record of a word
    Score { word: String },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _trace_guard = match logging::init(cli.trace_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: cannot open trace file: {e}");
            std::process::exit(1);
        }
    };
    let settings = config_ops::load_settings(cli.settings.as_deref());

    match cli.command {
        Command::Fetch { output_file } => dict_ops::fetch(&settings, &output_file),
        Command::Compress {
            input_file,
            output_file,
        } => dict_ops::compress(&input_file, &output_file),
        Command::Decompress {
            input_file,
            output_file,
        } => dict_ops::decompress(&input_file, output_file.as_deref()),
        Command::Search {
            word_file,
            letters,
            pattern,
            partial,
            lengths,
            starts_with,
            ends_with,
            contains,
            contains_all,
            q_without_u,
            no_vowels,
            vowel_heavy,
            desc,
            limit,
        } => {
            let query = SearchQuery {
                letters,
                pattern,
                allow_partial: partial,
                selected_lengths: lengths.into_iter().collect(),
                starts_with,
                ends_with,
                contains,
                contains_all,
                q_without_u,
                no_vowels,
                is_vowel_heavy: vowel_heavy,
                sort_order: if desc { SortOrder::Desc } else { SortOrder::Asc },
                limit,
            };
            search_ops::search(&word_file, &query);
        }
        Command::Hooks { word_file, word } => search_ops::hooks(&word_file, &word),
        Command::Anagrams {
            word_file,
            word,
            limit,
        } => search_ops::anagrams(
            &word_file,
            &word,
            limit.unwrap_or(settings.search.word_anagram_limit),
        ),
        Command::Score { word } => search_ops::score(&word),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
