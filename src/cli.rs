//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::config::{KbConfig, DEFAULT_BOOKS_DIR, DEFAULT_RECORDS_PATH};
use crate::core::file_reader::EncodingStrategy;
use crate::core::render::{OutputFormat, RenderConfig};

/// kbase - binary-search lookups over a fixed-width catalog and phrase search over text documents.
#[derive(Parser, Debug)]
#[command(name = "kbase")]
#[command(
    author,
    version,
    about,
    long_about = r#"kbase answers two kinds of questions against a local knowledge base.

A catalog of fixed-width 200-byte records sorted by id is queried with binary
search (exact id or inclusive id range). A directory of .txt documents is
scanned for a phrase, where '.' in a phrase word matches any single character
and a phrase may span two consecutive lines.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- text: console layout with `----` separated blocks

Examples:
    kbase id 000005
    kbase range ID-000005 ID-000015 --format text
    kbase phrase "no nosso jardim" --books ./books
    kbase phrase "am.r"
    kbase stats --format md
"#
)]
pub struct Cli {
    /// Fixed-width catalog file.
    #[arg(
        long,
        global = true,
        env = "KBASE_RECORDS",
        default_value = DEFAULT_RECORDS_PATH,
        value_name = "FILE",
        long_help = "Fixed-width catalog file queried by `id`, `range` and `stats`.\n\n\
Each record occupies exactly 200 bytes (`ID-xxxxxx|title|author|description`\n\
padded with spaces) and records are sorted ascending by id."
    )]
    pub records: PathBuf,

    /// Directory of .txt documents.
    #[arg(
        long,
        global = true,
        env = "KBASE_BOOKS",
        default_value = DEFAULT_BOOKS_DIR,
        value_name = "DIR",
        long_help = "Directory of documents scanned by `phrase` and listed by `books`.\n\n\
Only files with a .txt extension directly inside this directory are considered,\n\
in file name order."
    )]
    pub books: PathBuf,

    /// Output format (jsonl/json/md/text).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- text\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// How documents with invalid UTF-8 are handled (strict/lossy).
    #[arg(
        long,
        global = true,
        default_value = "strict",
        value_name = "MODE",
        long_help = "How `phrase` treats documents that are not valid UTF-8.\n\n\
- strict (default): the document is skipped and reported as an error item\n\
- lossy: invalid sequences are replaced and the document is scanned"
    )]
    pub encoding: String,

    /// Load the whole catalog into memory before searching.
    #[arg(
        long,
        global = true,
        long_help = "Read the catalog into memory once instead of performing one positioned\n\
read per probe. Results are identical either way."
    )]
    pub preload: bool,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Colors are only used by the text format and only\n\
when stdout is a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. Results are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr, including every binary search probe.\n\n\
RUST_LOG, when set, takes precedence over -q and -v."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/text formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a single record by id.
    #[command(
        long_about = "Binary search the catalog for one id and emit the record, if any.\n\n\
The id may be given as `ID-000005`, `000005` or `5`; short numbers are\n\
zero-padded to six digits. An absent id produces an empty result.\n\n\
Examples:\n\
  kbase id ID-000005\n\
  kbase id 42 --format text\n"
    )]
    Id {
        /// Record id.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Look up every record with START <= id <= END.
    #[command(
        long_about = "Binary search the catalog for the first id >= START and the last id <= END,\n\
then emit every record in between in catalog order.\n\n\
Ids accept the same forms as `kbase id`. A START greater than END yields an\n\
empty result.\n\n\
Examples:\n\
  kbase range ID-000005 ID-000015\n\
  kbase range 1 100 --format md\n"
    )]
    Range {
        /// First id of the range (inclusive).
        #[arg(value_name = "START")]
        start: String,

        /// Last id of the range (inclusive).
        #[arg(value_name = "END")]
        end: String,
    },

    /// Search the documents for a phrase.
    #[command(
        long_about = r#"Normalize PHRASE (accents removed, lowercase, punctuation dropped) and find
every line, or pair of consecutive lines, whose words contain the phrase words
contiguously and in order.

A '.' inside a phrase word matches any single character; word lengths must
still agree. Documents that cannot be read are reported as error items and the
search continues.

Examples:
    kbase phrase "no nosso jardim havia flores"
    kbase phrase "am.r" --format text
    kbase phrase "Coração" --books ./library --encoding lossy
"#
    )]
    Phrase {
        /// Phrase to search for.
        #[arg(value_name = "PHRASE")]
        phrase: String,
    },

    /// List the documents a phrase search would scan.
    Books,

    /// Show catalog and document collection statistics.
    #[command(
        long_about = "Report the catalog file, number of records, size in bytes, record width,\n\
the maximum number of probes a lookup can take, and the number of documents\n\
available for phrase search."
    )]
    Stats,
}

impl Cli {
    /// Build the engine configuration from the global flags
    pub fn config(&self) -> Result<KbConfig> {
        let encoding: EncodingStrategy = self.encoding.parse().map_err(|e: String| anyhow!(e))?;

        Ok(KbConfig {
            encoding,
            preload: self.preload,
            ..KbConfig::default()
                .with_records(&self.records)
                .with_documents(&self.books)
        })
    }

    /// Build the render configuration from the global flags
    pub fn render_config(&self) -> Result<RenderConfig> {
        let format: OutputFormat = self.format.parse().map_err(|e: String| anyhow!(e))?;
        let color = !self.no_color && std::io::stdout().is_terminal();

        Ok(RenderConfig::new(format)
            .with_pretty(self.pretty)
            .with_color(color))
    }

    /// Log filter directive implied by -q / -v
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "kbase=debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let render_config = cli.render_config()?;

    match cli.command {
        Commands::Id { id } => crate::flows::lookup::run_id(&config, &id, render_config),

        Commands::Range { start, end } => {
            crate::flows::lookup::run_range(&config, &start, &end, render_config)
        }

        Commands::Phrase { phrase } => {
            crate::flows::search::run_phrase(&config, &phrase, render_config)
        }

        Commands::Books => crate::flows::search::run_books(&config, render_config),

        Commands::Stats => crate::flows::stats::run_stats(&config, render_config),
    }
}
