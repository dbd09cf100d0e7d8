// feedforge/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use feedforge_core::domain::feed::{Delimiter, Encoding, FeedFormat};

#[derive(Parser)]
#[command(name = "feedforge")]
#[command(about = "Turns a merchant catalog into commerce feeds and validates them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to feedforge.yaml (defaults to ./feedforge.yaml when present)
    #[arg(long, global = true, env = "FEEDFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Target feed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Assistant,
    Shopping,
}

impl From<FormatArg> for FeedFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Assistant => FeedFormat::Assistant,
            FormatArg::Shopping => FeedFormat::Shopping,
        }
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    Jsonl,
    Tsv,
    Csv,
}

impl EncodingArg {
    pub fn resolve(self, compress: bool) -> Encoding {
        match self {
            Self::Jsonl => Encoding::JsonLines { gzip: compress },
            Self::Tsv => Encoding::Delimited(Delimiter::Tab),
            Self::Csv => Encoding::Delimited(Delimiter::Comma),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Transforms a catalog file into a feed
    Transform {
        /// Catalog export (.csv or .tsv)
        input: PathBuf,

        #[arg(long, short, value_enum, default_value = "assistant")]
        format: FormatArg,

        /// Output path; the encoding's extension is appended when missing
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output encoding (defaults: assistant=jsonl, shopping=tsv)
        #[arg(long, short, value_enum)]
        encoding: Option<EncodingArg>,

        /// Write plain .jsonl instead of .jsonl.gz
        #[arg(long)]
        no_compress: bool,
    },

    /// ✅ Validates a generated feed against its schema
    Validate {
        /// Feed file (.jsonl, .jsonl.gz, .tsv, .csv)
        feed: PathBuf,

        #[arg(long, short, value_enum, default_value = "assistant")]
        format: FormatArg,

        /// Custom schema definition (YAML) instead of the built-in one
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Include per-record results (JSON only)
        #[arg(long, short)]
        verbose: bool,

        /// Also save the report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Exit with an error if any record fails validation
        #[arg(long)]
        check: bool,
    },

    /// 🔍 Shows one catalog row and its transformed record
    Preview {
        input: PathBuf,

        #[arg(long, short, value_enum, default_value = "assistant")]
        format: FormatArg,

        /// Product id to preview
        #[arg(long, conflicts_with = "row")]
        id: Option<String>,

        /// 1-based data row to preview
        #[arg(long, default_value = "1")]
        row: usize,
    },

    /// 📦 Lists generated feed files
    Feeds {
        /// Directory to scan (defaults to the configured output_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// 📚 Prints a target schema
    Schema {
        #[arg(value_enum, default_value = "assistant")]
        format: FormatArg,

        /// Print the raw YAML definition
        #[arg(long)]
        yaml: bool,
    },
}
