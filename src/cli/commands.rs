use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cache::ParseCache;
use crate::dispatch::TakeoutParser;
use crate::merge::{DedupPolicy, merge_events};
use crate::models::{EventKind, ParseResult};

#[derive(Parser)]
#[command(name = "takeout-parser")]
#[command(version = "0.1.0")]
#[command(about = "Parse Google Takeout exports into a typed event stream", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a single Takeout directory and summarize its contents
    Parse {
        /// Root of an unpacked Takeout export
        takeout_dir: PathBuf,
        /// Cache decode results keyed by file identity
        #[arg(long)]
        cache: bool,
    },
    /// Parse several Takeout directories and merge them into one timeline
    Merge {
        /// Roots of unpacked Takeout exports, oldest first
        takeout_dirs: Vec<PathBuf>,
        /// Cache decode results keyed by file identity
        #[arg(long)]
        cache: bool,
        /// Keep the first occurrence of a duplicate instead of the last
        #[arg(long)]
        first_wins: bool,
    },
    /// Print the cache directory location
    CacheDir,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Parse { takeout_dir, cache }) => {
            let results = parser_for(takeout_dir, cache)?.parse()?;
            print_summary(&results);
        }
        Some(Commands::Merge { takeout_dirs, cache, first_wins }) => {
            if takeout_dirs.is_empty() {
                anyhow::bail!("merge requires at least one takeout directory");
            }
            let mut streams = Vec::with_capacity(takeout_dirs.len());
            for dir in takeout_dirs {
                streams.push(parser_for(dir, cache)?.parse()?);
            }
            let policy = if first_wins { DedupPolicy::FirstWins } else { DedupPolicy::LastWins };
            let merged = merge_events(streams, policy);
            print_summary(&merged);
        }
        Some(Commands::CacheDir) => {
            let cache = ParseCache::open()?;
            println!("{}", cache.dir().display());
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn parser_for(dir: PathBuf, cache: bool) -> Result<TakeoutParser> {
    let parser = TakeoutParser::new(dir);
    if cache { Ok(parser.with_cache(ParseCache::open()?)) } else { Ok(parser) }
}

fn print_summary(results: &[ParseResult]) {
    let mut counts: BTreeMap<EventKind, usize> = BTreeMap::new();
    let mut errors = 0usize;
    for result in results {
        match result {
            Ok(event) => *counts.entry(event.kind()).or_default() += 1,
            Err(_) => errors += 1,
        }
    }

    println!("Takeout Summary");
    println!("================");
    println!("Total events: {}", results.len() - errors);
    for (kind, count) in &counts {
        println!("  {}: {}", kind.name(), count);
    }
    println!("Decode errors: {errors}");
    for result in results {
        if let Err(error) = result {
            println!("  {error}");
        }
    }
}
