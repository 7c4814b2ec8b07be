use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use libfrench::{Engine, FrenchConfig};
use tracing_subscriber::EnvFilter;

/// Interactive explorer for old French spellings.
///
/// A line with two words (`old new`) prints their alignment and labeled
/// differences; a single word prints its candidates and modern form.
#[derive(Parser, Debug)]
#[command(name = "libfrench", version)]
struct Args {
    /// Directory holding modern.{fst,txt}, names.{fst,txt} and learned.tsv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FrenchConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FrenchConfig::default(),
    };
    let engine = if args.data_dir.is_dir() {
        Engine::from_data_dir(&args.data_dir, config)
            .with_context(|| format!("loading dictionaries from {}", args.data_dir.display()))?
    } else {
        println!("ℹ No data directory, candidate rules only");
        Engine::new(config)
    };

    println!("═══════════════════════════════════════════════════");
    println!("  libfrench - Interactive Spelling Explorer");
    println!("═══════════════════════════════════════════════════");
    println!();
    println!("Type `old new` to label a pair, or one word to modernize it.");
    println!("Examples: teste tête, avecques, roy");
    println!("Press Ctrl+D to exit.");
    println!();

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let raw = line.context("reading stdin")?;
        let words: Vec<&str> = raw.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            [word] => {
                for (i, c) in engine.candidates(word).iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, c)?;
                }
                writeln!(out, "  → {}\n", engine.modernize_word(word))?;
            }
            [old, new, ..] => {
                let (alignment, classification) = engine.label_pair(old, new)?;
                writeln!(out, "  {}", alignment.old_string())?;
                writeln!(out, "  {}", alignment.new_string())?;
                if classification.is_empty() {
                    writeln!(out, "  (no differences)")?;
                }
                for diff in classification.iter() {
                    let labels = if diff.labels.is_empty() {
                        "?".to_string()
                    } else {
                        diff.labels.join(", ")
                    };
                    writeln!(out, "  {} → {}  [{}]", diff.old, diff.new, labels)?;
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
