mod label;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libancien_core::{load_pairs, Lexicon};
use libfrench::{Engine, FrenchConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ancien", version, about = "Old French spelling tools")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Label `old<TAB>new<TAB>count` records, one output row per diff unit
    Label {
        /// Input TSV (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output TSV (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print run counters as JSON on stderr
        #[arg(long)]
        stats: bool,
    },
    /// Modernize a text line by line
    Modernize {
        /// Text file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Directory holding modern.{fst,txt}, names.{fst,txt} and learned.tsv
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Extra known modern forms (fst set or word list)
        #[arg(long)]
        modern: Option<PathBuf>,
        /// Extra proper nouns (fst set or word list)
        #[arg(long)]
        names: Option<PathBuf>,
        /// Learned `old<TAB>new` pairs
        #[arg(long)]
        learned: Option<PathBuf>,
    },
    /// Print the candidate spellings of each word
    Candidates {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Align one pair and print its labeled differences
    Align { old: String, new: String },
    /// Compile a word list (one per line, first TSV column) into an fst set
    BuildLexicon {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "modern.fst")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Label {
            input,
            output,
            stats,
        } => {
            let engine = Engine::new(config);
            let reader = open_input(input.as_deref())?;
            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("creating {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let counters = label::label_records(reader, writer, &engine)?;
            info!(
                records = counters.records,
                skipped = counters.skipped,
                rows = counters.rows,
                "labeling done"
            );
            if stats {
                eprintln!("{}", serde_json::to_string_pretty(&counters)?);
            }
        }
        Command::Modernize {
            input,
            data_dir,
            modern,
            names,
            learned,
        } => {
            let mut engine = match &data_dir {
                Some(dir) => Engine::from_data_dir(dir, config)
                    .with_context(|| format!("loading dictionaries from {}", dir.display()))?,
                None => Engine::new(config),
            };
            if let Some(path) = &modern {
                engine.set_modern_lexicon(open_lexicon(path)?);
            }
            if let Some(path) = &names {
                engine.set_name_lexicon(open_lexicon(path)?);
            }
            if let Some(path) = &learned {
                let pairs =
                    load_pairs(path).with_context(|| format!("reading {}", path.display()))?;
                info!(pairs = pairs.len(), "learned mappings loaded");
                engine.set_learned(pairs);
            }

            let reader = open_input(input.as_deref())?;
            let mut out = BufWriter::new(io::stdout().lock());
            for line in reader.lines() {
                let line = line?;
                writeln!(out, "{}", engine.modernize_sentence(&line))?;
            }
            out.flush()?;
            let (hits, misses, rate) = engine.cache_stats();
            info!(hits, misses, rate, "memo");
        }
        Command::Candidates { words } => {
            let engine = Engine::new(config);
            for word in &words {
                println!("{}\t{}", word, engine.candidates(word).join("\t"));
            }
        }
        Command::Align { old, new } => {
            let engine = Engine::new(config);
            let (alignment, classification) = engine.label_pair(&old, &new)?;
            println!("{}", alignment.old_string());
            println!("{}", alignment.new_string());
            println!("{} difference(s)", classification.count());
            for diff in classification.iter() {
                println!("{}\t{}\t{}", diff.old, diff.new, diff.labels.join(", "));
            }
        }
        Command::BuildLexicon { input, output } => {
            let lexicon = Lexicon::load_word_list(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let written = Lexicon::build_fst(lexicon.words(), &output)?;
            println!("Wrote {} words to {}", written, output.display());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FrenchConfig> {
    match path {
        Some(path) => FrenchConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(FrenchConfig::default()),
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(Box::new(io::Cursor::new(text)))
        }
    }
}

/// fst sets are recognized by extension; anything else is a word list.
fn open_lexicon(path: &Path) -> Result<Lexicon> {
    let lexicon = if path.extension().and_then(|s| s.to_str()) == Some("fst") {
        Lexicon::load_fst(path)
    } else {
        Lexicon::load_word_list(path)
    };
    lexicon.with_context(|| format!("reading {}", path.display()))
}
