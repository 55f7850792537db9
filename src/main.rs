//! Command-line driver for the trigram predictor.
//!
//! Builds a predictor (seeded, imported, or trained from files), prints the
//! next-word predictions for a context, optionally looks up a correction, and
//! writes the model to `model_data.json`.
//!
//! Settings come from the per-user config file and are overridden by flags.
//! Log output goes to stderr and is filtered by `RUST_LOG`.

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use trigram_predictor::config::Config;
use trigram_predictor::{Predictor, DEFAULT_CORPUS};

#[derive(Parser, Debug)]
#[command(name = "trigram-predictor")]
#[command(about = "Trigram next-word prediction and autocorrection")]
#[command(version)]
struct Args {
    /// Text to predict the next word for
    #[arg(short, long, default_value = "I am")]
    context: String,

    /// Maximum number of predictions
    #[arg(short = 'n', long)]
    max_suggestions: Option<usize>,

    /// Where to write the exported model
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Training corpus, one sentence per line (repeatable)
    #[arg(long)]
    train: Vec<PathBuf>,

    /// Extra correction list, `misspelling correction` per line
    #[arg(long)]
    corrections: Option<PathBuf>,

    /// Start from an exported model instead of the sample sentences
    #[arg(long)]
    import: Option<PathBuf>,

    /// Don't train on the built-in sample sentences
    #[arg(long)]
    no_default_corpus: bool,

    /// Look up a spelling correction for this word
    #[arg(long)]
    correct: Option<String>,

    /// Use this config file instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {err}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::load_path(path)?,
        None => Config::load()?,
    };

    if let Some(max) = args.max_suggestions {
        config.max_suggestions = max;
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(corrections) = &args.corrections {
        config.corrections_path = Some(corrections.clone());
    }
    if args.no_default_corpus {
        config.seed_default_corpus = false;
    }
    debug!(?config, "effective configuration");

    let mut predictor = match &args.import {
        Some(path) => Predictor::import_file(path)?,
        None if config.seed_default_corpus => Predictor::new(DEFAULT_CORPUS),
        None => Predictor::empty(),
    };

    for path in &args.train {
        predictor.train_file(path)?;
    }

    if let Some(path) = &config.corrections_path {
        predictor.corrections_mut().load_file(path)?;
    }

    let predictions = predictor.predict(&args.context, config.max_suggestions);
    println!("Context: '{}'", args.context);
    println!("Predictions: {:?}", predictions);

    if let Some(word) = &args.correct {
        match predictor.autocorrect(word) {
            Some(correction) => println!("Correction: '{}' -> '{}'", word, correction),
            None => println!("No correction for '{}'", word),
        }
    }

    predictor.export_file(&config.output_path)?;
    println!("Model written to {}", config.output_path.display());

    Ok(())
}
