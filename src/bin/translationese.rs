//! Command-line feature extraction
//!
//! Usage:
//!   translationese data/preprocessed --support-dir searchlists -o features.tsv
//!   translationese 'data/**/en/*.conllu' --lang en --min-len 3
//!
//! A directory argument is walked for `*.conllu` and `*.conllu.gz` files;
//! anything else is taken as a glob pattern. Set `RUST_LOG=debug` for
//! per-document logging.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use pariter::IteratorExt as _;
use tracing::{info, warn};

use translationese::config::ExtractConfig;
use translationese::export::TsvWriter;
use translationese::iterators::Corpus;
use translationese::lang::Lang;
use translationese::lists::SupportLists;
use translationese::pipeline::Extractor;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Extract translationese features from UD-parsed documents
#[derive(Parser, Debug)]
#[command(name = "translationese", version)]
struct Args {
    /// Corpus root directory or glob pattern
    input: String,

    /// Output TSV file (stdout when omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory with `<lang>_<category>.lst` support lists
    #[arg(long, short = 's')]
    support_dir: Option<PathBuf>,

    /// Minimum sentence length in tokens
    #[arg(long)]
    min_len: Option<usize>,

    /// Drop sentences made only of PUNCT and NUM tokens
    #[arg(long)]
    strict_punct_num: Option<bool>,

    /// Language of every document, instead of reading it from the path
    #[arg(long, short = 'l')]
    lang: Option<String>,
}

fn load_config(args: &Args) -> Result<ExtractConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::from_file(path)?,
        None => ExtractConfig::default(),
    };
    if let Some(min_len) = args.min_len {
        config.min_len = min_len;
    }
    if let Some(strict) = args.strict_punct_num {
        config.strict_punct_num = strict;
    }
    if let Some(dir) = &args.support_dir {
        config.support_dir = Some(dir.clone());
    }
    Ok(config)
}

fn load_lists(config: &ExtractConfig) -> Result<SupportLists, Box<dyn std::error::Error>> {
    let Some(dir) = &config.support_dir else {
        warn!("No support directory given, list-based features will be zero");
        return Ok(SupportLists::new());
    };
    let langs: Vec<Lang> = config
        .langs
        .iter()
        .map(|code| Lang::from_code(code))
        .filter(|lang| *lang != Lang::Unsupported)
        .collect();
    Ok(SupportLists::load_dir(dir, &langs)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let start = Instant::now();
    let config = load_config(&args)?;
    let lists = Arc::new(load_lists(&config)?);

    let root = PathBuf::from(&args.input);
    let mut corpus = if root.is_dir() {
        Corpus::from_dir(&root, &config)?
    } else {
        Corpus::from_glob(&args.input, &config)?
    };
    if let Some(code) = &args.lang {
        corpus = corpus.with_lang(Lang::from_code(code));
    }
    info!(documents = corpus.len(), input = %args.input, "Starting extraction");

    let extractor = Arc::new(Extractor::new(&config, lists));
    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = TsvWriter::new(sink, &config.levels, extractor.feature_keys())?;

    let corpus = Arc::new(corpus);
    let paths = corpus.paths().to_vec();
    let mut skipped = 0usize;
    let results = paths.into_iter().parallel_map({
        let corpus = Arc::clone(&corpus);
        let extractor = Arc::clone(&extractor);
        move |path| {
            corpus
                .read(&path)
                .map(|document| extractor.extract(&document))
        }
    });
    for result in results {
        match result {
            Ok(vector) => writer.write(&vector)?,
            Err(e) => {
                warn!("Skipping document: {}", e);
                skipped += 1;
            }
        }
    }
    let rows = writer.rows();
    writer.finish()?.flush()?;

    info!(
        rows,
        skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Extraction finished"
    );
    Ok(())
}
