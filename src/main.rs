use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use syncx::input;
use syncx_core::{AlignConfig, AlignEvent, AlignmentEngine};
use syncx_lexicon::InMemoryLexicon;

/// Aligns a narrative text track against a caption track by semantic similarity
#[derive(Parser, Debug)]
#[command(name = "syncx")]
#[command(about = "Semantic alignment of parallel text sequences", long_about = None)]
struct Args {
    /// Primary (narrative) input file, one unit per line
    #[arg(required_unless_present = "annotated")]
    primary: Option<PathBuf>,

    /// Secondary (caption) input file, one unit per line
    #[arg(required_unless_present = "annotated")]
    secondary: Option<PathBuf>,

    /// Annotated JSON document with tokens, POS tags and frames for both tracks
    #[arg(long, conflicts_with_all = ["primary", "secondary"])]
    annotated: Option<PathBuf>,

    /// Pre-built lexicon file (JSON)
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Minimum similarity score to accept a match
    #[arg(long, default_value_t = 0.8)]
    min_delta: f64,

    /// Minimum token count for full comparison instead of the window fallback
    #[arg(long, default_value_t = 4)]
    min_matching_words: usize,

    /// Fallback window radius as a fraction of the secondary length (negative disables)
    #[arg(long, default_value_t = 0.02)]
    relative_search_window: f64,

    /// Minimum best score for a match to re-anchor the search window
    #[arg(long, default_value_t = 0.8)]
    min_window_score: f64,

    /// Minimum word similarity for the vector strategy to treat words as related
    #[arg(long, default_value_t = 0.2)]
    min_word_similarity: f64,

    /// Mixing weight between semantic and word-order similarity
    #[arg(long, default_value_t = 0.7)]
    lexical_weight: f64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting syncx v{}", env!("CARGO_PKG_VERSION"));

    let lexicon = match &args.lexicon {
        Some(path) => {
            info!("Lexicon: {:?}", path);
            InMemoryLexicon::load(path)?
        }
        None => {
            warn!("No lexicon given, matching falls back to exact token overlap");
            InMemoryLexicon::new()
        }
    };

    let (primary, secondary) = match &args.annotated {
        Some(path) => {
            info!("Annotated input: {:?}", path);
            input::load_annotated(path)?
        }
        None => {
            // clap guarantees both paths are present in plain mode
            let primary_path = args.primary.as_ref().context("primary input path required")?;
            let secondary_path = args.secondary.as_ref().context("secondary input path required")?;
            info!("Primary input: {:?}", primary_path);
            info!("Secondary input: {:?}", secondary_path);
            (
                input::load_plain(primary_path)?,
                input::load_plain(secondary_path)?,
            )
        }
    };
    println!("preparationprogress - 100%");

    let config = AlignConfig {
        min_delta: args.min_delta,
        min_matching_words: args.min_matching_words,
        relative_search_window: args.relative_search_window,
        min_score_for_window: args.min_window_score,
        min_word_similarity: args.min_word_similarity,
        relative_lexical_importance: args.lexical_weight,
    };

    let engine = AlignmentEngine::new(Arc::new(lexicon), config)?;
    let mut match_count = 0usize;
    engine.run(&primary, &secondary, &mut |event| match event {
        AlignEvent::Match(record) => {
            match_count += 1;
            println!(
                "match - {} - {} - {:.2}",
                record.secondary, record.primary, record.score
            );
        }
        AlignEvent::Progress { stage, percent } => {
            println!("{stage}progress - {percent}%");
        }
    })?;

    info!(
        matches = match_count,
        expansions = engine.scorer().words().graph().expansion_count(),
        "alignment finished"
    );
    Ok(())
}
