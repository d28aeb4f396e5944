use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use shortlist_cli::error::CliError;
use shortlist_cli::input;
use shortlist_cli::screen::{render_text, Screener, DEFAULT_BATCH_LIMIT};
use shortlist_core::catalog::SkillCatalog;
use shortlist_core::embed::{create_embedder, EmbedderConfig, DEFAULT_EMBEDDING_DIMENSION};
use shortlist_core::extract::CatalogSkillExtractor;
use shortlist_core::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use shortlist_core::run_id;
use shortlist_core::scoring::{
    Scorer, ScoringWeights, DEFAULT_SEMANTIC_WEIGHT, DEFAULT_SKILL_WEIGHT,
};

/// Rank resume candidates against a job description.
#[derive(Parser, Debug)]
#[command(name = "shortlist", version)]
struct Cli {
    /// Screening request JSON: one job plus the candidates to rank.
    #[arg(long, env = "SL_INPUT")]
    input: PathBuf,

    /// Write the response here instead of stdout.
    #[arg(long, env = "SL_OUTPUT")]
    output: Option<PathBuf>,

    /// Weight of semantic similarity in the final score.
    #[arg(long, env = "SL_SEMANTIC_WEIGHT", default_value_t = DEFAULT_SEMANTIC_WEIGHT)]
    semantic_weight: f64,

    /// Weight of required-skill coverage in the final score.
    #[arg(long, env = "SL_SKILL_WEIGHT", default_value_t = DEFAULT_SKILL_WEIGHT)]
    skill_weight: f64,

    /// Largest accepted candidate batch; bigger requests are rejected.
    #[arg(long, env = "SL_BATCH_LIMIT", default_value_t = DEFAULT_BATCH_LIMIT)]
    batch_limit: usize,

    /// JSON object of canonical name -> aliases, replacing the built-in
    /// skill catalog.
    #[arg(long, env = "SL_SKILL_CATALOG")]
    skill_catalog: Option<PathBuf>,

    /// Embedder for documents that carry text but no vector.
    #[arg(long, env = "SL_EMBEDDER", default_value = "hash")]
    embedder: String,

    /// Dimension of locally produced embeddings.
    #[arg(long, env = "SL_EMBEDDING_DIM", default_value_t = DEFAULT_EMBEDDING_DIMENSION)]
    embedding_dim: usize,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Text,
}

fn run(cli: Cli) -> Result<(), CliError> {
    info!(
        run_id = run_id::get(),
        input = %cli.input.display(),
        "shortlist starting"
    );

    let loaded_catalog = match &cli.skill_catalog {
        Some(path) => Some(input::load_catalog(path)?),
        None => None,
    };
    let catalog = match &loaded_catalog {
        Some(catalog) => catalog,
        None => SkillCatalog::builtin(),
    };

    let embedder = create_embedder(&EmbedderConfig {
        kind: cli.embedder.clone(),
        dimension: cli.embedding_dim,
    })?;
    let extractor = CatalogSkillExtractor::new(catalog);
    let scorer = Scorer::new(ScoringWeights::new(cli.semantic_weight, cli.skill_weight))?;

    let request = input::load_request(&cli.input)?;
    let screener = Screener::new(catalog, embedder.as_ref(), &extractor, scorer)
        .with_batch_limit(cli.batch_limit);
    let response = screener.screen(&request)?;

    let rendered = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Text => render_text(&response),
    };
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes()).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            info!(output = %path.display(), "response written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn main() {
    let _ = dotenvy::dotenv();
    install_tracing_panic_hook("shortlist");
    init_tracing_subscriber("shortlist");

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!(error = %err, "shortlist failed");
        std::process::exit(1);
    }
}
