use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symptom_cache::schema::presets;
use symptom_cache::{
    CacheConfig, GeminiClient, RandomAdmission, SchemaValidator, SqliteStore,
    SymptomOrchestrator,
};

#[derive(Parser)]
#[command(name = "symptom-cache")]
#[command(about = "Validation-gated cache for LLM-generated symptom records", long_about = None)]
struct Cli {
    /// Disease to fetch a symptom report for
    disease: String,

    /// Probability (0.0 - 1.0) of attempting the cache path before generating
    #[arg(short, long)]
    probability: f64,

    /// Maximum number of variants retained per disease
    #[arg(short, long, default_value_t = symptom_cache::DEFAULT_RETENTION_LIMIT)]
    limit: usize,

    /// SQLite database location
    #[arg(long, default_value = "symptom_cache.db")]
    db_path: PathBuf,

    /// Gemini model to generate with
    #[arg(long, default_value = "gemini-1.5-flash")]
    model: String,

    /// Fix the RNG seed for reproducible cache/generate decisions
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = CacheConfig::builder()
        .admission_probability(cli.probability)
        .retention_limit(cli.limit)
        .db_path(cli.db_path)
        .build()?;

    let store = SqliteStore::open(&config.db_path, config.retention_limit)?;
    let generator = GeminiClient::from_env(cli.model)?;
    let validator = SchemaValidator::new(presets::symptom_report());
    let policy = match cli.seed {
        Some(seed) => RandomAdmission::with_seed(config.admission_probability, seed),
        None => RandomAdmission::new(config.admission_probability),
    };

    let orchestrator = SymptomOrchestrator::new(store, generator, validator, policy);
    let report = orchestrator.fetch(&cli.disease).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
