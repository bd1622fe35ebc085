//! Converts a JSON similarity matrix into the binary snapshot the server loads.
//!
//! Scores are narrowed to `f32`, which halves the size of a matrix exported
//! as `f64` while keeping far more precision than the ranking needs.
//!
//! ```sh
//! compact-similarity --input similarity.json --output data/similarity.bin
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use movie_recommender::store::{Catalog, SimilarityMatrix};

#[derive(Parser, Debug)]
#[command(name = "compact-similarity", about = "Build a similarity snapshot from a JSON matrix")]
struct Args {
    /// JSON file holding a square array of arrays of numbers
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the bincode snapshot
    #[arg(short, long, default_value = "data/similarity.bin")]
    output: PathBuf,

    /// Optional catalog snapshot to check the dimension against
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let raw = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let rows: Vec<Vec<f64>> = serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not a JSON matrix", args.input.display()))?;

    let matrix = SimilarityMatrix::from_f64_rows(rows)?;

    if let Some(catalog_path) = &args.catalog {
        matrix.ensure_matches(&Catalog::load(catalog_path)?)?;
    }

    matrix.save(&args.output)?;

    let written = std::fs::metadata(&args.output)
        .with_context(|| format!("Failed to stat {}", args.output.display()))?
        .len();

    tracing::info!(
        dimension = matrix.dimension(),
        input_bytes = raw.len(),
        output_bytes = written,
        output = %args.output.display(),
        "Similarity snapshot written"
    );

    Ok(())
}
