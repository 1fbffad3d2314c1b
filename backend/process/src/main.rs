use std::path::PathBuf;

use catalog::CatalogSource;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Render every catalog region to static HTML.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// CSV path or http(s) URL
    source: CatalogSource,

    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,

    /// Fixes the related-products shuffle
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let summary = prerender::prerender(&args.source, &args.out_dir, args.seed).await?;
    summary.print();

    Ok(())
}
