//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use versegen_corpus::ingest;
use versegen_source::SourceLoader;
use versegen_static::StaticBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    let file_config = load_config(config_path)?;

    tracing::info!("Loading corpus...");
    let loader = SourceLoader::new(file_config.source_config())?;
    let loaded = loader.load().await?;

    let corpus = ingest(&loaded.value).context("Failed to index corpus")?;

    tracing::info!("Building static site...");
    let config = file_config.build_config(output, minify);
    let result = StaticBuilder::new(config).build(&corpus.index)?;

    tracing::info!(
        "Built {} pages ({} sitemap URLs) from {} verses in {}ms",
        result.pages,
        result.sitemap_urls,
        corpus.records,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
