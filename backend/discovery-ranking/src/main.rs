use anyhow::{Context, Result};
use discovery_ranking::{Catalog, Config, DiscoveryPipeline, Item};
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("Failed to load config")?;

    let path = config
        .catalog_path
        .clone()
        .context("DISCOVERY_CATALOG_PATH must be set")?;
    let file = File::open(&path)
        .with_context(|| format!("Failed to open catalog at {}", path.display()))?;
    let items: Vec<Item> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse catalog at {}", path.display()))?;

    if !config.use_catalog_reference {
        warn!("Scoring against candidate-local statistics; candidates shape their own rarity");
    }

    let pipeline = DiscoveryPipeline::new(Catalog::new(items));

    info!(
        catalog = %path.display(),
        items = pipeline.catalog().len(),
        standardized_rows = pipeline.features().nrows(),
        seeds = config.seed_ids.len(),
        epsilon = config.epsilon,
        k = config.k,
        "Starting discovery audit"
    );

    let report = pipeline.audit(&config).context("Discovery audit failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
