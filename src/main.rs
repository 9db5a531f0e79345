use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use patina_core::{FilterChain, ImageBuf, Pipeline};

/// Apply a JSON-described filter chain to an image.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Source image (any format the image crate can decode).
    input: PathBuf,
    /// JSON document with a top-level `filters` list.
    chain: PathBuf,
    /// Output path, written as PNG.
    output: PathBuf,
    /// RNG seed, for reproducible film grain.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let chain_text = std::fs::read_to_string(&args.chain)
        .with_context(|| format!("read filter chain {}", args.chain.display()))?;
    let chain: FilterChain = serde_json::from_str(&chain_text)
        .with_context(|| format!("decode filter chain {}", args.chain.display()))?;

    let decoded = image::open(&args.input)
        .with_context(|| format!("decode image {}", args.input.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let source = ImageBuf::from_rgba_u8_srgb(width, height, decoded.as_raw())?;
    info!(width, height, stages = chain.filters.len(), "loaded inputs");

    let mut pipeline = match args.seed {
        Some(seed) => Pipeline::with_seed(seed),
        None => Pipeline::new(),
    };
    let result = pipeline
        .execute(&source, &chain.filters)
        .context("pipeline run failed")?;

    let final_image = match result {
        Some(img) => img,
        None => {
            info!("no filter in the chain applied; passing the source through");
            source
        }
    };

    let bytes = final_image.to_rgba_u8_srgb();
    let out = image::RgbaImage::from_raw(final_image.width, final_image.height, bytes)
        .context("assemble output image")?;
    out.save_with_format(&args.output, image::ImageFormat::Png)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(path = %args.output.display(), "wrote output");

    Ok(())
}
