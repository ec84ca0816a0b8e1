//! Generate command - build one shape and report statistics

use std::path::Path;

use anyhow::Result;
use clap::Args;
use orb_geometry::{OrbGenerator, ParticleBuffer, Shape, group_histogram};

use crate::{GenerationArgs, resolve_config};

/// Arguments for the generate command
#[derive(Args)]
pub struct GenerateArgs {
    /// Shape name (see `orb list`)
    pub shape: Shape,

    /// Preview display size in pixels; scales the budget by area
    #[arg(long)]
    pub size: Option<f32>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// One-line summary of a generated buffer
pub fn summarize(shape: Shape, buffer: &ParticleBuffer) -> String {
    let groups = group_histogram(buffer)
        .into_iter()
        .map(|(group, count)| format!("{}:{}", group, count))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{:<24} {:>6} particles  radius {:.3}  origin {:>3}  groups [{}]",
        shape.name(),
        buffer.len(),
        buffer.bounding_radius(),
        buffer.origin_count(),
        groups
    )
}

/// Execute the generate command
pub fn execute(config_path: Option<&Path>, args: GenerateArgs) -> Result<()> {
    let config = resolve_config(config_path, &args.generation)?;
    let mut generator = OrbGenerator::new(config);
    tracing::info!("Generating {} (seed {})", args.shape, generator.seed());

    let buffer = match args.size {
        Some(size) => generator.generate_sized(args.shape, size),
        None => generator.generate(args.shape),
    };

    if buffer.has_non_finite() {
        tracing::warn!("{} produced non-finite values", args.shape);
    }
    println!("{}", summarize(args.shape, &buffer));
    Ok(())
}
