//! All command - generate every shape in parallel

use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Args;
use orb_geometry::{OrbGenerator, Shape};

use crate::generate::summarize;
use crate::{GenerationArgs, resolve_config};

/// Arguments for the all command
#[derive(Args)]
pub struct AllArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Execute the all command
pub fn execute(config_path: Option<&Path>, args: AllArgs) -> Result<()> {
    let config = resolve_config(config_path, &args.generation)?;
    let generator = OrbGenerator::new(config);

    let start = Instant::now();
    let buffers = generator.generate_many(&Shape::ALL);
    tracing::info!(
        "Generated {} shapes in {:.1}ms (seed {})",
        buffers.len(),
        start.elapsed().as_secs_f64() * 1000.0,
        generator.seed()
    );

    let mut broken = 0;
    for (shape, buffer) in Shape::ALL.iter().zip(&buffers) {
        println!("{}", summarize(*shape, buffer));
        if buffer.has_non_finite() {
            tracing::warn!("{} produced non-finite values", shape);
            broken += 1;
        }
    }

    if broken > 0 {
        bail!("{} shapes produced non-finite values", broken);
    }
    Ok(())
}
