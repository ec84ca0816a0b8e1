//! Export command - write one shape as an OBJ point cloud

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use orb_geometry::{OrbGenerator, Shape, write_points};

use crate::{GenerationArgs, resolve_config};

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Shape name (see `orb list`)
    pub shape: Shape,

    /// Output .obj file path (defaults to `<shape>.obj`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Execute the export command
pub fn execute(config_path: Option<&Path>, args: ExportArgs) -> Result<()> {
    let config = resolve_config(config_path, &args.generation)?;
    let mut generator = OrbGenerator::new(config);
    let buffer = generator.generate(args.shape);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.obj", args.shape)));
    write_points(&buffer, &output, args.shape.name())
        .with_context(|| format!("Failed to export {}", output.display()))?;

    println!("Wrote {} particles to {}", buffer.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("tree.obj");
        execute(
            None,
            ExportArgs {
                shape: Shape::FractalTree,
                output: Some(output.clone()),
                generation: GenerationArgs {
                    count: Some(300),
                    seed: Some(1),
                },
            },
        )
        .unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("# fractal-tree (300 particles)"));
    }
}
