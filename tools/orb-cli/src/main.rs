//! Orb CLI - generate and inspect sacred-geometry point clouds
//!
//! # Commands
//!
//! - `orb list` - Print every shape name
//! - `orb generate` - Generate one shape and log its statistics
//! - `orb export` - Write one shape as an OBJ point cloud
//! - `orb all` - Generate every shape in parallel and print a summary
//!
//! # Usage
//!
//! ```bash
//! orb generate merkaba --seed 7
//! orb generate earth --size 120
//! orb export sacred-flame -o flame.obj
//! RUST_LOG=debug orb all --config orb.toml
//! ```

mod all;
mod export;
mod generate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use orb_geometry::{GeneratorConfig, Shape};

/// Orb CLI - procedural sacred-geometry point clouds
#[derive(Parser)]
#[command(name = "orb")]
#[command(about = "Generate sacred-geometry particle clouds")]
#[command(version)]
struct Cli {
    /// Path to an orb.toml generator config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every shape name
    List,

    /// Generate one shape and log its statistics
    Generate(generate::GenerateArgs),

    /// Write one shape as an OBJ point cloud
    Export(export::ExportArgs),

    /// Generate every shape in parallel and print a summary
    All(all::AllArgs),
}

/// Overrides shared by every generating command
#[derive(Args, Clone, Debug, Default)]
pub struct GenerationArgs {
    /// Particle budget (overrides the config)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// PRNG seed (overrides the config)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Load the config file (or defaults) and apply command-line overrides
pub fn resolve_config(path: Option<&Path>, args: &GenerationArgs) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(count) = args.count {
        config.particle_count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::List => {
            for shape in Shape::ALL {
                println!("{}", shape);
            }
            Ok(())
        }
        Commands::Generate(args) => generate::execute(config_path, args),
        Commands::Export(args) => export::execute(config_path, args),
        Commands::All(args) => all::execute(config_path, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from(["orb", "generate", "merkaba", "--seed", "4", "-n", "100"])
            .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.shape, Shape::Merkaba);
                assert_eq!(args.generation.seed, Some(4));
                assert_eq!(args.generation.count, Some(100));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_shape() {
        assert!(Cli::try_parse_from(["orb", "generate", "hypercube"]).is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orb.toml");
        std::fs::write(&path, "seed = 1\nparticle_count = 50\n").unwrap();

        let config = resolve_config(
            Some(&path),
            &GenerationArgs {
                count: None,
                seed: Some(9),
            },
        )
        .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.particle_count, 50);
    }

    #[test]
    fn test_missing_config_errors() {
        let err = resolve_config(Some(Path::new("/nonexistent/orb.toml")), &Default::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }
}
