//! orb-geometry library
//!
//! Procedural sacred-geometry point clouds: each [`Shape`] fills a fixed
//! particle budget with positions, colors and per-particle group tags, ready
//! for an additive-blended point renderer.
//!
//! ```
//! use orb_geometry::{OrbGenerator, Shape};
//!
//! let mut generator = OrbGenerator::with_seed(7);
//! let merkaba = generator.generate(Shape::Merkaba);
//! assert_eq!(merkaba.len(), orb_geometry::PARTICLE_COUNT);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod math;
pub mod preview;
pub mod shapes;

// Re-export buffer layout
pub use buffer::{PARTICLE_COUNT, ParticleBuffer, ParticleWriter, Partition, PointVertex};

// Re-export configuration and errors
pub use config::GeneratorConfig;
pub use error::OrbError;

// Re-export generation entry points
pub use generator::{OrbGenerator, shape_seed};
pub use shapes::{ParseShapeError, Shape, dispatch_tag, generate_fallback_sphere};

// Re-export preview and export helpers
pub use export::{group_histogram, write_points, write_points_to};
pub use preview::{OrbCache, PREVIEW_BASE_SIZE, preview_particle_count, scaled_particle_count};

pub use math::Color;
