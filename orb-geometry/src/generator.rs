//! Generation context
//!
//! [`OrbGenerator`] bundles the configuration, the resolved fallback palette
//! and a seedable PRNG, so callers pass one value around instead of relying
//! on process-wide state.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rayon::prelude::*;

use crate::buffer::ParticleBuffer;
use crate::config::GeneratorConfig;
use crate::math::Color;
use crate::preview::scaled_particle_count;
use crate::shapes::{Shape, dispatch_tag};

/// Golden-ratio increment used to spread per-shape seeds
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded shape generator
#[derive(Debug, Clone)]
pub struct OrbGenerator {
    config: GeneratorConfig,
    palette: Vec<Color>,
    seed: u64,
    rng: Pcg64Mcg,
}

impl OrbGenerator {
    /// Create a generator from `config`
    ///
    /// An unseeded config draws its seed from the thread RNG once, here.
    /// Invalid palette entries are logged and the palette falls back to
    /// the neutral grey.
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let palette = match config.palette() {
            Ok(colors) => colors,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring fallback palette");
                Vec::new()
            }
        };
        Self {
            config,
            palette,
            seed,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Seed in effect (drawn at construction when the config had none)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Full-budget buffer for `shape`
    pub fn generate(&mut self, shape: Shape) -> ParticleBuffer {
        let count = self.config.particle_count;
        let start = Instant::now();
        let buffer = shape.generate(&mut self.rng, count, &self.palette);
        tracing::debug!(
            shape = %shape,
            count,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Generated shape"
        );
        buffer
    }

    /// Full-budget buffer for a tag string; unknown tags yield the fallback sphere
    pub fn generate_tag(&mut self, tag: &str) -> ParticleBuffer {
        let count = self.config.particle_count;
        dispatch_tag(tag, &mut self.rng, count, &self.palette)
    }

    /// Preview buffer for a display of `size` pixels
    ///
    /// Generates at full budget and downsamples, so small previews keep the
    /// same region proportions as the full shape.
    pub fn generate_sized(&mut self, shape: Shape, size: f32) -> ParticleBuffer {
        let target = scaled_particle_count(
            self.config.particle_count,
            size,
            self.config.preview_base_size,
        );
        self.generate(shape).resample(target)
    }

    /// Generate several shapes in parallel
    ///
    /// Shape `i` gets its own PRNG seeded from the base seed and `i`, so the
    /// output does not depend on thread scheduling.
    pub fn generate_many(&self, shapes: &[Shape]) -> Vec<ParticleBuffer> {
        let count = self.config.particle_count;
        shapes
            .par_iter()
            .enumerate()
            .map(|(i, shape)| {
                let mut rng = Pcg64Mcg::seed_from_u64(shape_seed(self.seed, i));
                shape.generate(&mut rng, count, &self.palette)
            })
            .collect()
    }
}

/// Per-index seed derived from a base seed
pub fn shape_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(SEED_STRIDE)
}
