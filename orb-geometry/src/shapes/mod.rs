//! Shape generators and tag dispatch
//!
//! Each submodule owns one shape and exposes a
//! `generate_<shape>(rng, count) -> ParticleBuffer` function plus whatever
//! construction helpers its tests need. [`Shape`] closes the set with
//! static dispatch:
//!
//! - No vtable lookups
//! - Adding a shape is a compile error until every match handles it
//! - Unknown tag strings fall back to a plain sphere shell via [`dispatch_tag`]

mod celtic_knot;
mod double_helix;
mod earth;
mod earth_data;
mod flower_of_life;
mod fractal_tree;
mod golden_rectangles;
mod grid_of_life;
mod lattice_wave;
mod merkaba;
mod quantum_orbitals;
mod sacred_flame;
mod sri_yantra;
mod star_of_david;
mod starburst_nova;
mod tree_of_life;
mod triquetra;
mod vortex_ring;
mod wave_interference;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::{ParticleBuffer, ParticleWriter};
use crate::math::{Color, palette, random_on_unit_sphere, unit};

pub use celtic_knot::{crossings, figure_eight_point, generate_celtic_knot, trefoil_point};
pub use double_helix::{generate_double_helix, helix_point};
pub use earth::{
    GROUP_CITY, GROUP_CLOUD, GROUP_ICE, GROUP_LAND, GROUP_OCEAN, generate_earth, sample_in_cap,
};
pub use earth_data::{CITY_CAPS, CITY_GLOW, CityCap, LAND_CAPS, SphericalCap, find_city};
pub use flower_of_life::{
    LatticeCircle, circle_centers, circle_intersections, generate_flower_of_life,
    generate_flower_of_life_complete,
};
pub use fractal_tree::{
    Branch, MAX_DEPTH, TreeSkeleton, build_branches, generate_fractal_tree, leaf_count,
    segment_count,
};
pub use golden_rectangles::{PHI, axis_nodes, generate_golden_rectangles, rectangles};
pub use grid_of_life::{generate_grid_of_life, grid_edges, grid_vertices};
pub use lattice_wave::{generate_lattice_wave, lattice_edges, wave_displacement};
pub use merkaba::{generate_merkaba, upward_tetrahedron};
pub use quantum_orbitals::{
    DOrbital, d_orbital_density, generate_quantum_orbitals, p_orbital_density,
};
pub use sacred_flame::generate_sacred_flame;
pub use sri_yantra::{TRIANGLES, generate_sri_yantra, unique_vertices};
pub use star_of_david::{generate_star_of_david, hexagram};
pub use starburst_nova::generate_starburst_nova;
pub use tree_of_life::{PATHS, SEPHIROTH, Sephira, generate_tree_of_life};
pub use triquetra::{generate_triquetra, is_hidden, loop_centers};
pub use vortex_ring::{generate_vortex_ring, torus_point};
pub use wave_interference::{constructive_nodes, generate_wave_interference, interference};

/// Inner and outer radius of the fallback sphere shell
pub const FALLBACK_SHELL: (f32, f32) = (1.0, 1.15);

/// Every selectable orb shape
///
/// Serialized names match the tags used in saved settings
/// (`"flower-of-life"`, `"double-helix-dna"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Plain sphere shell tinted by the caller's palette
    #[default]
    Default,
    FlowerOfLife,
    FlowerOfLifeComplete,
    StarOfDavid,
    Merkaba,
    Earth,
    TreeOfLife,
    GridOfLife,
    SriYantra,
    Triquetra,
    GoldenRectangles,
    #[serde(rename = "double-helix-dna")]
    DoubleHelix,
    VortexRing,
    FractalTree,
    WaveInterference,
    QuantumOrbitals,
    CelticKnot,
    StarburstNova,
    LatticeWave,
    SacredFlame,
}

impl Shape {
    /// All shapes in menu order
    pub const ALL: [Shape; 20] = [
        Shape::Default,
        Shape::FlowerOfLife,
        Shape::FlowerOfLifeComplete,
        Shape::StarOfDavid,
        Shape::Merkaba,
        Shape::Earth,
        Shape::TreeOfLife,
        Shape::GridOfLife,
        Shape::SriYantra,
        Shape::Triquetra,
        Shape::GoldenRectangles,
        Shape::DoubleHelix,
        Shape::VortexRing,
        Shape::FractalTree,
        Shape::WaveInterference,
        Shape::QuantumOrbitals,
        Shape::CelticKnot,
        Shape::StarburstNova,
        Shape::LatticeWave,
        Shape::SacredFlame,
    ];

    /// Tag string for this shape
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Default => "default",
            Shape::FlowerOfLife => "flower-of-life",
            Shape::FlowerOfLifeComplete => "flower-of-life-complete",
            Shape::StarOfDavid => "star-of-david",
            Shape::Merkaba => "merkaba",
            Shape::Earth => "earth",
            Shape::TreeOfLife => "tree-of-life",
            Shape::GridOfLife => "grid-of-life",
            Shape::SriYantra => "sri-yantra",
            Shape::Triquetra => "triquetra",
            Shape::GoldenRectangles => "golden-rectangles",
            Shape::DoubleHelix => "double-helix-dna",
            Shape::VortexRing => "vortex-ring",
            Shape::FractalTree => "fractal-tree",
            Shape::WaveInterference => "wave-interference",
            Shape::QuantumOrbitals => "quantum-orbitals",
            Shape::CelticKnot => "celtic-knot",
            Shape::StarburstNova => "starburst-nova",
            Shape::LatticeWave => "lattice-wave",
            Shape::SacredFlame => "sacred-flame",
        }
    }

    /// Generate `count` particles for this shape
    ///
    /// `palette` only tints [`Shape::Default`]; every other shape carries its
    /// own colors.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        palette: &[Color],
    ) -> ParticleBuffer {
        match self {
            Shape::Default => generate_fallback_sphere(rng, count, palette),
            Shape::FlowerOfLife => generate_flower_of_life(rng, count),
            Shape::FlowerOfLifeComplete => generate_flower_of_life_complete(rng, count),
            Shape::StarOfDavid => generate_star_of_david(rng, count),
            Shape::Merkaba => generate_merkaba(rng, count),
            Shape::Earth => generate_earth(rng, count),
            Shape::TreeOfLife => generate_tree_of_life(rng, count),
            Shape::GridOfLife => generate_grid_of_life(rng, count),
            Shape::SriYantra => generate_sri_yantra(rng, count),
            Shape::Triquetra => generate_triquetra(rng, count),
            Shape::GoldenRectangles => generate_golden_rectangles(rng, count),
            Shape::DoubleHelix => generate_double_helix(rng, count),
            Shape::VortexRing => generate_vortex_ring(rng, count),
            Shape::FractalTree => generate_fractal_tree(rng, count),
            Shape::WaveInterference => generate_wave_interference(rng, count),
            Shape::QuantumOrbitals => generate_quantum_orbitals(rng, count),
            Shape::CelticKnot => generate_celtic_knot(rng, count),
            Shape::StarburstNova => generate_starburst_nova(rng, count),
            Shape::LatticeWave => generate_lattice_wave(rng, count),
            Shape::SacredFlame => generate_sacred_flame(rng, count),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag string that names no known shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown shape '{0}'")]
pub struct ParseShapeError(pub String);

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

/// Generate by tag string, falling back to the sphere shell for unknown tags
///
/// Never fails: any string, including `"default"` and the empty string,
/// yields a full buffer.
pub fn dispatch_tag<R: Rng + ?Sized>(
    tag: &str,
    rng: &mut R,
    count: usize,
    palette: &[Color],
) -> ParticleBuffer {
    match tag.parse::<Shape>() {
        Ok(shape) => shape.generate(rng, count, palette),
        Err(err) => {
            tracing::debug!("{err}, using fallback sphere");
            generate_fallback_sphere(rng, count, palette)
        }
    }
}

/// Uniform sphere shell of radius `[1.0, 1.15]`, each particle a random palette color
///
/// An empty palette paints everything [`palette::FALLBACK`].
pub fn generate_fallback_sphere<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    colors: &[Color],
) -> ParticleBuffer {
    let (inner, outer) = FALLBACK_SHELL;
    let mut out = ParticleWriter::new(count);
    out.fill_remaining(|| {
        let r = inner + unit(rng) * (outer - inner);
        let color = if colors.is_empty() {
            palette::FALLBACK
        } else {
            colors[rng.random_range(0..colors.len())]
        };
        (random_on_unit_sphere(rng) * r, color, 0)
    });
    out.finish()
}


#[cfg(test)]
mod tests {
    use super::test_support::{assert_well_formed, seeded};
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(shape.name().parse::<Shape>(), Ok(shape));
            assert_eq!(shape.to_string(), shape.name());
        }
    }

    #[test]
    fn test_serde_names_match_tags() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            shape: Shape,
        }
        for shape in Shape::ALL {
            let text = toml::to_string(&Wrapper { shape }).unwrap();
            assert_eq!(text.trim(), format!("shape = \"{}\"", shape.name()));
            let back: Wrapper = toml::from_str(&text).unwrap();
            assert_eq!(back.shape, shape);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = "hypercube".parse::<Shape>().unwrap_err();
        assert_eq!(err, ParseShapeError("hypercube".into()));
        assert!("Merkaba".parse::<Shape>().is_err());
    }

    #[test]
    fn test_every_shape_well_formed() {
        for (i, shape) in Shape::ALL.into_iter().enumerate() {
            let buf = shape.generate(&mut seeded(i as u64), 3000, &[Color::WHITE]);
            assert_well_formed(&buf, 3000);
        }
    }

    #[test]
    fn test_fallback_shell_radius() {
        let colors = [Color::from_hex(0xFF0000), Color::from_hex(0x00FF00)];
        let buf = dispatch_tag("no-such-shape", &mut seeded(1), 2000, &colors);
        assert_well_formed(&buf, 2000);
        for i in 0..buf.len() {
            let r = buf.position(i).length();
            assert!((1.0 - 1e-4..=1.15 + 1e-4).contains(&r), "radius {}", r);
            assert!(colors.contains(&buf.color(i)));
            assert_eq!(buf.group(i), 0);
        }
    }

    #[test]
    fn test_fallback_empty_palette() {
        let buf = generate_fallback_sphere(&mut seeded(2), 100, &[]);
        assert!(buf.iter_colors().all(|c| c == palette::FALLBACK));
    }

    #[test]
    fn test_dispatch_default_tag_is_sphere() {
        let buf = dispatch_tag("default", &mut seeded(3), 500, &[]);
        assert!(buf.iter_positions().all(|p| p.length() >= 1.0 - 1e-4));
    }

    #[test]
    fn test_zero_count() {
        for shape in Shape::ALL {
            let buf = shape.generate(&mut seeded(4), 0, &[]);
            assert!(buf.is_empty());
        }
    }
}
