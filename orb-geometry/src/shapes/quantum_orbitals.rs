//! Quantum orbitals: p and d electron-cloud lobes around a bright nucleus
//!
//! Lobes are placed by rejection sampling against a simplified angular
//! density. Each lobe gets a bounded number of attempts; anything it fails
//! to place is picked up by the ambient fill.
//!
//! Groups: 0..3 = p orbitals (x, y, z), 3..7 = d orbitals (xy, xz, yz, z²),
//! 7 = nucleus, 8..11 = probability shells, 11 = ambient.

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, random_on_unit_sphere, sample_ball, unit};

const SCALE: f32 = 0.85;
const P_ATTEMPTS_PER_PARTICLE: usize = 10;
const D_ATTEMPTS_PER_PARTICLE: usize = 12;
const NUCLEUS_RADIUS: f32 = 0.08 * SCALE;
const SHELL_RADII: [f32; 3] = [0.3, 0.6, 0.9];

/// d orbital angular shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DOrbital {
    Xy,
    Xz,
    Yz,
    Z2,
}

impl DOrbital {
    pub const ALL: [DOrbital; 4] = [DOrbital::Xy, DOrbital::Xz, DOrbital::Yz, DOrbital::Z2];
}

/// p orbital density along `axis` (0 = x, 1 = y, 2 = z)
///
/// `|cos θ| * e^(-2.5 r)`, zero inside the nucleus.
pub fn p_orbital_density(p: Vec3, axis: usize) -> f32 {
    let r = p.length();
    if r < 0.01 {
        return 0.0;
    }
    (p[axis] / r).abs() * (-r * 2.5).exp()
}

/// d orbital density: `|angular| * e^(-2 r)`, zero inside the nucleus
pub fn d_orbital_density(p: Vec3, kind: DOrbital) -> f32 {
    let r = p.length();
    if r < 0.01 {
        return 0.0;
    }
    let r2 = r * r;
    let angular = match kind {
        DOrbital::Xy => p.x * p.y / r2,
        DOrbital::Xz => p.x * p.z / r2,
        DOrbital::Yz => p.y * p.z / r2,
        DOrbital::Z2 => (2.0 * p.z * p.z - p.x * p.x - p.y * p.y) / r2,
    };
    angular.abs() * (-r * 2.0).exp()
}

fn cube_point<R: Rng + ?Sized>(rng: &mut R, side: f32) -> Vec3 {
    Vec3::new(jitter(rng, side), jitter(rng, side), jitter(rng, side))
}

/// Generate quantum orbitals (30% p, 35% d, 10% nucleus, 15% shells, remainder ambient)
pub fn generate_quantum_orbitals<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_blue = Color::from_hex(0x1E3A8A);
    let electric_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);
    let violet = Color::from_hex(0x8B5CF6);
    let purple = Color::from_hex(0xA855F7);

    let regions = Partition::new(count, &[0.30, 0.35, 0.10, 0.15]);
    let mut out = ParticleWriter::new(count);

    let p_tints = [electric_blue, cyan, light_cyan];
    let per_axis = regions.count(0) / 3;
    for (axis, &base) in p_tints.iter().enumerate() {
        let mut placed = 0;
        let mut attempts = 0;
        while placed < per_axis
            && attempts < per_axis * P_ATTEMPTS_PER_PARTICLE
            && out.cursor() < regions.end(0)
        {
            attempts += 1;
            let p = cube_point(rng, 2.0 * SCALE);
            let density = p_orbital_density(p, axis);
            if unit(rng) < density * 3.0 {
                let c = base
                    .lerp(Color::WHITE, density * 0.5)
                    .lerp(violet, unit(rng) * 0.15);
                out.push(p, c, axis as u32);
                placed += 1;
            }
        }
    }

    let d_tints = [violet, purple, electric_blue, cyan];
    let per_kind = regions.count(1) / 4;
    for (k, kind) in DOrbital::ALL.into_iter().enumerate() {
        let mut placed = 0;
        let mut attempts = 0;
        while placed < per_kind
            && attempts < per_kind * D_ATTEMPTS_PER_PARTICLE
            && out.cursor() < regions.end(1)
        {
            attempts += 1;
            let p = cube_point(rng, 1.8 * SCALE);
            let density = d_orbital_density(p, kind);
            if unit(rng) < density * 4.0 {
                let c = d_tints[k]
                    .lerp(light_cyan, density * 0.4)
                    .lerp(Color::WHITE, unit(rng) * 0.2);
                out.push(p, c, 3 + k as u32);
                placed += 1;
            }
        }
    }

    let deficit = regions.end(1).saturating_sub(out.cursor());
    if deficit > 0 {
        tracing::warn!(deficit, "Orbital lobes under budget, ambient fill absorbs the rest");
    }

    let nucleus_tint = Color::WHITE.lerp(cyan, 0.2);
    for _ in 0..regions.count(2) {
        let p = sample_ball(rng, NUCLEUS_RADIUS, 0.3);
        let brightness = 1.0 - (p.length() / NUCLEUS_RADIUS) * 0.3;
        out.push(p, nucleus_tint.scale(0.85 + brightness * 0.15), 7);
    }

    let per_shell = regions.count(3) / SHELL_RADII.len();
    for (s, &radius) in SHELL_RADII.iter().enumerate() {
        for _ in 0..per_shell {
            let r = radius * SCALE + jitter(rng, 0.04);
            let c = deep_blue
                .lerp(electric_blue, s as f32 / SHELL_RADII.len() as f32)
                .lerp(cyan, unit(rng) * 0.3)
                .scale(0.4 + unit(rng) * 0.3);
            out.push(random_on_unit_sphere(rng) * r, c, 8 + s as u32);
        }
    }

    out.fill_remaining(|| {
        let r = 1.1 + unit(rng).powi(2) * 0.4;
        let c = deep_blue.lerp(violet, unit(rng)).scale(0.1 + unit(rng) * 0.08);
        (random_on_unit_sphere(rng) * r, c, 11)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_p_density_peaks_on_axis() {
        let on = p_orbital_density(Vec3::new(0.3, 0.0, 0.0), 0);
        let off = p_orbital_density(Vec3::new(0.0, 0.3, 0.0), 0);
        assert!(on > 0.4);
        assert_eq!(off, 0.0);
        assert_eq!(p_orbital_density(Vec3::ZERO, 0), 0.0);
    }

    #[test]
    fn test_d_density_nodal_planes() {
        assert_eq!(d_orbital_density(Vec3::new(0.5, 0.0, 0.5), DOrbital::Xy), 0.0);
        assert!(d_orbital_density(Vec3::new(0.3, 0.3, 0.0), DOrbital::Xy) > 0.0);
        // z² lobe along Z dominates its equatorial ring
        let axial = d_orbital_density(Vec3::new(0.0, 0.0, 0.4), DOrbital::Z2);
        let ring = d_orbital_density(Vec3::new(0.4, 0.0, 0.0), DOrbital::Z2);
        assert!(axial > ring);
    }

    #[test]
    fn test_quantum_orbitals_well_formed() {
        let buf = generate_quantum_orbitals(&mut seeded(121), 6000);
        assert_well_formed(&buf, 6000);
        // Nucleus is a fixed-size region
        let nucleus = (0..buf.len()).filter(|&i| buf.group(i) == 7).count();
        assert_eq!(nucleus, 600);
        assert!((0..buf.len()).any(|i| buf.group(i) == 11));
    }

    #[test]
    fn test_tiny_counts_terminate() {
        for n in [0, 1, 3, 17] {
            let buf = generate_quantum_orbitals(&mut seeded(122), n);
            assert_eq!(buf.len(), n);
        }
    }
}
