//! Wave interference: two crossed sine waves over their superposed surface
//!
//! Groups: 0 = XY wave, 1 = XZ wave, 2 = interference surface,
//! 3 = constructive nodes, 4 = ambient.

use std::f32::consts::{FRAC_PI_4, PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, random_on_unit_sphere, sample_ball, unit};

const SCALE: f32 = 1.0;
const FREQ_1: f32 = 3.0;
const FREQ_2: f32 = 4.0;
const FREQ_3: f32 = 2.5;
const AMPLITUDE: f32 = 0.3 * SCALE;
const WAVE_THICKNESS: f32 = 0.025;
const NODE_RADIUS: f32 = 0.05;

/// Height of the three-wave superposition at `(u, v)`
///
/// Returns `(height, third_wave)`; the third wave tints the surface.
pub fn interference(u: f32, v: f32) -> (f32, f32) {
    let w1 = (u * FREQ_1 * PI).sin();
    let w2 = (v * FREQ_2 * PI).sin();
    let w3 = ((u + v) * FREQ_3 * PI).sin();
    ((w1 + w2 + w3) / 3.0 * AMPLITUDE * 0.8, w3)
}

/// Grid points on a 0.4 lattice where the two primary waves reinforce
pub fn constructive_nodes() -> Vec<Vec3> {
    let mut nodes = Vec::new();
    for i in -2i32..=2 {
        for j in -2i32..=2 {
            let x = i as f32 * 0.4 * SCALE;
            let z = j as f32 * 0.4 * SCALE;
            let sum = (x * FREQ_1 * PI).sin() + (z * FREQ_2 * PI).sin();
            if sum.abs() > 1.5 {
                nodes.push(Vec3::new(x, sum / 2.0 * AMPLITUDE, z));
            }
        }
    }
    nodes
}

/// Generate wave interference (30/30% waves, 25% surface, 8% nodes, remainder ambient)
pub fn generate_wave_interference<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_blue = Color::from_hex(0x1E3A8A);
    let electric_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let violet = Color::from_hex(0x8B5CF6);
    let magenta = Color::from_hex(0xD946EF);

    let regions = Partition::new(count, &[0.30, 0.30, 0.25, 0.08]);
    let mut out = ParticleWriter::new(count);

    let n = regions.count(0);
    for i in 0..n {
        let s = i as f32 / n as f32;
        let t = s * TAU * 2.0;
        let x = (s - 0.5) * 2.0 * SCALE;
        let y = (t * FREQ_1).sin() * AMPLITUDE;
        let p = Vec3::new(
            x + jitter(rng, WAVE_THICKNESS),
            y + jitter(rng, WAVE_THICKNESS),
            jitter(rng, 0.04),
        );
        let c = cyan
            .lerp(electric_blue, t.sin() * 0.5 + 0.5)
            .lerp(Color::WHITE, unit(rng) * 0.15);
        out.push(p, c, 0);
    }

    let n = regions.count(1);
    for i in 0..n {
        let s = i as f32 / n as f32;
        let t = s * TAU * 2.0;
        let x = (s - 0.5) * 2.0 * SCALE;
        let z = (t * FREQ_2 + FRAC_PI_4).sin() * AMPLITUDE;
        let p = Vec3::new(
            x + jitter(rng, WAVE_THICKNESS),
            jitter(rng, 0.04),
            z + jitter(rng, WAVE_THICKNESS),
        );
        let c = violet
            .lerp(magenta, t.sin() * 0.5 + 0.5)
            .lerp(Color::WHITE, unit(rng) * 0.15);
        out.push(p, c, 1);
    }

    for _ in 0..regions.count(2) {
        let u = jitter(rng, 2.0 * SCALE);
        let v = jitter(rng, 2.0 * SCALE);
        let (height, third) = interference(u, v);
        let strength = height.abs() / AMPLITUDE;
        let c = electric_blue
            .lerp(cyan, strength)
            .lerp(violet, third.abs() * 0.4)
            .lerp(Color::WHITE, strength * 0.3)
            .scale(0.5 + strength * 0.5);
        out.push(Vec3::new(u, height, v), c, 2);
    }

    let nodes = constructive_nodes();
    let per_node = (regions.count(3) / nodes.len().max(1)).max(1);
    let node_tint = Color::WHITE.lerp(cyan, 0.3);
    'nodes: for &node in &nodes {
        for _ in 0..per_node {
            if out.cursor() >= regions.end(3) {
                break 'nodes;
            }
            let offset = sample_ball(rng, NODE_RADIUS, 0.4);
            let brightness = 1.0 - (offset.length() / NODE_RADIUS) * 0.4;
            out.push(node + offset, node_tint.scale(0.8 + brightness * 0.2), 3);
        }
    }

    out.fill_remaining(|| {
        let r = 1.1 + unit(rng).powi(2) * 0.4;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 0.5, 1.0);
        let c = deep_blue.lerp(violet, unit(rng)).scale(0.12 + unit(rng) * 0.08);
        (p, c, 4)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_nodes_are_constructive() {
        let nodes = constructive_nodes();
        assert!(!nodes.is_empty());
        assert!(nodes.len() <= 25);
        for n in &nodes {
            assert!(n.y.abs() > 0.75 * AMPLITUDE - 1e-5);
        }
    }

    #[test]
    fn test_interference_bounded() {
        for i in 0..50 {
            for j in 0..50 {
                let (h, _) = interference(i as f32 / 25.0 - 1.0, j as f32 / 25.0 - 1.0);
                assert!(h.abs() <= AMPLITUDE * 0.8 + 1e-6);
            }
        }
    }

    #[test]
    fn test_wave_interference_well_formed() {
        let buf = generate_wave_interference(&mut seeded(111), 5000);
        assert_well_formed(&buf, 5000);
        let surface = (0..buf.len()).filter(|&i| buf.group(i) == 2).count();
        assert_eq!(surface, 1250);
    }
}
