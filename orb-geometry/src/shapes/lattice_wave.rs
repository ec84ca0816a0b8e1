//! Lattice wave: a cubic grid rippled by a travelling displacement field
//!
//! Groups: 0 = grid nodes, 1 = grid edges, 2 = free wave particles,
//! 3 = glow shell, 4 = ambient.

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, jitter3, random_on_unit_sphere, sample_ball, unit};

const SCALE: f32 = 0.9;
/// Cells per side
pub const GRID_SIZE: usize = 8;
const CELL_SIZE: f32 = 0.2 * SCALE;
const GRID_EXTENT: f32 = GRID_SIZE as f32 * CELL_SIZE / 2.0;
const FREQ_1: f32 = 2.5;
const FREQ_2: f32 = 3.0;
const AMPLITUDE: f32 = 0.08 * SCALE;
const NODE_RADIUS: f32 = 0.025;
const EDGE_THICKNESS: f32 = 0.008;

/// Lattice vertices: `(GRID_SIZE + 1)^3`
pub const NODE_COUNT: usize = (GRID_SIZE + 1) * (GRID_SIZE + 1) * (GRID_SIZE + 1);
/// Lattice edges along all three axes
pub const EDGE_COUNT: usize = GRID_SIZE * (GRID_SIZE + 1) * (GRID_SIZE + 1) * 3;

/// Displacement of the field at `p`; the vertical component dominates
pub fn wave_displacement(p: Vec3) -> Vec3 {
    let w1 = (p.x * FREQ_1 + p.y * FREQ_2).sin() * AMPLITUDE;
    let w2 = (p.y * FREQ_2 + p.z * FREQ_1).sin() * AMPLITUDE;
    let w3 = (p.z * FREQ_1 + p.x * FREQ_2).sin() * AMPLITUDE;
    Vec3::new(w2 * 0.5, w1, w3 * 0.5)
}

/// Undisplaced position of lattice index `(xi, yi, zi)`
fn lattice_point(xi: usize, yi: usize, zi: usize) -> Vec3 {
    let half = GRID_SIZE as f32 / 2.0;
    Vec3::new(xi as f32 - half, yi as f32 - half, zi as f32 - half) * CELL_SIZE
}

/// All lattice edges as `(start, axis)` with `axis` 0 = X, 1 = Y, 2 = Z
pub fn lattice_edges() -> Vec<(Vec3, usize)> {
    let mut edges = Vec::with_capacity(EDGE_COUNT);
    for axis in 0..3 {
        for xi in 0..=GRID_SIZE {
            for yi in 0..=GRID_SIZE {
                for zi in 0..=GRID_SIZE {
                    let along = [xi, yi, zi][axis];
                    if along < GRID_SIZE {
                        edges.push((lattice_point(xi, yi, zi), axis));
                    }
                }
            }
        }
    }
    edges
}

/// Generate the lattice wave (25% nodes, 35% edges, 25% wave, 8% glow, remainder ambient)
pub fn generate_lattice_wave<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_blue = Color::from_hex(0x1E3A8A);
    let electric_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);
    let teal = Color::from_hex(0x14B8A6);

    let regions = Partition::new(count, &[0.25, 0.35, 0.25, 0.08]);
    let mut out = ParticleWriter::new(count);

    let per_node = (regions.count(0) / NODE_COUNT).max(1);
    'nodes: for xi in 0..=GRID_SIZE {
        for yi in 0..=GRID_SIZE {
            for zi in 0..=GRID_SIZE {
                let base = lattice_point(xi, yi, zi);
                let wave = wave_displacement(base);
                let intensity = wave.y.abs() / AMPLITUDE;
                let c = light_cyan
                    .lerp(Color::WHITE, intensity * 0.5)
                    .scale(0.6 + intensity * 0.4);
                for _ in 0..per_node {
                    if out.cursor() >= regions.end(0) {
                        break 'nodes;
                    }
                    out.push(base + wave + sample_ball(rng, NODE_RADIUS, 0.5), c, 0);
                }
            }
        }
    }

    let edge_tints = [
        (cyan, electric_blue),
        (teal, cyan),
        (electric_blue, teal),
    ];
    let per_edge = (regions.count(1) / EDGE_COUNT).max(1);
    'edges: for (start, axis) in lattice_edges() {
        let (from, to) = edge_tints[axis];
        for i in 0..per_edge {
            if out.cursor() >= regions.end(1) {
                break 'edges;
            }
            let t = i as f32 / per_edge as f32;
            let mut p = start;
            p[axis] += t * CELL_SIZE;
            let wave = wave_displacement(p);
            let c = from.lerp(to, t).scale(0.5 + wave.y.abs() / AMPLITUDE * 0.3);
            out.push(p + wave + jitter3(rng, EDGE_THICKNESS), c, 1);
        }
    }

    let span = GRID_SIZE as f32 * CELL_SIZE * 1.1;
    for _ in 0..regions.count(2) {
        let p = Vec3::new(jitter(rng, span), jitter(rng, span), jitter(rng, span));
        let wave = wave_displacement(p);
        let phase = (p.x * FREQ_1 + p.y * FREQ_2 + p.z * FREQ_1).sin();
        let c = cyan
            .lerp(light_cyan, (phase + 1.0) / 2.0)
            .lerp(Color::WHITE, phase.abs() * 0.3)
            .scale(0.4 + phase.abs() * 0.4);
        out.push(p + wave * 2.0, c, 2);
    }

    for _ in 0..regions.count(3) {
        let r = GRID_EXTENT * 1.2 + unit(rng) * 0.2;
        let c = deep_blue
            .lerp(cyan, unit(rng) * 0.4)
            .scale(0.2 + unit(rng) * 0.15);
        out.push(random_on_unit_sphere(rng) * r, c, 3);
    }

    out.fill_remaining(|| {
        let r = 1.2 + unit(rng).powi(2) * 0.4;
        let c = deep_blue.lerp(teal, unit(rng)).scale(0.08 + unit(rng) * 0.06);
        (random_on_unit_sphere(rng) * r, c, 4)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_lattice_counts() {
        assert_eq!(NODE_COUNT, 729);
        assert_eq!(EDGE_COUNT, 1944);
        assert_eq!(lattice_edges().len(), EDGE_COUNT);
    }

    #[test]
    fn test_edges_stay_in_grid() {
        for (start, axis) in lattice_edges() {
            let mut end = start;
            end[axis] += CELL_SIZE;
            assert!(end.abs().max_element() <= GRID_EXTENT + 1e-5);
        }
    }

    #[test]
    fn test_displacement_bounded() {
        for i in 0..20 {
            let p = Vec3::splat(i as f32 * 0.1 - 1.0);
            let d = wave_displacement(p);
            assert!(d.y.abs() <= AMPLITUDE + 1e-6);
            assert!(d.x.abs() <= AMPLITUDE * 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_lattice_wave_well_formed() {
        let buf = generate_lattice_wave(&mut seeded(151), 8000);
        assert_well_formed(&buf, 8000);
        // 2000-particle node region: two per lattice vertex
        let nodes = (0..buf.len()).filter(|&i| buf.group(i) == 0).count();
        assert_eq!(nodes, NODE_COUNT * 2);
    }
}
