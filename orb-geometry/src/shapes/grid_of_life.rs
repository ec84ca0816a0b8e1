//! Grid of Life: the 64-tetrahedron vacuum lattice
//!
//! Groups: 0 = vertex nodes, 1 = lattice edges, 2 = inner tetra grid,
//! 3 = outer shell.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, jitter3, random_on_unit_sphere, sample_ball, unit};

const SCALE: f32 = 0.35;
const LEVELS: i32 = 4;
const NODE_RADIUS: f32 = 0.04;
const EDGE_THICKNESS: f32 = 0.008;
const EDGE_MIN: f32 = 0.05;
const EDGE_MAX: f32 = 0.45;
const INNER_EXTENT: f32 = 0.25;
const INNER_CELL: f32 = 0.08;

/// Layered hexagonal vertex set plus central axis and octahedral frame
pub fn grid_vertices() -> Vec<Vec3> {
    let mut vertices = Vec::new();
    let h = (2.0f32 / 3.0).sqrt();

    for layer in -LEVELS..=LEVELS {
        let depth = layer.abs();
        let y = layer as f32 * h * 0.5 * SCALE;
        let offset = if depth % 2 == 0 { 0.0 } else { 0.5 };
        let radius = (LEVELS as f32 - depth as f32 * 0.3) * SCALE;
        let points = (6 * (LEVELS - depth)).max(1);

        for i in 0..points {
            let angle = (i as f32 / points as f32) * TAU + offset;
            let r = radius * (0.3 + (i % 3) as f32 * 0.3);
            vertices.push(Vec3::new(r * angle.cos(), y, r * angle.sin()));
        }
    }

    for i in -3..=3 {
        vertices.push(Vec3::new(0.0, i as f32 * 0.3 * SCALE, 0.0));
    }

    let octa = 1.2 * SCALE;
    vertices.extend([
        Vec3::X * octa,
        Vec3::NEG_X * octa,
        Vec3::Y * octa,
        Vec3::NEG_Y * octa,
        Vec3::Z * octa,
        Vec3::NEG_Z * octa,
    ]);
    vertices
}

/// Connect every vertex pair whose distance falls inside the edge band
pub fn grid_edges(vertices: &[Vec3]) -> Vec<(Vec3, Vec3)> {
    let mut edges = Vec::new();
    for (i, &a) in vertices.iter().enumerate() {
        for &b in &vertices[i + 1..] {
            let d = a.distance(b);
            if d > EDGE_MIN && d < EDGE_MAX {
                edges.push((a, b));
            }
        }
    }
    edges
}

/// Generate the Grid of Life (15% nodes, 55% edges, 20% inner grid, remainder shell)
pub fn generate_grid_of_life<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_purple = Color::from_hex(0x4C1D95);
    let violet = Color::from_hex(0x7C3AED);
    let cyan = Color::from_hex(0x22D3EE);
    let gold = Color::from_hex(0xF59E0B);
    let magenta = Color::from_hex(0xEC4899);

    let vertices = grid_vertices();
    let edges = grid_edges(&vertices);

    let regions = Partition::new(count, &[0.15, 0.55, 0.20]);
    let mut out = ParticleWriter::new(count);

    // Vertex nodes, gold toward the outside
    let per_vertex = regions.count(0) / vertices.len();
    for &v in &vertices {
        let base = Color::WHITE.lerp(gold, v.length() * 1.5);
        for _ in 0..per_vertex {
            let p = v + sample_ball(rng, NODE_RADIUS, 0.5);
            out.push(p, base.lerp(cyan, unit(rng) * 0.3), 0);
        }
    }

    // Edges (also absorbs the node rounding slack)
    let per_edge = regions.count(1) / edges.len().max(1);
    'edges: for &(a, b) in &edges {
        for _ in 0..per_edge {
            if out.cursor() >= regions.end(1) {
                break 'edges;
            }
            let t = unit(rng);
            let p = a.lerp(b, t) + jitter3(rng, EDGE_THICKNESS);
            let c = violet
                .lerp(cyan, t)
                .lerp(magenta, (t * std::f32::consts::PI).sin() * 0.3);
            out.push(p, c, 1);
        }
    }

    // Inner grid: points snapped to a small cubic cell lattice
    while out.cursor() < regions.end(2) {
        let snap = |v: f32| (v / INNER_CELL).round() * INNER_CELL;
        let x = snap(jitter(rng, 2.0 * INNER_EXTENT));
        let y = snap(jitter(rng, 2.0 * INNER_EXTENT));
        let z = snap(jitter(rng, 2.0 * INNER_EXTENT));
        let p = Vec3::new(x, y, z) + jitter3(rng, 0.02);
        let c = deep_purple.lerp(violet, unit(rng)).lerp(Color::WHITE, 0.2);
        out.push(p, c, 2);
    }

    out.fill_remaining(|| {
        let r = 0.9 + unit(rng) * 0.15;
        let p = random_on_unit_sphere(rng) * r;
        let c = deep_purple
            .lerp(cyan, unit(rng) * 0.4)
            .scale(0.4 + unit(rng) * 0.3);
        (p, c, 3)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_vertex_count() {
        // 98 layered + 7 axis + 6 octahedral
        assert_eq!(grid_vertices().len(), 111);
    }

    #[test]
    fn test_edges_within_band() {
        let edges = grid_edges(&grid_vertices());
        assert!(!edges.is_empty());
        for (a, b) in edges {
            let d = a.distance(b);
            assert!(d > EDGE_MIN && d < EDGE_MAX);
        }
    }

    #[test]
    fn test_grid_well_formed() {
        let buf = generate_grid_of_life(&mut seeded(31), 5000);
        assert_well_formed(&buf, 5000);
    }
}
