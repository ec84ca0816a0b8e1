//! Sri Yantra: nine interlocking triangles around the bindu
//!
//! Four upward triangles (gold) and five downward triangles (magenta),
//! each pushed to its own depth layer so the weave reads in 3D.
//!
//! Groups: 0 = bindu, `1 + t` = triangle `t`, 10 = vertex nodes,
//! 11 = enclosing lotus circles.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, palette, sample_ball, unit};

const SCALE: f32 = 0.8;
const BINDU_RADIUS: f32 = 0.06;
const NODE_RADIUS: f32 = 0.025;
const EDGE_THICKNESS: f32 = 0.012;
const NODE_MERGE_DISTANCE: f32 = 0.05;
const LOTUS_RADII: [f32; 3] = [1.1, 1.3, 1.5];

/// Number of upward triangles; the rest point down
pub const UPWARD: usize = 4;

const fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Triangle vertices in unscaled layout, upward triangles first
pub const TRIANGLES: [[Vec2; 3]; 9] = [
    [v(0.0, 0.95), v(-0.85, -0.55), v(0.85, -0.55)],
    [v(0.0, 0.7), v(-0.65, -0.35), v(0.65, -0.35)],
    [v(0.0, 0.45), v(-0.45, -0.2), v(0.45, -0.2)],
    [v(0.0, 0.25), v(-0.25, -0.1), v(0.25, -0.1)],
    [v(0.0, -0.95), v(-0.8, 0.5), v(0.8, 0.5)],
    [v(0.0, -0.65), v(-0.6, 0.3), v(0.6, 0.3)],
    [v(0.0, -0.4), v(-0.42, 0.15), v(0.42, 0.15)],
    [v(0.0, -0.2), v(-0.28, 0.08), v(0.28, 0.08)],
    [v(0.0, -0.08), v(-0.15, 0.03), v(0.15, 0.03)],
];

/// Scaled triangle vertices with near-duplicates merged
pub fn unique_vertices() -> Vec<Vec3> {
    let mut unique: Vec<Vec3> = Vec::new();
    for p in TRIANGLES.iter().flatten() {
        let node = (*p * SCALE).extend(0.0);
        if unique.iter().all(|u| u.distance(node) >= NODE_MERGE_DISTANCE) {
            unique.push(node);
        }
    }
    unique
}

/// Generate the Sri Yantra (8% bindu, 70% triangles, 12% nodes, remainder lotus)
pub fn generate_sri_yantra<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let magenta = Color::from_hex(0xFF1493);
    let orange = Color::from_hex(0xFF6B35);
    let crimson = Color::from_hex(0xDC143C);

    let regions = Partition::new(count, &[0.08, 0.70, 0.12]);
    let mut out = ParticleWriter::new(count);

    for _ in 0..regions.count(0) {
        let p = sample_ball(rng, BINDU_RADIUS, 0.5);
        out.push(p, Color::WHITE.lerp(palette::GOLD, unit(rng) * 0.4), 0);
    }

    // Triangle edges, each triangle on its own depth layer
    let per_edge = regions.count(1) / TRIANGLES.len() / 3;
    for (t, tri) in TRIANGLES.iter().enumerate() {
        let upward = t < UPWARD;
        let (base, accent) = if upward {
            (palette::GOLD, palette::DEEP_GOLD)
        } else {
            (magenta, crimson)
        };
        let depth = (t as f32 / TRIANGLES.len() as f32) * 0.15;
        let layer = if upward { depth } else { -depth };

        for e in 0..3 {
            let (a, b) = (tri[e], tri[(e + 1) % 3]);
            for i in 0..per_edge {
                let edge_t = i as f32 / per_edge as f32;
                let xy = a.lerp(b, edge_t) * SCALE;
                let p = Vec3::new(
                    xy.x + jitter(rng, EDGE_THICKNESS),
                    xy.y + jitter(rng, EDGE_THICKNESS),
                    layer + jitter(rng, 0.02),
                );
                let c = base
                    .lerp(accent, edge_t)
                    .lerp(Color::WHITE, unit(rng) * 0.15);
                out.push(p, c, 1 + t as u32);
            }
        }
    }

    // Vertex nodes (absorbs triangle rounding slack)
    let nodes = unique_vertices();
    let per_node = (regions.count(2) / nodes.len()).max(1);
    'nodes: for &node in &nodes {
        for _ in 0..per_node {
            if out.cursor() >= regions.end(2) {
                break 'nodes;
            }
            let p = node + sample_ball(rng, NODE_RADIUS, 0.5);
            let c = orange.lerp(palette::GOLD, unit(rng)).lerp(Color::WHITE, 0.3);
            out.push(p, c, 10);
        }
    }

    out.fill_remaining(|| {
        let radius = LOTUS_RADII[rng.random_range(0..LOTUS_RADII.len())] * SCALE;
        let angle = unit(rng) * TAU;
        let r = radius + jitter(rng, 0.015);
        let p = Vec3::new(r * angle.cos(), r * angle.sin(), jitter(rng, 0.05));
        let c = palette::GOLD
            .lerp(palette::DEEP_GOLD, unit(rng))
            .scale(0.4 + unit(rng) * 0.3);
        (p, c, 11)
    });

    out.finish()
}
