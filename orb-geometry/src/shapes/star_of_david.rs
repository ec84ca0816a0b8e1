//! Star of David: two interlocking equilateral triangles
//!
//! The upward triangle floats slightly in front, the downward one behind.
//! Groups: 0 = upward edges (blue), 1 = downward edges (gold),
//! 2 = star points, 3 = center bindu, 4 = halo.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, random_on_unit_sphere, sample_ball, unit};

const RADIUS: f32 = 1.2;
const LAYER_Z: f32 = 0.06;
const EDGE_THICKNESS: f32 = 0.012;
const NODE_RADIUS: f32 = 0.10;
const BINDU_RADIUS: f32 = 0.05;

/// Upward and downward triangle vertices for circumradius `r`
pub fn hexagram(r: f32) -> ([Vec2; 3], [Vec2; 3]) {
    let at = |deg: f32| Vec2::from_angle(deg * PI / 180.0) * r;
    (
        [Vec2::new(0.0, r), at(210.0), at(330.0)],
        [Vec2::new(0.0, -r), at(30.0), at(150.0)],
    )
}

/// Generate the hexagram (55% edges, 25% points, 8% bindu, remainder halo)
pub fn generate_star_of_david<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_blue = Color::from_hex(0x1E40AF);
    let royal_blue = Color::from_hex(0x3B82F6);
    let sky_blue = Color::from_hex(0x0EA5E9);
    let light_blue = Color::from_hex(0x7DD3FC);
    let gold = Color::from_hex(0xFBBF24);
    let pale_gold = Color::from_hex(0xFDE68A);

    let (up, down) = hexagram(RADIUS);
    let regions = Partition::new(count, &[0.55, 0.25, 0.08]);
    let mut out = ParticleWriter::new(count);

    // Edges: evenly spaced along each side, brightest at midpoints
    let per_edge = regions.count(0) / 6;
    let triangles = [(&up, LAYER_Z, sky_blue, light_blue, 0), (&down, -LAYER_Z, gold, pale_gold, 1)];
    for (verts, z, from, to, group) in triangles {
        for e in 0..3 {
            let (a, b) = (verts[e], verts[(e + 1) % 3]);
            for i in 0..per_edge {
                let t = i as f32 / per_edge as f32;
                let xy = a.lerp(b, t);
                let p = Vec3::new(
                    xy.x + jitter(rng, EDGE_THICKNESS),
                    xy.y + jitter(rng, EDGE_THICKNESS),
                    z + jitter(rng, 0.015),
                );
                let c = from
                    .lerp(to, (t * PI).sin())
                    .lerp(Color::WHITE, unit(rng) * 0.12);
                out.push(p, c, group);
            }
        }
    }

    // Star points: flattened glow balls on each vertex
    let per_vertex = regions.count(1) / 6;
    let points = up.iter().map(|v| (*v, true)).chain(down.iter().map(|v| (*v, false)));
    'points: for (v, upward) in points {
        let (z, tint) = if upward {
            (LAYER_Z, Color::WHITE.lerp(light_blue, 0.4))
        } else {
            (-LAYER_Z, Color::WHITE.lerp(pale_gold, 0.5))
        };
        for _ in 0..per_vertex {
            if out.cursor() >= regions.end(1) {
                break 'points;
            }
            let offset = sample_ball(rng, NODE_RADIUS, 0.4);
            let brightness = 1.0 - (offset.length() / NODE_RADIUS) * 0.6;
            let p = Vec3::new(v.x + offset.x, v.y + offset.y, z + offset.z * 0.3);
            out.push(p, tint.scale(0.7 + brightness * 0.3), 2);
        }
    }

    // Bindu
    let bindu = Color::WHITE.lerp(gold, 0.15);
    while out.cursor() < regions.end(2) {
        let p = sample_ball(rng, BINDU_RADIUS, 0.3);
        let brightness = 1.0 - (p.length() / BINDU_RADIUS) * 0.3;
        out.push(p, bindu.scale(0.8 + brightness * 0.2), 3);
    }

    out.fill_remaining(|| {
        let r = 1.3 + unit(rng).powi(2) * 0.35;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 1.0, 0.3);
        let c = deep_blue
            .lerp(royal_blue, unit(rng))
            .lerp(Color::WHITE, unit(rng) * 0.15)
            .scale(0.2 + unit(rng) * 0.15);
        (p, c, 4)
    });

    out.finish()
}
