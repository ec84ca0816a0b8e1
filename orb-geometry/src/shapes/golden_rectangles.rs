//! Golden rectangles: three mutually perpendicular φ-proportioned frames
//!
//! The rectangles span the XY, YZ and ZX planes with their long sides on
//! different axes, the classic icosahedron skeleton.
//!
//! Groups: 0..3 = rectangle frames, 3 = axis crossing nodes,
//! 4 = center, 5 = aura.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter3, palette, random_on_unit_sphere, sample_ball, unit};

/// Golden ratio as used for the frame proportions
pub const PHI: f32 = 1.618;

const SCALE: f32 = 0.65;
const WIDTH: f32 = SCALE;
const HEIGHT: f32 = PHI * SCALE;
const EDGE_THICKNESS: f32 = 0.018;
const NODE_RADIUS: f32 = 0.06;
const CENTER_RADIUS: f32 = 0.08;

/// Corner loops of the three rectangles, in drawing order
pub fn rectangles() -> [[Vec3; 4]; 3] {
    let (w, h) = (WIDTH / 2.0, HEIGHT / 2.0);
    [
        // XY: width along X, height along Y
        [
            Vec3::new(-w, -h, 0.0),
            Vec3::new(w, -h, 0.0),
            Vec3::new(w, h, 0.0),
            Vec3::new(-w, h, 0.0),
        ],
        // YZ: width along Y, height along Z
        [
            Vec3::new(0.0, -w, -h),
            Vec3::new(0.0, w, -h),
            Vec3::new(0.0, w, h),
            Vec3::new(0.0, -w, h),
        ],
        // ZX: height along X, width along Z
        [
            Vec3::new(-h, 0.0, -w),
            Vec3::new(h, 0.0, -w),
            Vec3::new(h, 0.0, w),
            Vec3::new(-h, 0.0, w),
        ],
    ]
}

/// The twelve points where the frames cross the coordinate axes
pub fn axis_nodes() -> [Vec3; 12] {
    let (w, h) = (WIDTH / 2.0, HEIGHT / 2.0);
    [
        Vec3::Y * h,
        Vec3::NEG_Y * h,
        Vec3::Y * w,
        Vec3::NEG_Y * w,
        Vec3::Z * h,
        Vec3::NEG_Z * h,
        Vec3::Z * w,
        Vec3::NEG_Z * w,
        Vec3::X * h,
        Vec3::NEG_X * h,
        Vec3::X * w,
        Vec3::NEG_X * w,
    ]
}

/// Generate the golden rectangles (65% frames, 15% nodes, 8% center, remainder aura)
pub fn generate_golden_rectangles<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_gold = Color::from_hex(0xB8860B);
    let orange = Color::from_hex(0xFF8C00);
    let light_gold = Color::from_hex(0xFFF4D6);

    let tints = [
        (palette::GOLD, palette::AMBER),
        (palette::BRONZE, orange),
        (deep_gold, light_gold),
    ];

    let regions = Partition::new(count, &[0.65, 0.15, 0.08]);
    let mut out = ParticleWriter::new(count);

    let per_edge = regions.count(0) / 3 / 4;
    for (r, corners) in rectangles().iter().enumerate() {
        let (base, accent) = tints[r];
        for e in 0..4 {
            let (a, b) = (corners[e], corners[(e + 1) % 4]);
            for i in 0..per_edge {
                let t = i as f32 / per_edge as f32;
                let p = a.lerp(b, t) + jitter3(rng, EDGE_THICKNESS);
                let c = base
                    .lerp(accent, (t * PI).sin())
                    .lerp(Color::WHITE, unit(rng) * 0.1);
                out.push(p, c, r as u32);
            }
        }
    }

    // Axis crossings (absorbs frame rounding slack)
    let nodes = axis_nodes();
    let per_node = (regions.count(1) / nodes.len()).max(1);
    let node_tint = Color::WHITE.lerp(palette::GOLD, 0.3);
    'nodes: for &node in &nodes {
        for _ in 0..per_node {
            if out.cursor() >= regions.end(1) {
                break 'nodes;
            }
            let offset = sample_ball(rng, NODE_RADIUS, 0.4);
            let brightness = 1.0 - (offset.length() / NODE_RADIUS) * 0.5;
            out.push(node + offset, node_tint.scale(0.7 + brightness * 0.3), 3);
        }
    }

    let center_tint = Color::WHITE.lerp(palette::GOLD, 0.2);
    while out.cursor() < regions.end(2) {
        let p = sample_ball(rng, CENTER_RADIUS, 0.3);
        let brightness = 1.0 - (p.length() / CENTER_RADIUS) * 0.3;
        out.push(p, center_tint.scale(0.85 + brightness * 0.15), 4);
    }

    out.fill_remaining(|| {
        let r = 1.2 + unit(rng).powi(2) * 0.4;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 1.0, 0.4);
        let c = deep_gold
            .lerp(palette::AMBER, unit(rng))
            .lerp(Color::WHITE, unit(rng) * 0.15)
            .scale(0.2 + unit(rng) * 0.15);
        (p, c, 5)
    });

    out.finish()
}
