//! Tree of Life: ten sephiroth joined by glowing paths
//!
//! Groups: `0..10` = sephira index, `10 + p` = path `p`, 32 = aura.

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, palette, random_on_unit_sphere, sample_ball, unit};

/// A sephira: named node of the tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sephira {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub color: u32,
}

const fn sephira(name: &'static str, x: f32, y: f32, color: u32) -> Sephira {
    Sephira { name, x, y, color }
}

/// Sephiroth in unscaled layout, crown first
pub const SEPHIROTH: [Sephira; 10] = [
    sephira("Kether", 0.0, 1.6, 0xFFFFFF),
    sephira("Chokmah", 0.6, 1.1, 0x87CEEB),
    sephira("Binah", -0.6, 1.1, 0x4B0082),
    sephira("Chesed", 0.6, 0.5, 0x4169E1),
    sephira("Geburah", -0.6, 0.5, 0xDC143C),
    sephira("Tiphereth", 0.0, 0.3, 0xFFD700),
    sephira("Netzach", 0.6, -0.3, 0x00FF7F),
    sephira("Hod", -0.6, -0.3, 0xFF8C00),
    sephira("Yesod", 0.0, -0.9, 0x9370DB),
    sephira("Malkuth", 0.0, -1.6, 0x228B22),
];

/// Connections between sephiroth (index pairs)
pub const PATHS: [(usize, usize); 20] = [
    (0, 1),
    (0, 2),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 5),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
    (3, 6),
    (4, 5),
    (4, 7),
    (5, 6),
    (5, 7),
    (5, 8),
    (6, 7),
    (6, 8),
    (7, 8),
    (8, 9),
];

const SCALE: f32 = 0.7;
const SPHERE_RADIUS: f32 = 0.12;
const PATH_THICKNESS: f32 = 0.015;
pub const GROUP_AURA: u32 = 32;

/// Generate the Tree of Life (30% sephiroth, 60% paths, remainder aura)
pub fn generate_tree_of_life<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let nodes: Vec<(Vec3, Color)> = SEPHIROTH
        .iter()
        .map(|s| {
            (
                Vec3::new(s.x * SCALE, s.y * SCALE, 0.0),
                Color::from_hex(s.color),
            )
        })
        .collect();
    let path_tint = Color::from_hex(0xADD8E6);

    let regions = Partition::new(count, &[0.30, 0.60]);
    let mut out = ParticleWriter::new(count);

    // Sephiroth: solid spheres, brighter toward the center
    let per_sphere = regions.count(0) / nodes.len();
    for (s, &(center, color)) in nodes.iter().enumerate() {
        for _ in 0..per_sphere {
            let offset = sample_ball(rng, SPHERE_RADIUS, 1.0 / 3.0);
            let brightness = 1.0 - (offset.length() / SPHERE_RADIUS) * 0.5;
            let c = color.lerp(Color::WHITE, brightness * 0.4);
            out.push(center + offset, c, s as u32);
        }
    }

    // Paths: thin lines blending the two endpoint colors
    let per_path = regions.count(1) / PATHS.len();
    'paths: for (p, &(a, b)) in PATHS.iter().enumerate() {
        let (start, start_color) = nodes[a];
        let (end, end_color) = nodes[b];
        for _ in 0..per_path {
            if out.cursor() >= regions.end(1) {
                break 'paths;
            }
            let t = unit(rng);
            let line = start.lerp(end, t);
            let pos = Vec3::new(
                line.x + (unit(rng) - 0.5) * PATH_THICKNESS,
                line.y + (unit(rng) - 0.5) * PATH_THICKNESS,
                (unit(rng) - 0.5) * PATH_THICKNESS,
            );
            let c = start_color.lerp(end_color, t).lerp(path_tint, 0.3);
            out.push(pos, c, 10 + p as u32);
        }
    }

    out.fill_remaining(|| {
        let r = 1.2 + unit(rng) * 0.5;
        let p = random_on_unit_sphere(rng) * r;
        let c = Color::WHITE
            .lerp(palette::GOLD, unit(rng) * 0.3)
            .scale(0.3 + unit(rng) * 0.2);
        (p, c, GROUP_AURA)
    });

    out.finish()
}
