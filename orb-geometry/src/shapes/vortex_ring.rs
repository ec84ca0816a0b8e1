//! Vortex ring: a toroidal vortex with spiralling flow lines
//!
//! Groups: 0 = torus surface, 1 = flow lines, 2 = tube core,
//! 3 = inflowing outer vortex, 4 = ambient.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, jitter3, random_on_unit_sphere, unit};

const SCALE: f32 = 0.9;
const MAJOR: f32 = 0.7 * SCALE;
const MINOR: f32 = 0.25 * SCALE;
const FLOW_LINES: usize = 12;

/// Torus point with tube angle `u` and ring angle `v`, Y as the ring axis
pub fn torus_point(major: f32, minor: f32, u: f32, v: f32) -> Vec3 {
    let ring = major + minor * u.cos();
    Vec3::new(ring * v.cos(), minor * u.sin(), ring * v.sin())
}

/// Generate the vortex ring (45% surface, 25% flow, 12% core, 10% outer, remainder dust)
pub fn generate_vortex_ring<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_blue = Color::from_hex(0x1E40AF);
    let electric_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);
    let purple = Color::from_hex(0x8B5CF6);

    let regions = Partition::new(count, &[0.45, 0.25, 0.12, 0.10]);
    let mut out = ParticleWriter::new(count);

    for _ in 0..regions.count(0) {
        let u = unit(rng) * TAU;
        let v = unit(rng) * TAU;
        let p = torus_point(MAJOR, MINOR, u, v) + jitter3(rng, 0.02);
        let around = v / TAU;
        let c = cyan
            .lerp(electric_blue, (around * TAU).sin() * 0.5 + 0.5)
            .lerp(light_cyan, u.cos() * 0.3 + 0.3)
            .lerp(Color::WHITE, unit(rng) * 0.1);
        out.push(p, c, 0);
    }

    // Flow lines wind three times around the ring and twice around the tube
    let per_line = regions.count(1) / FLOW_LINES;
    for line in 0..FLOW_LINES {
        let offset = (line as f32 / FLOW_LINES as f32) * TAU;
        for i in 0..per_line {
            let t = i as f32 / per_line as f32;
            let v = t * TAU * 3.0;
            let u = offset + t * TAU * 2.0;
            let p = torus_point(MAJOR, MINOR * 0.7, u, v) + jitter3(rng, 0.015);
            let brightness = (t * PI).sin() * 0.5 + 0.5;
            let c = light_cyan
                .lerp(Color::WHITE, brightness * 0.4)
                .lerp(purple, (t * PI * 4.0).sin() * 0.2 + 0.1);
            out.push(p, c, 1);
        }
    }

    // Thin bright core along the tube center (absorbs flow slack)
    let core_radius = MINOR * 0.15;
    while out.cursor() < regions.end(2) {
        let v = unit(rng) * TAU;
        let p = torus_point(MAJOR, core_radius, unit(rng) * TAU, v);
        out.push(p, Color::WHITE.lerp(light_cyan, unit(rng) * 0.3), 2);
    }

    for _ in 0..regions.count(3) {
        let v = unit(rng) * TAU;
        let s = unit(rng);
        let radius = MAJOR * (1.3 + s * 0.5);
        let angle = v + s * PI;
        let p = Vec3::new(radius * angle.cos(), jitter(rng, 0.6), radius * angle.sin());
        let c = purple.lerp(deep_blue, s).scale(0.4 + (1.0 - s) * 0.4);
        out.push(p, c, 3);
    }

    out.fill_remaining(|| {
        let r = 1.1 + unit(rng).powi(2) * 0.4;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 0.5, 1.0);
        let c = deep_blue.lerp(purple, unit(rng)).scale(0.12 + unit(rng) * 0.08);
        (p, c, 4)
    });

    out.finish()
}
