//! Starburst nova: a white-hot core with radial rays and spiralling debris
//!
//! Groups: 0 = core, 1 = major rays, 2 = minor rays, 3 = trails, 4 = ambient.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, jitter3, random_on_unit_sphere, sample_ball, spherical, unit};

const SCALE: f32 = 0.95;
const MAJOR_RAYS: usize = 12;
const MINOR_RAYS: usize = 24;
const CORE_RADIUS: f32 = 0.12 * SCALE;
const MAX_RAY_LENGTH: f32 = 1.1 * SCALE;

/// Direction of major ray `ray`: evenly spread in azimuth, banded in latitude
fn major_ray_direction<R: Rng + ?Sized>(rng: &mut R, ray: usize) -> Vec3 {
    let theta = (ray as f32 / MAJOR_RAYS as f32) * TAU + jitter(rng, 0.3);
    let band = (ray % 3) as f32 / 3.0 + unit(rng) * 0.3;
    let phi = (2.0 * band - 1.0).clamp(-1.0, 1.0).acos();
    spherical(theta, phi, 1.0)
}

/// Orthonormal pair perpendicular to a ray direction
fn ray_frame(dir: Vec3) -> (Vec3, Vec3) {
    let up = if dir.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let perp1 = dir.cross(up).normalize();
    let perp2 = dir.cross(perp1).normalize();
    (perp1, perp2)
}

/// Generate the starburst nova (15% core, 35% major, 25% minor, 15% trails, remainder ambient)
pub fn generate_starburst_nova<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let hot_white = Color::from_hex(0xF0F8FF);
    let electric_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);
    let deep_blue = Color::from_hex(0x1E40AF);
    let violet = Color::from_hex(0x8B5CF6);

    let regions = Partition::new(count, &[0.15, 0.35, 0.25, 0.15]);
    let mut out = ParticleWriter::new(count);

    for _ in 0..regions.count(0) {
        let p = sample_ball(rng, CORE_RADIUS, 0.4);
        let brightness = 1.0 - (p.length() / CORE_RADIUS) * 0.3;
        let c = Color::WHITE
            .lerp(hot_white, unit(rng) * 0.3)
            .scale(0.9 + brightness * 0.1);
        out.push(p, c, 0);
    }

    // Major rays taper from the core outward
    let per_major = regions.count(1) / MAJOR_RAYS;
    for ray in 0..MAJOR_RAYS {
        let dir = major_ray_direction(rng, ray);
        let length = MAX_RAY_LENGTH * (0.7 + unit(rng) * 0.3);
        let (perp1, perp2) = ray_frame(dir);
        for i in 0..per_major {
            let t = (i as f32 / per_major as f32).powf(0.6);
            let dist = CORE_RADIUS + t * length;
            let thickness = 0.04 * (1.0 - t * 0.7);
            let angle = unit(rng) * TAU;
            let offset = unit(rng) * thickness;
            let p = dir * dist + (perp1 * angle.cos() + perp2 * angle.sin()) * offset;
            let c = Color::WHITE
                .lerp(light_cyan, t * 0.6)
                .lerp(electric_blue, t * 0.4)
                .scale(1.0 - t * 0.4);
            out.push(p, c, 1);
        }
    }

    let per_minor = regions.count(2) / MINOR_RAYS;
    for _ in 0..MINOR_RAYS {
        let dir = random_on_unit_sphere(rng);
        let length = MAX_RAY_LENGTH * (0.4 + unit(rng) * 0.4);
        for i in 0..per_minor {
            let t = (i as f32 / per_minor as f32).sqrt();
            let dist = CORE_RADIUS * 0.8 + t * length;
            let p = dir * dist + jitter3(rng, 0.02 * (1.0 - t * 0.6));
            let c = cyan
                .lerp(violet, t * 0.5)
                .lerp(light_cyan, unit(rng) * 0.2)
                .scale(0.7 - t * 0.3);
            out.push(p, c, 2);
        }
    }

    // Debris with a slight radial twist (absorbs ray slack)
    let trail_span = MAX_RAY_LENGTH * 1.2;
    while out.cursor() < regions.end(3) {
        let theta = unit(rng) * TAU;
        let phi = (2.0 * unit(rng) - 1.0).acos();
        let r = CORE_RADIUS + unit(rng).powf(0.8) * trail_span;
        let twist = 0.05 * (r * 2.0).sin();
        let dist_factor = (r - CORE_RADIUS) / trail_span;
        let c = electric_blue
            .lerp(deep_blue, dist_factor)
            .scale(0.4 - dist_factor * 0.25);
        out.push(spherical(theta + twist, phi, r), c, 3);
    }

    out.fill_remaining(|| {
        let r = 1.2 + unit(rng).powi(2) * 0.4;
        let c = deep_blue.lerp(violet, unit(rng)).scale(0.08 + unit(rng) * 0.06);
        (random_on_unit_sphere(rng) * r, c, 4)
    });

    out.finish()
}
