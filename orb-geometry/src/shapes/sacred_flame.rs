//! Sacred flame: a tapering spiral flame with rising embers
//!
//! Flame tongues and ember drift are perturbed by [`scalar_noise3`], so the
//! silhouette wobbles without any per-frame animation.
//!
//! Groups: 0 = core flame, 1 = spiral streams, 2 = embers, 3 = outer glow,
//! 4 = ambient.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, jitter3, random_on_unit_sphere, scalar_noise3, unit};

const SCALE: f32 = 0.95;
const FLAME_HEIGHT: f32 = 2.0 * SCALE;
const BASE_RADIUS: f32 = 0.35 * SCALE;
const SPIRAL_TURNS: f32 = 4.0;
const STREAMS: usize = 5;

/// Generate the sacred flame (40% core, 25% spirals, 20% embers, 8% glow, remainder ambient)
pub fn generate_sacred_flame<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_blue = Color::from_hex(0x1E3A8A);
    let electric_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);
    let teal = Color::from_hex(0x14B8A6);
    let violet = Color::from_hex(0x8B5CF6);

    let regions = Partition::new(count, &[0.40, 0.25, 0.20, 0.08]);
    let mut out = ParticleWriter::new(count);

    // Core: dense at the base, narrowing toward the tip
    for _ in 0..regions.count(0) {
        let t = unit(rng).powf(0.6);
        let height = (t - 0.5) * FLAME_HEIGHT;
        let radius = BASE_RADIUS * (1.0 - t * 0.85);
        let angle = t * SPIRAL_TURNS * TAU + unit(rng) * 0.5;
        let wobble = scalar_noise3(height * 2.0, angle, t * 3.0) * 0.15;
        let x = (radius + wobble) * angle.cos();
        let z = (radius + wobble) * angle.sin();
        let y = height + scalar_noise3(x, height, z) * 0.1;
        let flicker = jitter(rng, 0.04 * (1.0 - t * 0.5));

        let spread = (x * x + z * z).sqrt() / BASE_RADIUS;
        let c = Color::WHITE
            .lerp(light_cyan, spread * 0.6)
            .lerp(cyan, t * 0.5)
            .lerp(electric_blue, t * 0.3)
            .scale(1.0 - t * 0.4);
        out.push(Vec3::new(x + flicker, y, z + flicker), c, 0);
    }

    let per_stream = regions.count(1) / STREAMS;
    for stream in 0..STREAMS {
        let offset = (stream as f32 / STREAMS as f32) * TAU;
        for i in 0..per_stream {
            let t = i as f32 / per_stream as f32;
            let height = (t - 0.4) * FLAME_HEIGHT;
            let bulge = (t * PI).sin() * 0.3;
            let radius = (BASE_RADIUS * 0.6 + bulge) * (1.0 - t * 0.8);
            let angle = offset + t * SPIRAL_TURNS * TAU * 1.5;
            let wobble = scalar_noise3(t * 5.0, angle, stream as f32) * 0.08;
            let p = Vec3::new(
                (radius + wobble) * angle.cos(),
                height,
                (radius + wobble) * angle.sin(),
            ) + jitter3(rng, 0.025 * (1.0 - t * 0.6));
            let c = cyan
                .lerp(teal, (t * PI).sin() * 0.5)
                .lerp(light_cyan, (1.0 - t) * 0.4)
                .lerp(Color::WHITE, unit(rng) * 0.15)
                .scale(0.8 - t * 0.3);
            out.push(p, c, 1);
        }
    }

    // Embers drift outward as they rise (absorbs stream slack)
    let mut ember = 0usize;
    while out.cursor() < regions.end(2) {
        let base_angle = unit(rng) * TAU;
        let base_radius = unit(rng) * BASE_RADIUS * 0.8;
        let start = (unit(rng) - 0.3) * FLAME_HEIGHT * 0.5;
        let rise = unit(rng).powf(0.4);
        let drift_radius = base_radius + rise * 0.4;
        let drift_angle = base_angle + rise * (unit(rng) - 0.5) * 2.0;
        let seed = ember as f32;
        let flicker_x = scalar_noise3(rise * 10.0, drift_angle, seed) * 0.1;
        let flicker_z = scalar_noise3(drift_angle, rise * 10.0, seed * 0.5) * 0.1;
        let p = Vec3::new(
            drift_radius * drift_angle.cos() + flicker_x,
            start + rise * FLAME_HEIGHT * 0.8,
            drift_radius * drift_angle.sin() + flicker_z,
        );

        let glow = 0.5 + unit(rng) * 0.5;
        let c = light_cyan
            .lerp(Color::WHITE, glow * 0.6)
            .lerp(violet, rise * 0.25)
            .scale((1.0 - rise * 0.6) * glow);
        out.push(p, c, 2);
        ember += 1;
    }

    for _ in 0..regions.count(3) {
        let t = unit(rng);
        let radius = BASE_RADIUS * (1.3 + unit(rng) * 0.5) * (1.0 - t * 0.5);
        let angle = unit(rng) * TAU;
        let p = Vec3::new(
            radius * angle.cos(),
            (t - 0.5) * FLAME_HEIGHT * 1.2,
            radius * angle.sin(),
        );
        let c = electric_blue
            .lerp(deep_blue, unit(rng) * 0.4)
            .lerp(cyan, 0.3)
            .scale(0.2 + unit(rng) * 0.15);
        out.push(p, c, 3);
    }

    out.fill_remaining(|| {
        let r = 1.1 + unit(rng).powi(2) * 0.5;
        let s = random_on_unit_sphere(rng) * r;
        let p = Vec3::new(s.x * 0.7, s.y * 1.3 - 0.1, s.z * 0.7);
        let c = deep_blue.lerp(violet, unit(rng)).scale(0.08 + unit(rng) * 0.06);
        (p, c, 4)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_sacred_flame_well_formed() {
        let buf = generate_sacred_flame(&mut seeded(161), 5000);
        assert_well_formed(&buf, 5000);
    }

    #[test]
    fn test_flame_narrows_upward() {
        let buf = generate_sacred_flame(&mut seeded(162), 10_000);
        let (mut low, mut high) = ((0.0f32, 0usize), (0.0f32, 0usize));
        for i in 0..buf.len() {
            if buf.group(i) != 0 {
                continue;
            }
            let p = buf.position(i);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            if p.y < -0.5 {
                low = (low.0 + r, low.1 + 1);
            } else if p.y > 0.5 {
                high = (high.0 + r, high.1 + 1);
            }
        }
        assert!(low.1 > 0 && high.1 > 0);
        assert!(low.0 / low.1 as f32 > high.0 / high.1 as f32);
    }
}
