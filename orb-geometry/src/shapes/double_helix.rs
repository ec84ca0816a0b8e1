//! Double helix: two DNA strands half a turn apart, joined by base pairs
//!
//! Groups: 0 = first strand, 1 = second strand, 2 = base-pair rungs,
//! 3 = energy trails, 4 = ambient.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, jitter3, random_on_unit_sphere, unit};

const SCALE: f32 = 0.8;
const RADIUS: f32 = 0.4 * SCALE;
const HEIGHT: f32 = 2.2 * SCALE;
const TURNS: f32 = 3.5;
const STRAND_THICKNESS: f32 = 0.035;
const RUNG_THICKNESS: f32 = 0.02;
const RUNGS: usize = 20;

/// Point on the helix at `t ∈ [0, 1]` with angular `phase`
pub fn helix_point(t: f32, phase: f32) -> Vec3 {
    let angle = t * TURNS * TAU + phase;
    Vec3::new(RADIUS * angle.cos(), (t - 0.5) * HEIGHT, RADIUS * angle.sin())
}

/// Generate the DNA double helix (35/35% strands, 15% rungs, 8% trails, remainder ambient)
pub fn generate_double_helix<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_cyan = Color::from_hex(0x0891B2);
    let bright_cyan = Color::from_hex(0x22D3EE);
    let electric_blue = Color::from_hex(0x3B82F6);
    let light_cyan = Color::from_hex(0x67E8F9);
    let teal = Color::from_hex(0x14B8A6);

    let regions = Partition::new(count, &[0.35, 0.35, 0.15, 0.08]);
    let mut out = ParticleWriter::new(count);

    let strands = [(0.0, bright_cyan, electric_blue), (PI, teal, light_cyan)];
    for (s, (phase, from, to)) in strands.into_iter().enumerate() {
        let n = regions.count(s);
        for i in 0..n {
            let t = i as f32 / n as f32;
            let p = helix_point(t, phase) + jitter3(rng, STRAND_THICKNESS);
            let c = from.lerp(to, t).lerp(Color::WHITE, unit(rng) * 0.15);
            out.push(p, c, s as u32);
        }
    }

    // Rungs straight across between the strands
    let per_rung = regions.count(2) / RUNGS;
    let rung_base = Color::WHITE.lerp(light_cyan, 0.3);
    for rung in 0..RUNGS {
        let t = (rung as f32 + 0.5) / RUNGS as f32;
        let a = helix_point(t, 0.0);
        let b = helix_point(t, PI);
        for i in 0..per_rung {
            let s = i as f32 / per_rung as f32;
            let p = a.lerp(b, s) + jitter3(rng, RUNG_THICKNESS);
            let c = rung_base.lerp(bright_cyan, (s - 0.5).abs() * 2.0);
            out.push(p, c, 2);
        }
    }

    // Trails pushed outward from random helix phases (absorbs rung slack)
    while out.cursor() < regions.end(3) {
        let h = helix_point(unit(rng), unit(rng) * TAU);
        let expansion = 1.2 + unit(rng) * 0.5;
        let p = Vec3::new(h.x * expansion, h.y + jitter(rng, 0.3), h.z * expansion);
        let c = deep_cyan
            .lerp(bright_cyan, unit(rng))
            .scale(0.4 + unit(rng) * 0.3);
        out.push(p, c, 3);
    }

    out.fill_remaining(|| {
        let r = 1.0 + unit(rng).powi(2) * 0.5;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 1.3, 1.0);
        let c = deep_cyan
            .lerp(electric_blue, unit(rng))
            .scale(0.15 + unit(rng) * 0.1);
        (p, c, 4)
    });

    out.finish()
}
