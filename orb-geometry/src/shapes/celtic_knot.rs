//! Celtic knot: an interwoven trefoil and figure-eight knot
//!
//! The trefoil is drawn as a tube around its centerline, the figure-eight as
//! a jittered line. Crossings between the two curves are found on a coarse
//! parameter grid and lit up as small glowing nodes.
//!
//! Groups: 0 = trefoil, 1 = figure-eight, 2 = crossings, 3 = glow, 4 = ambient.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter3, palette, random_on_unit_sphere, sample_ball, unit};

const SCALE: f32 = 0.9;
const TUBE_RADIUS: f32 = 0.04;
const FIGURE_EIGHT_THICKNESS: f32 = 0.035;
const CROSSING_RADIUS: f32 = 0.06;
const CROSSING_SAMPLES: usize = 50;

/// Trefoil knot centerline at parameter `t`
pub fn trefoil_point(t: f32) -> Vec3 {
    Vec3::new(
        (t.sin() + 2.0 * (2.0 * t).sin()) * SCALE * 0.25,
        (t.cos() - 2.0 * (2.0 * t).cos()) * SCALE * 0.25,
        -(3.0 * t).sin() * SCALE * 0.15,
    )
}

/// Figure-eight knot centerline at parameter `t`
pub fn figure_eight_point(t: f32) -> Vec3 {
    let ring = 2.0 + (2.0 * t).cos();
    Vec3::new(
        ring * (3.0 * t).cos() * SCALE * 0.18,
        ring * (3.0 * t).sin() * SCALE * 0.18,
        (4.0 * t).sin() * SCALE * 0.12,
    )
}

/// Two unit vectors perpendicular to `tangent` and each other
fn tube_frame(tangent: Vec3) -> (Vec3, Vec3) {
    let cross = tangent.cross(Vec3::Y);
    let perp1 = if cross.length() < 0.1 {
        Vec3::X
    } else {
        cross.normalize()
    };
    let perp2 = tangent.cross(perp1).normalize_or_zero();
    (perp1, perp2)
}

/// Midpoints where the two knots pass within 0.15 of each other
///
/// Midpoints closer than 0.1 to an already found crossing are merged.
pub fn crossings() -> Vec<Vec3> {
    let mut found: Vec<Vec3> = Vec::new();
    for i in 0..CROSSING_SAMPLES {
        let a = trefoil_point(i as f32 / CROSSING_SAMPLES as f32 * TAU);
        for j in 0..CROSSING_SAMPLES {
            let b = figure_eight_point(j as f32 / CROSSING_SAMPLES as f32 * TAU);
            if a.distance(b) < 0.15 {
                let mid = a.midpoint(b);
                if found.iter().all(|p| p.distance(mid) >= 0.1) {
                    found.push(mid);
                }
            }
        }
    }
    found
}

/// Generate the celtic knot (35% trefoil, 30% figure-eight, 15% crossings, 12% glow, remainder ambient)
pub fn generate_celtic_knot<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_gold = Color::from_hex(0xB8860B);
    let copper = Color::from_hex(0xB87333);

    let regions = Partition::new(count, &[0.35, 0.30, 0.15, 0.12]);
    let mut out = ParticleWriter::new(count);

    let n = regions.count(0);
    for i in 0..n {
        let s = i as f32 / n as f32;
        let t = s * TAU;
        let center = trefoil_point(t);
        let tangent = (trefoil_point(t + 0.01) - center).normalize_or(Vec3::X);
        let (perp1, perp2) = tube_frame(tangent);
        let angle = unit(rng) * TAU;
        let radius = TUBE_RADIUS * unit(rng);
        let p = center + (perp1 * angle.cos() + perp2 * angle.sin()) * radius;
        let c = palette::GOLD
            .lerp(palette::AMBER, (s * PI * 3.0).sin() * 0.5 + 0.5)
            .lerp(Color::WHITE, unit(rng) * 0.15);
        out.push(p, c, 0);
    }

    let n = regions.count(1);
    for i in 0..n {
        let s = i as f32 / n as f32;
        let p = figure_eight_point(s * TAU) + jitter3(rng, FIGURE_EIGHT_THICKNESS);
        let c = palette::BRONZE
            .lerp(copper, (s * PI * 4.0).sin() * 0.5 + 0.5)
            .lerp(palette::GOLD, unit(rng) * 0.2)
            .lerp(Color::WHITE, unit(rng) * 0.1);
        out.push(p, c, 1);
    }

    let points = crossings();
    let per_crossing = (regions.count(2) / points.len().max(1)).max(1);
    let crossing_tint = Color::WHITE.lerp(palette::GOLD, 0.3);
    'crossings: for &point in &points {
        for _ in 0..per_crossing {
            if out.cursor() >= regions.end(2) {
                break 'crossings;
            }
            let offset = sample_ball(rng, CROSSING_RADIUS, 0.4);
            let brightness = 1.0 - (offset.length() / CROSSING_RADIUS) * 0.4;
            let c = crossing_tint
                .lerp(palette::EMERALD, unit(rng) * 0.15)
                .scale(0.8 + brightness * 0.2);
            out.push(point + offset, c, 2);
        }
    }

    // Halo hugging both knots (absorbs crossing slack)
    while out.cursor() < regions.end(3) {
        let t = unit(rng) * TAU;
        let anchor = if unit(rng) > 0.5 {
            trefoil_point(t)
        } else {
            figure_eight_point(t)
        };
        let p = anchor + random_on_unit_sphere(rng) * (0.1 + unit(rng) * 0.15);
        let c = deep_gold
            .lerp(palette::GOLD, unit(rng))
            .scale(0.25 + unit(rng) * 0.15);
        out.push(p, c, 3);
    }

    out.fill_remaining(|| {
        let r = 1.0 + unit(rng).powi(2) * 0.5;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 1.0, 0.4);
        let c = deep_gold
            .lerp(palette::BRONZE, unit(rng))
            .scale(0.1 + unit(rng) * 0.08);
        (p, c, 4)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_knots_are_closed() {
        assert!(trefoil_point(0.0).distance(trefoil_point(TAU)) < 1e-5);
        assert!(figure_eight_point(0.0).distance(figure_eight_point(TAU)) < 1e-5);
    }

    #[test]
    fn test_crossings_are_separated() {
        let points = crossings();
        assert!(!points.is_empty());
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= 0.1);
            }
        }
    }

    #[test]
    fn test_tube_frame_orthonormal() {
        for tangent in [Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0).normalize()] {
            let (a, b) = tube_frame(tangent);
            assert!(a.dot(tangent).abs() < 1e-5);
            assert!(b.dot(tangent).abs() < 1e-5);
            assert!((a.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_celtic_knot_well_formed() {
        let buf = generate_celtic_knot(&mut seeded(131), 5000);
        assert_well_formed(&buf, 5000);
    }
}
