//! Triquetra: three interlocking circular loops
//!
//! Three circles whose radius equals the distance of their centers from
//! the origin. A loop point is hidden when it lies inside both other
//! circles, which carves the shared central region and leaves the
//! three-petal weave.
//!
//! Groups: 0..3 = loops, 3 = inner triangle, 4 = outer glow, 5 = center dust.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, palette, random_on_unit_sphere, sample_ball, unit};

const CIRCLE_RADIUS: f32 = 0.55;
const TUBE: f32 = 0.045;
const INNER_TRIANGLE_RADIUS: f32 = 0.12;

/// Loop centers at 90°, 210° and 330°
pub fn loop_centers() -> [Vec2; 3] {
    [90.0f32, 210.0, 330.0].map(|deg| Vec2::from_angle(deg * PI / 180.0) * CIRCLE_RADIUS)
}

/// True if `p` lies inside both neighbors of loop `index` (the hidden band)
pub fn is_hidden(p: Vec2, index: usize, centers: &[Vec2; 3]) -> bool {
    let mask = CIRCLE_RADIUS - TUBE * 0.5;
    let inside = |c: Vec2| p.distance_squared(c) < mask * mask;
    inside(centers[(index + 1) % 3]) && inside(centers[(index + 2) % 3])
}

/// Generate the triquetra (75% loops, 10% inner triangle, 8% glow, remainder dust)
pub fn generate_triquetra<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let bright_gold = Color::from_hex(0xFFF176);
    let deep_gold = Color::from_hex(0xFFA000);

    let centers = loop_centers();
    let regions = Partition::new(count, &[0.75, 0.10, 0.08]);
    let mut out = ParticleWriter::new(count);

    // Loops: oversample the circumference twice, keep the visible arcs
    let per_loop = regions.count(0) / 3;
    let samples = per_loop * 2;
    for (loop_idx, &center) in centers.iter().enumerate() {
        let mut placed = 0;
        for i in 0..samples {
            if placed >= per_loop {
                break;
            }
            let angle = (i as f32 / samples as f32) * TAU;
            let radius = (CIRCLE_RADIUS - TUBE) + unit(rng) * TUBE * 2.0;
            let p = center + Vec2::from_angle(angle) * radius;
            if is_hidden(p, loop_idx, &centers) {
                continue;
            }

            let variation = unit(rng);
            let c = if variation < 0.1 {
                palette::GOLD.lerp(bright_gold, 0.6)
            } else if variation > 0.9 {
                palette::GOLD.lerp(deep_gold, 0.4)
            } else {
                palette::GOLD
            };
            out.push(p.extend(jitter(rng, 0.03)), c, loop_idx as u32);
            placed += 1;
        }
    }

    // Inner triangle: clusters on the three inner vertices
    let inner_color = palette::GOLD.lerp(Color::WHITE, 0.3);
    for _ in 0..regions.count(1) {
        let vertex = (rng.random_range(0..3) as f32 * 120.0 + 30.0) * PI / 180.0;
        let r = INNER_TRIANGLE_RADIUS * (0.6 + unit(rng) * 0.4);
        let xy = Vec2::from_angle(vertex + jitter(rng, 0.3)) * r;
        out.push(xy.extend(jitter(rng, 0.02)), inner_color, 3);
    }

    // Flattened glow shell (absorbs loop rejection deficit)
    while out.cursor() < regions.end(2) {
        let r = 1.0 + unit(rng).powi(2) * 0.3;
        let p = random_on_unit_sphere(rng) * r * Vec3::new(1.0, 1.0, 0.15);
        out.push(p, deep_gold.scale(0.15 + unit(rng) * 0.1), 4);
    }

    let dust = palette::GOLD.lerp(Color::WHITE, 0.2);
    out.fill_remaining(|| {
        let p = sample_ball(rng, 0.3, 1.8);
        (p, dust.scale(0.12 + unit(rng) * 0.08), 5)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_centers_equilateral() {
        let c = loop_centers();
        let side = c[0].distance(c[1]);
        assert!((c[1].distance(c[2]) - side).abs() < 1e-5);
        assert!((c[2].distance(c[0]) - side).abs() < 1e-5);
    }

    #[test]
    fn test_overlap_of_neighbors_is_hidden() {
        // Opposite loop i, halfway in, lies inside both of its neighbors
        let c = loop_centers();
        for i in 0..3 {
            let p = -c[i] * 0.5;
            assert!(is_hidden(p, i, &c));
        }
        // The origin sits exactly on every circle, outside the narrowed mask
        assert!(!is_hidden(Vec2::ZERO, 0, &c));
        // A point far out on the top loop is visible
        let top = c[0] + Vec2::Y * CIRCLE_RADIUS;
        assert!(!is_hidden(top, 0, &c));
    }

    #[test]
    fn test_loops_respect_weave() {
        let buf = generate_triquetra(&mut seeded(51), 6000);
        assert_well_formed(&buf, 6000);
        let c = loop_centers();
        for i in 0..buf.len() {
            let g = buf.group(i) as usize;
            if g < 3 {
                assert!(!is_hidden(buf.position(i).truncate(), g, &c));
            }
        }
    }
}
