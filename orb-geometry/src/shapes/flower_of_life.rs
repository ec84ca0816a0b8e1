//! Flower of Life: 19 interlocking circles on a hexagonal lattice
//!
//! Two variants share the lattice construction:
//! - [`generate_flower_of_life`]: layered circles with glowing intersection
//!   nodes, an enclosing ring and faint connecting lines.
//!   Groups: 0 = intersection nodes, 1 = circles, 2 = outer ring, 3 = connections.
//! - [`generate_flower_of_life_complete`]: evenly drawn full petals with an
//!   enclosing circle and interior sparkle.
//!   Groups: 1 = circles, 2 = outer ring, 3 = interior sparkle.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter, unit};

/// Circle center on the lattice
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeCircle {
    pub center: Vec2,
    /// 0 = origin, 1 = first ring, 2 = second ring
    pub ring: u8,
}

/// The 19 circle centers for circles of radius `r`
///
/// Ring 0 is the origin, ring 1 is six centers at distance `r`, ring 2 is
/// six at `2r` on the same bearings plus six at `√3·r` offset by 30°.
pub fn circle_centers(r: f32) -> [LatticeCircle; 19] {
    let mut centers = [LatticeCircle {
        center: Vec2::ZERO,
        ring: 0,
    }; 19];

    let sqrt3 = 3.0f32.sqrt();
    for i in 0..6 {
        let angle = i as f32 * PI / 3.0;
        let dir = Vec2::from_angle(angle);
        centers[1 + i] = LatticeCircle {
            center: dir * r,
            ring: 1,
        };
        centers[7 + i] = LatticeCircle {
            center: dir * 2.0 * r,
            ring: 2,
        };
        centers[13 + i] = LatticeCircle {
            center: Vec2::from_angle(angle + PI / 6.0) * sqrt3 * r,
            ring: 2,
        };
    }
    centers
}

/// Pairwise intersection points of equal circles of radius `r`
///
/// Starts with the origin, then both crossing points for every pair of
/// centers closer than `2r` (with 1% slack). Coincident points are kept, so
/// points shared by many circles collect more glow.
pub fn circle_intersections(centers: &[LatticeCircle], r: f32) -> Vec<Vec3> {
    let mut points = vec![Vec3::ZERO];
    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            let delta = b.center - a.center;
            let d = delta.length();
            if d <= 0.01 || d >= 2.0 * r * 1.01 {
                continue;
            }
            let h_sq = r * r - (d / 2.0) * (d / 2.0);
            if h_sq <= 0.0 {
                continue;
            }
            let h = h_sq.sqrt();
            let mid = (a.center + b.center) / 2.0;
            let perp = delta.perp() / d;
            points.push((mid + perp * h).extend(0.0));
            points.push((mid - perp * h).extend(0.0));
        }
    }
    points
}

/// Generate the layered Flower of Life
///
/// 70% circle outlines, 12% intersection glow, 10% outer ring, remainder
/// faint connections between nearby intersections.
pub fn generate_flower_of_life<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let r = 0.42;
    let outer_radius = 2.15 * r;

    let deep_blue = Color::from_hex(0x0EA5E9);
    let royal_blue = Color::from_hex(0x3B82F6);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);

    let centers = circle_centers(r);
    let intersections = circle_intersections(&centers, r);

    let regions = Partition::new(count, &[0.70, 0.12, 0.10]);
    let mut out = ParticleWriter::new(count);

    // Circles, inner rings lifted slightly toward the viewer
    let per_circle = regions.count(0) / centers.len();
    for circle in &centers {
        let lift = match circle.ring {
            0 => 0.02,
            1 => 0.01,
            _ => 0.0,
        };
        let z_offset = if unit(rng) > 0.5 { lift } else { -lift };

        for i in 0..per_circle {
            if out.cursor() >= regions.end(0) {
                break;
            }
            let theta = (i as f32 / per_circle as f32) * TAU + jitter(rng, 0.05);
            let radius = r + jitter(rng, 0.008);
            let xy = circle.center + Vec2::from_angle(theta) * radius;
            let z = z_offset + jitter(rng, 0.015);

            let t = (xy.length() / (outer_radius * 0.9)).min(1.0);
            let color = royal_blue
                .lerp(cyan, t * 0.7)
                .lerp(light_cyan, t * 0.3)
                .lerp(Color::WHITE, unit(rng) * 0.1);
            out.push(xy.extend(z), color, 1);
        }
    }

    // Intersection nodes (also absorbs the circle rounding slack)
    let per_node = (regions.count(1) / intersections.len()).max(1);
    'nodes: for point in &intersections {
        for _ in 0..per_node {
            if out.cursor() >= regions.end(1) {
                break 'nodes;
            }
            let p = *point
                + Vec3::new(jitter(rng, 0.018), jitter(rng, 0.018), jitter(rng, 0.02));
            let color = Color::WHITE.lerp(light_cyan, unit(rng) * 0.3);
            out.push(p, color, 0);
        }
    }

    // Enclosing ring
    let outer = regions.count(2);
    let outer_color = deep_blue.lerp(royal_blue, 0.4);
    for i in 0..outer {
        if out.cursor() >= regions.end(2) {
            break;
        }
        let theta = (i as f32 / outer as f32) * TAU + jitter(rng, 0.03);
        let radius = outer_radius + jitter(rng, 0.006);
        let xy = Vec2::from_angle(theta) * radius;
        let color = outer_color.lerp(cyan, unit(rng) * 0.2);
        out.push(xy.extend(jitter(rng, 0.01)), color, 2);
    }

    // Connections between intersections; far pairs fall back onto a circle
    let connection_color = cyan.lerp(Color::WHITE, 0.2).scale(0.5);
    let n = intersections.len();
    out.fill_remaining(|| {
        let a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n);
        if b == a {
            b = (a + 1) % n;
        }
        let (p1, p2) = (intersections[a], intersections[b]);

        let p = if p1.distance(p2) > r * 1.5 {
            let circle = centers[rng.random_range(0..centers.len())];
            let xy = circle.center + Vec2::from_angle(unit(rng) * TAU) * r;
            xy.extend(jitter(rng, 0.02))
        } else {
            let t = unit(rng);
            let line = p1.lerp(p2, t);
            Vec3::new(
                line.x + jitter(rng, 0.01),
                line.y + jitter(rng, 0.01),
                jitter(rng, 0.015),
            )
        };
        (p, connection_color, 3)
    });

    out.finish()
}

/// Generate the complete-petal Flower of Life
///
/// 75% circles, 15% enclosing ring, remainder dim interior sparkle.
pub fn generate_flower_of_life_complete<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> ParticleBuffer {
    let r = 0.35;
    let boundary = 3.0 * r;

    let deep_blue = Color::from_hex(0x0EA5E9);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0xA5F3FC);

    let centers = circle_centers(r);
    let regions = Partition::new(count, &[0.75, 0.15]);
    let mut out = ParticleWriter::new(count);

    let per_circle = regions.count(0) / centers.len();
    for circle in &centers {
        for i in 0..per_circle {
            let theta = (i as f32 / per_circle as f32) * TAU;
            let radius = r + jitter(rng, 0.015);
            let xy = circle.center + Vec2::from_angle(theta) * radius;

            let mut color = deep_blue.lerp(cyan, unit(rng) * 0.8);
            if unit(rng) < 0.05 {
                color = color.lerp(Color::WHITE, 0.6);
            }
            out.push(xy.extend(jitter(rng, 0.04)), color, 1);
        }
    }

    for _ in 0..regions.count(1) {
        let radius = boundary + jitter(rng, 0.01);
        let xy = Vec2::from_angle(unit(rng) * TAU) * radius;
        let color = cyan.lerp(light_cyan, 0.5 + unit(rng) * 0.5);
        out.push(xy.extend(jitter(rng, 0.04)), color, 2);
    }

    let sparkle = deep_blue.scale(0.3);
    out.fill_remaining(|| {
        let radius = unit(rng).sqrt() * boundary;
        let xy = Vec2::from_angle(unit(rng) * TAU) * radius;
        (xy.extend(jitter(rng, 0.2)), sparkle, 3)
    });

    out.finish()
}
