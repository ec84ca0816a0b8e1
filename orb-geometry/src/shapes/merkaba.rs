//! Merkaba: two interpenetrating tetrahedra around a bright core
//!
//! Groups: 0 = upward tetrahedron (gold), 1 = downward tetrahedron (silver),
//! 2 = core (white).

use glam::Vec3;
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, palette, random_in_unit_sphere, unit};

const SCALE: f32 = 1.1;
const CORE_RADIUS: f32 = 0.25;
const VERTEX_GLOW_RADIUS: f32 = 0.08;
const EDGE_JITTER: f32 = 0.02;
/// Share of a tetrahedron's particles clustered on its vertices
const VERTEX_SHARE: f32 = 0.2;

/// Tetrahedron edges as vertex index pairs
pub const EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (2, 3), (3, 1)];

/// Vertices of the upward tetrahedron with circumradius `r`
///
/// Apex on +Y, base triangle at `y = -r/3`.
pub fn upward_tetrahedron(r: f32) -> [Vec3; 4] {
    [
        Vec3::new(0.0, r, 0.0),
        Vec3::new(r * (8.0f32 / 9.0).sqrt(), -r / 3.0, 0.0),
        Vec3::new(-r * (2.0f32 / 9.0).sqrt(), -r / 3.0, r * (2.0f32 / 3.0).sqrt()),
        Vec3::new(-r * (2.0f32 / 9.0).sqrt(), -r / 3.0, -r * (2.0f32 / 3.0).sqrt()),
    ]
}

/// Sample one tetrahedron: vertex glow or tight edge line
fn sample_tetrahedron<R: Rng + ?Sized>(
    rng: &mut R,
    vertices: &[Vec3; 4],
    vertex_color: Color,
    edge_color: Color,
) -> (Vec3, Color) {
    if unit(rng) < VERTEX_SHARE {
        let v = vertices[rng.random_range(0..4)];
        (v + random_in_unit_sphere(rng) * VERTEX_GLOW_RADIUS, vertex_color)
    } else {
        let (a, b) = EDGES[rng.random_range(0..EDGES.len())];
        let p = vertices[a].lerp(vertices[b], unit(rng));
        (p + random_in_unit_sphere(rng) * EDGE_JITTER, edge_color)
    }
}

/// Generate the Merkaba star tetrahedron (10% core, 45% top, 45% bottom)
pub fn generate_merkaba<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let up = upward_tetrahedron(SCALE);
    let down = up.map(|v| -v);

    let top_vertex = Color::WHITE.lerp(palette::GOLD, 0.2);

    let regions = Partition::new(count, &[0.1, 0.45]);
    let mut out = ParticleWriter::new(count);

    for _ in 0..regions.count(0) {
        let p = random_in_unit_sphere(rng) * CORE_RADIUS;
        out.push(p, Color::WHITE, 2);
    }

    for _ in 0..regions.count(1) {
        let (p, c) = sample_tetrahedron(rng, &up, top_vertex, palette::GOLD);
        out.push(p, c, 0);
    }

    out.fill_remaining(|| {
        let (p, c) = sample_tetrahedron(rng, &down, palette::PALE_BLUE, palette::SILVER);
        (p, c, 1)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_tetrahedron_regular() {
        let v = upward_tetrahedron(1.0);
        let edge = v[0].distance(v[1]);
        for (a, b) in EDGES {
            assert!(
                (v[a].distance(v[b]) - edge).abs() < 1e-5,
                "Edge {}-{} is not regular",
                a,
                b
            );
        }
        for p in v {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_merkaba_well_formed() {
        let buf = generate_merkaba(&mut seeded(1), 5000);
        assert_well_formed(&buf, 5000);
    }

    #[test]
    fn test_merkaba_groups() {
        let buf = generate_merkaba(&mut seeded(2), 1000);
        let core = (0..buf.len()).filter(|&i| buf.group(i) == 2).count();
        assert_eq!(core, 100);
        for i in 0..buf.len() {
            if buf.group(i) == 2 {
                assert!(buf.position(i).length() <= CORE_RADIUS + 1e-5);
                assert_eq!(buf.color(i), Color::WHITE);
            }
        }
    }
}
