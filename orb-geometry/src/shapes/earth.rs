//! Earth: a particle globe stamped with continent and city caps
//!
//! Groups: 0 = ocean, 1 = land, 2 = cloud, 3 = polar ice, 4 = city lights.
//!
//! Particles are placed by rejection sampling on the unit sphere. Ocean
//! candidates are thinned so land reads denser, clouds float slightly above
//! the surface and latitude darkens both land and ocean toward the poles.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::earth_data::{CITY_CAPS, LAND_CAPS, SphericalCap, colors};
use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, random_on_unit_sphere, unit};

const RADIUS: f32 = 1.0;
const CLOUD_LIFT: f32 = 1.06;
const MAX_ATTEMPTS: usize = 15;
/// Probability an ocean candidate is discarded
const OCEAN_SKIP: f32 = 0.55;
/// Chance a land particle inside a city cap lights up
const CITY_SURFACE_GLOW: f32 = 0.3;

pub const GROUP_OCEAN: u32 = 0;
pub const GROUP_LAND: u32 = 1;
pub const GROUP_CLOUD: u32 = 2;
pub const GROUP_ICE: u32 = 3;
pub const GROUP_CITY: u32 = 4;

/// Precomputed cap center and boundary
#[derive(Clone, Copy)]
struct CapNode {
    center: Vec3,
    min_dot: f32,
    radius_deg: f32,
}

impl CapNode {
    fn from_cap(cap: &SphericalCap) -> Self {
        Self {
            center: cap.center(),
            min_dot: cap.min_dot(),
            radius_deg: cap.radius,
        }
    }
}

/// Banded sinusoid cloud mask
fn is_cloud(p: Vec3) -> bool {
    let s = 4.0;
    let n = (p.x * s).sin() * (p.y * s * 1.5 + p.z * 2.0).sin() * (p.z * s).cos();
    n > 0.4
}

/// Uniform direction inside the cap around `center` with angular radius `radius_deg`
pub fn sample_in_cap<R: Rng + ?Sized>(rng: &mut R, center: Vec3, radius_deg: f32) -> Vec3 {
    let cos_max = radius_deg.to_radians().cos();
    // Uniform in solid angle: cos(θ) uniform in [cos_max, 1]
    let cos_theta = 1.0 - unit(rng) * (1.0 - cos_max);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = unit(rng) * TAU;
    let (u, v) = center.any_orthonormal_pair();
    (center * cos_theta + (u * phi.cos() + v * phi.sin()) * sin_theta).normalize()
}

struct Globe {
    land: Vec<CapNode>,
    cities: Vec<(CapNode, Color)>,
}

impl Globe {
    fn new() -> Self {
        let land = LAND_CAPS.iter().map(CapNode::from_cap).collect();
        let cities = CITY_CAPS
            .iter()
            .map(|c| (CapNode::from_cap(&c.cap), c.glow()))
            .collect();
        Self { land, cities }
    }

    /// Land test with a slightly noisy boundary per cap
    fn is_land<R: Rng + ?Sized>(&self, rng: &mut R, p: Vec3) -> bool {
        let mut land = false;
        for node in &self.land {
            let edge_noise = (unit(rng) - 0.5) * 0.02;
            if p.dot(node.center) > node.min_dot + edge_noise {
                land = true;
            }
        }
        land
    }

    fn in_city(&self, p: Vec3) -> bool {
        self.cities
            .iter()
            .any(|(node, _)| p.dot(node.center) > node.min_dot)
    }

    /// One surface particle with bounded retries
    fn sample_surface<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        allow_cloud: bool,
    ) -> (Vec3, Color, u32) {
        for _ in 0..MAX_ATTEMPTS {
            let p = random_on_unit_sphere(rng) * RADIUS;

            if allow_cloud && is_cloud(p) {
                return (p * CLOUD_LIFT, colors::CLOUD.scale(0.8), GROUP_CLOUD);
            }

            let pole_factor = 1.0 - p.y.abs() * 0.3;

            if self.is_land(rng, p) {
                if p.y.abs() > 0.9 {
                    return (p, colors::ICE, GROUP_ICE);
                }
                if self.in_city(p) && unit(rng) < CITY_SURFACE_GLOW {
                    return (p, colors::CITY_SURFACE, GROUP_CITY);
                }
                return (p, colors::LAND.scale(pole_factor), GROUP_LAND);
            }

            if unit(rng) > OCEAN_SKIP {
                continue;
            }
            let shade = pole_factor * (0.8 + unit(rng) * 0.4);
            return (p, colors::OCEAN.scale(shade), GROUP_OCEAN);
        }

        let p = random_on_unit_sphere(rng) * RADIUS;
        (p, colors::OCEAN.scale(0.5), GROUP_OCEAN)
    }
}

/// Generate the Earth globe
///
/// The first 20% of the budget may become clouds, 3% are city lights
/// sampled directly inside the city caps, the rest is land and ocean.
pub fn generate_earth<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let globe = Globe::new();
    let regions = Partition::new(count, &[0.20, 0.03]);
    let mut out = ParticleWriter::new(count);

    for _ in 0..regions.count(0) {
        let (p, c, g) = globe.sample_surface(rng, true);
        out.push(p, c, g);
    }

    for _ in 0..regions.count(1) {
        let (node, glow) = globe.cities[rng.random_range(0..globe.cities.len())];
        let p = sample_in_cap(rng, node.center, node.radius_deg) * RADIUS;
        out.push(p, glow, GROUP_CITY);
    }

    out.fill_remaining(|| globe.sample_surface(rng, false));
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PARTICLE_COUNT;
    use crate::shapes::earth_data::{CITY_GLOW, find_city};
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_sample_in_cap_stays_inside() {
        let mut rng = seeded(9);
        let center = Vec3::new(1.0, 2.0, -0.5).normalize();
        let min_dot = 5.0f32.to_radians().cos();
        for _ in 0..1000 {
            let p = sample_in_cap(&mut rng, center, 5.0);
            assert!((p.length() - 1.0).abs() < 1e-4);
            assert!(p.dot(center) >= min_dot - 1e-5);
        }
    }

    #[test]
    fn test_cloud_mask_is_sparse() {
        let mut rng = seeded(10);
        let hits = (0..10_000)
            .filter(|_| is_cloud(random_on_unit_sphere(&mut rng)))
            .count();
        assert!(hits > 0 && hits < 5_000, "Cloud mask coverage {}", hits);
    }

    #[test]
    fn test_earth_well_formed() {
        let buf = generate_earth(&mut seeded(11), 5000);
        assert_well_formed(&buf, 5000);
        for i in 0..buf.len() {
            let r = buf.position(i).length();
            assert!(
                (0.999..=CLOUD_LIFT + 1e-3).contains(&r),
                "Particle {} at radius {}",
                i,
                r
            );
        }
    }

    #[test]
    fn test_earth_has_city_lights() {
        let buf = generate_earth(&mut seeded(12), 10_000);
        let tokyo = find_city("Tokyo").unwrap();
        let center = tokyo.cap.center();
        let glow = tokyo.glow();
        let lit = (0..buf.len()).any(|i| {
            let p = buf.position(i).normalize();
            p.dot(center) > tokyo.cap.min_dot() - 1e-4 && buf.color(i) == glow
        });
        assert!(lit, "No lit particle near Tokyo");
    }

    #[test]
    fn test_city_colors() {
        let buf = generate_earth(&mut seeded(14), PARTICLE_COUNT);
        let glow = Color::from_hex(CITY_GLOW);
        let city: Vec<Color> = (0..buf.len())
            .filter(|&i| buf.group(i) == GROUP_CITY)
            .map(|i| buf.color(i))
            .collect();
        assert!(city.iter().all(|&c| c == glow || c == colors::CITY_SURFACE));
        assert!(city.contains(&glow));
        assert!(city.contains(&colors::CITY_SURFACE));
    }

    #[test]
    fn test_land_denser_than_ocean() {
        let buf = generate_earth(&mut seeded(15), PARTICLE_COUNT);
        // Sahara is all land, the South Atlantic cap all ocean
        let sahara = SphericalCap::new(15.0, 10.0, 12.0);
        let atlantic = SphericalCap::new(-35.0, -20.0, 10.0);
        let density = |cap: &SphericalCap| {
            let hits = (0..buf.len())
                .filter(|&i| buf.group(i) != GROUP_CLOUD)
                .filter(|&i| cap.contains(buf.position(i).normalize()))
                .count();
            // Solid angle is proportional to 1 - cos(radius)
            hits as f32 / (1.0 - cap.min_dot())
        };
        let (land, ocean) = (density(&sahara), density(&atlantic));
        assert!(land > ocean * 1.4, "Land {} vs ocean {}", land, ocean);
    }

    #[test]
    fn test_land_darkens_toward_poles() {
        let buf = generate_earth(&mut seeded(16), PARTICLE_COUNT);
        let brightness = |lo: f32, hi: f32| {
            let shades: Vec<f32> = (0..buf.len())
                .filter(|&i| buf.group(i) == GROUP_LAND)
                .filter(|&i| (lo..hi).contains(&buf.position(i).y.abs()))
                .map(|i| buf.color(i).g)
                .collect();
            assert!(!shades.is_empty());
            shades.iter().sum::<f32>() / shades.len() as f32
        };
        let equator = brightness(0.0, 0.1);
        let high = brightness(0.75, 0.85);
        assert!(high < equator * 0.85, "Equator {} vs high latitude {}", equator, high);
    }

    #[test]
    fn test_ice_only_near_poles() {
        let buf = generate_earth(&mut seeded(13), 5000);
        for i in 0..buf.len() {
            if buf.group(i) == GROUP_ICE {
                assert!(buf.position(i).y.abs() > 0.9);
            }
        }
    }
}
