//! Random point sampling helpers
//!
//! All functions take the RNG explicitly so generators stay reproducible
//! when driven by a seeded generator.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

/// Uniform `f32` in `[0, 1)`
#[inline]
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>()
}

/// Uniform `f32` in `[-1, 1)`
#[inline]
pub fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * 2.0 - 1.0
}

/// Centered jitter: `(U - 0.5) * amount`, so the spread is `amount` wide
#[inline]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * amount
}

/// Independent centered jitter on each axis
#[inline]
pub fn jitter3<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> Vec3 {
    Vec3::new(
        jitter(rng, amount),
        jitter(rng, amount),
        jitter(rng, amount),
    )
}

/// Point from spherical coordinates (`theta` azimuth around Y, `phi` polar from +Z)
///
/// `x = r sinφ cosθ`, `y = r sinφ sinθ`, `z = r cosφ`
#[inline]
pub fn spherical(theta: f32, phi: f32, radius: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Random direction with uniform solid angle
///
/// `θ = U·2π`, `φ = acos(2U - 1)`
#[inline]
pub fn random_on_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = unit(rng) * TAU;
    let phi = (2.0 * unit(rng) - 1.0).clamp(-1.0, 1.0).acos();
    spherical(theta, phi, 1.0)
}

/// Uniform point inside the unit ball (radius `U^(1/3)`)
#[inline]
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    random_on_unit_sphere(rng) * unit(rng).cbrt()
}

/// Point in a ball with radial profile `U^exponent * radius`
///
/// `exponent = 1/3` is volumetrically uniform; `0.5` is uniform over a disc
/// cross-section; smaller exponents push mass toward the shell and larger
/// ones toward the center.
#[inline]
pub fn sample_ball<R: Rng + ?Sized>(rng: &mut R, radius: f32, exponent: f32) -> Vec3 {
    random_on_unit_sphere(rng) * unit(rng).powf(exponent) * radius
}

/// Random point on a circle in the XY plane
#[inline]
pub fn random_on_circle<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> (f32, f32) {
    let angle = unit(rng) * TAU;
    (angle.cos() * radius, angle.sin() * radius)
}

/// Convert latitude/longitude in degrees to a point on a sphere
///
/// Uses a Y-up convention with longitude 0 facing -Z:
/// `φ = (90 - lat)°`, `θ = (lon + 180)°`, `(sinφ sinθ, cosφ, sinφ cosθ) * radius`.
pub fn lat_lon_to_vec3(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat) * PI / 180.0;
    let theta = (lon + 180.0) * PI / 180.0;
    Vec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_in_sphere_mean_radius() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let n = 100_000;
        let total: f64 = (0..n)
            .map(|_| random_in_unit_sphere(&mut rng).length() as f64)
            .sum();
        let mean = total / n as f64;
        assert!(
            (0.74..=0.76).contains(&mean),
            "Mean radius {} outside uniform-ball band",
            mean
        );
    }

    #[test]
    fn test_in_sphere_radial_cdf() {
        // P(r <= x) = x^3 for a uniform ball
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let n = 50_000;
        let radii: Vec<f32> = (0..n)
            .map(|_| random_in_unit_sphere(&mut rng).length())
            .collect();
        for x in [0.25f32, 0.5, 0.75, 0.9] {
            let frac = radii.iter().filter(|&&r| r <= x).count() as f32 / n as f32;
            let expected = x * x * x;
            assert!(
                (frac - expected).abs() < 0.01,
                "CDF at {} is {}, expected {}",
                x,
                frac,
                expected
            );
        }
    }

    #[test]
    fn test_on_sphere_unit_length() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        for i in 0..1000 {
            let p = random_on_unit_sphere(&mut rng);
            assert!(
                (p.length() - 1.0).abs() < 1e-5,
                "Sample {} has length {}",
                i,
                p.length()
            );
        }
    }

    #[test]
    fn test_on_sphere_unbiased() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let n = 50_000;
        let sum = (0..n).fold(Vec3::ZERO, |acc, _| acc + random_on_unit_sphere(&mut rng));
        let mean = sum / n as f32;
        assert!(mean.length() < 0.02, "Direction mean {:?} is biased", mean);
    }

    #[test]
    fn test_jitter_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        for _ in 0..1000 {
            let j = jitter(&mut rng, 0.2);
            assert!((-0.1..0.1).contains(&j));
        }
    }

    #[test]
    fn test_lat_lon_axes() {
        let north = lat_lon_to_vec3(90.0, 0.0, 1.0);
        assert!((north - Vec3::Y).length() < 1e-5);

        // Longitude 0 on the equator faces -Z
        let prime = lat_lon_to_vec3(0.0, 0.0, 1.0);
        assert!((prime - Vec3::NEG_Z).length() < 1e-5);

        let p = lat_lon_to_vec3(35.6, 139.7, 2.0);
        assert!((p.length() - 2.0).abs() < 1e-5);
    }
}
