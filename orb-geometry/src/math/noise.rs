//! Deterministic sinusoidal noise
//!
//! Not a gradient or hash noise: a fixed sum of sine/cosine products, cheap
//! to evaluate and smooth enough to perturb flame tongues and wave fields.

/// Base spatial frequency
pub const NOISE_SCALE: f32 = 2.5;

/// Continuous pseudo-noise in `[-1, 1]`
///
/// Same input always yields the same output.
pub fn scalar_noise3(x: f32, y: f32, z: f32) -> f32 {
    let s = NOISE_SCALE;
    let a = (x * s + y * 1.3).sin() * (z * s * 0.8).cos();
    let b = (y * s * 1.2 + z * 0.9).sin() * (x * s).cos();
    let c = (z * s * 0.7 + x * 1.1).sin() * (y * s * 1.4).cos();
    (a + b + c) / 3.0
}
