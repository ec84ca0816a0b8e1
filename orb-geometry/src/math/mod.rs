//! Geometry primitives shared by every shape generator
//!
//! Sampling, color blending and the deterministic noise field. Vector math
//! comes from `glam`.

mod color;
mod noise;
mod sampling;

// Re-export color types
pub use color::{Color, blend_color, lerp_color, palette};

// Re-export noise
pub use noise::{NOISE_SCALE, scalar_noise3};

// Re-export sampling
pub use sampling::{
    jitter, jitter3, lat_lon_to_vec3, random_in_unit_sphere, random_on_circle,
    random_on_unit_sphere, sample_ball, signed_unit, spherical, unit,
};
