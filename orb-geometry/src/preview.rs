//! Preview sizing and caching
//!
//! Thumbnails scale their particle budget with display area and only
//! regenerate when the shape or budget changes.

use crate::buffer::{PARTICLE_COUNT, ParticleBuffer};
use crate::shapes::Shape;

/// Display size (px) that receives the full particle budget
pub const PREVIEW_BASE_SIZE: f32 = 200.0;

/// Particle budget for a preview of `size` pixels
///
/// `floor(PARTICLE_COUNT * (size / 200)^2)`, at least 1 for any positive size
/// and never more than `PARTICLE_COUNT`.
pub fn preview_particle_count(size: f32) -> usize {
    scaled_particle_count(PARTICLE_COUNT, size, PREVIEW_BASE_SIZE)
}

/// Scale `full` by display area relative to `base_size`
///
/// Previews only shrink: sizes at or above `base_size` get `full`.
/// Non-positive or non-finite sizes yield 0.
pub fn scaled_particle_count(full: usize, size: f32, base_size: f32) -> usize {
    if !(size > 0.0 && size.is_finite()) || !(base_size > 0.0) {
        if size != 0.0 {
            tracing::warn!(size, base_size, "Invalid preview size, using 0 particles");
        }
        return 0;
    }
    if size >= base_size {
        return full;
    }
    let ratio = (size / base_size) as f64;
    let count = (full as f64 * ratio * ratio).floor() as usize;
    count.max(1).min(full)
}

impl ParticleBuffer {
    /// Nearest-index resample to `target` particles
    ///
    /// Particle `i` copies source `floor(i * len / target)`, so each region
    /// keeps its share of the buffer. An empty buffer has nothing to copy and
    /// resamples to an empty buffer whatever the target.
    pub fn resample(&self, target: usize) -> ParticleBuffer {
        let n = self.len();
        if target == n {
            return self.clone();
        }
        if n == 0 {
            tracing::warn!(target, "Resampling an empty buffer, result stays empty");
            return ParticleBuffer::default();
        }
        let mut out = ParticleBuffer::with_len(target);
        for i in 0..out.len() {
            let src = i * n / target;
            out.set(i, self.position(src), self.color(src), self.group(src));
        }
        out
    }
}

/// Memo of the last generated buffer, keyed by shape and particle budget
#[derive(Debug, Default)]
pub struct OrbCache {
    entry: Option<(Shape, usize, ParticleBuffer)>,
    misses: usize,
}

impl OrbCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached buffer for `(shape, count)`, running `generate` only on a key change
    pub fn get_or_generate(
        &mut self,
        shape: Shape,
        count: usize,
        generate: impl FnOnce(Shape, usize) -> ParticleBuffer,
    ) -> &ParticleBuffer {
        if !self.is_cached(shape, count) {
            self.misses += 1;
            tracing::debug!(shape = %shape, count, "Regenerating preview");
            self.entry = None;
        }
        let (_, _, buffer) = self
            .entry
            .get_or_insert_with(|| (shape, count, generate(shape, count)));
        buffer
    }

    /// True if `(shape, count)` would be served from the cache
    pub fn is_cached(&self, shape: Shape, count: usize) -> bool {
        matches!(&self.entry, Some((s, c, _)) if *s == shape && *c == count)
    }

    /// Number of regenerations so far
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use glam::Vec3;

    #[test]
    fn test_preview_count_scales_with_area() {
        assert_eq!(preview_particle_count(200.0), 20_000);
        assert_eq!(preview_particle_count(100.0), 5_000);
        assert_eq!(preview_particle_count(60.0), 1_800);
        assert_eq!(preview_particle_count(0.5), 1);
        assert_eq!(preview_particle_count(0.0), 0);
        assert_eq!(preview_particle_count(-5.0), 0);
        assert_eq!(preview_particle_count(f32::NAN), 0);
    }

    #[test]
    fn test_preview_count_never_grows() {
        assert_eq!(preview_particle_count(400.0), PARTICLE_COUNT);
        assert_eq!(preview_particle_count(1e12), PARTICLE_COUNT);
        assert_eq!(preview_particle_count(f32::MAX), PARTICLE_COUNT);
        assert_eq!(scaled_particle_count(0, 50.0, 200.0), 0);
        assert_eq!(scaled_particle_count(10, 1.0, 200.0), 1);
    }

    #[test]
    fn test_resample_index_map() {
        let mut buf = ParticleBuffer::with_len(10);
        for i in 0..10 {
            buf.set(i, Vec3::splat(i as f32), Color::WHITE, i as u32);
        }
        let small = buf.resample(5);
        let groups: Vec<u32> = (0..5).map(|i| small.group(i)).collect();
        assert_eq!(groups, vec![0, 2, 4, 6, 8]);

        let large = buf.resample(20);
        assert_eq!(large.group(19), 9);
        assert_eq!(large.group(1), 0);
    }

    #[test]
    fn test_resample_empty() {
        assert!(ParticleBuffer::default().resample(10).is_empty());
    }

    #[test]
    fn test_cache_regenerates_on_key_change() {
        let mut cache = OrbCache::new();
        let make = |_: Shape, n: usize| ParticleBuffer::with_len(n);

        assert_eq!(cache.get_or_generate(Shape::Earth, 10, make).len(), 10);
        cache.get_or_generate(Shape::Earth, 10, make);
        assert_eq!(cache.misses(), 1);
        assert!(cache.is_cached(Shape::Earth, 10));

        cache.get_or_generate(Shape::Earth, 20, make);
        cache.get_or_generate(Shape::Merkaba, 20, make);
        assert_eq!(cache.misses(), 3);
        assert!(!cache.is_cached(Shape::Earth, 20));

        cache.clear();
        assert!(!cache.is_cached(Shape::Merkaba, 20));
    }
}
