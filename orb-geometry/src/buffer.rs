//! Particle buffer layout and region bookkeeping
//!
//! A generated shape is three parallel arrays over the same particle count:
//! - `positions`: `3 * n` floats (x, y, z)
//! - `colors`: `3 * n` floats (r, g, b) in `[0, 1]`
//! - `groups`: `n` floats, each an integer feature tag
//!
//! Generators never index the arrays directly. They split the budget with a
//! [`Partition`] and fill it front to back through a [`ParticleWriter`], so
//! every slot is written exactly once.

use bytemuck::{Pod, Zeroable, cast_slice};
use glam::Vec3;

use crate::math::Color;

/// Full-resolution particle budget
pub const PARTICLE_COUNT: usize = 20_000;

/// Interleaved per-particle vertex (28 bytes, POD)
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub group: f32,
}

/// Generated point cloud: positions, colors and group tags
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleBuffer {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub groups: Vec<f32>,
}

impl ParticleBuffer {
    /// Zero-filled buffer holding `count` particles
    pub fn with_len(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
            groups: vec![0.0; count],
        }
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Position of particle `i`
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Color of particle `i`
    #[inline]
    pub fn color(&self, i: usize) -> Color {
        let c = &self.colors[i * 3..i * 3 + 3];
        Color::new(c[0], c[1], c[2])
    }

    /// Group tag of particle `i`
    #[inline]
    pub fn group(&self, i: usize) -> u32 {
        self.groups[i] as u32
    }

    /// Overwrite particle `i`
    pub fn set(&mut self, i: usize, position: Vec3, color: Color, group: u32) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&position.to_array());
        self.colors[i * 3..i * 3 + 3].copy_from_slice(&color.to_array());
        self.groups[i] = group as f32;
    }

    /// Iterate over all positions
    pub fn iter_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Iterate over all colors
    pub fn iter_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2]))
    }

    /// Raw position bytes for GPU upload
    pub fn position_bytes(&self) -> &[u8] {
        cast_slice(&self.positions)
    }

    /// Raw color bytes for GPU upload
    pub fn color_bytes(&self) -> &[u8] {
        cast_slice(&self.colors)
    }

    /// Raw group bytes for GPU upload
    pub fn group_bytes(&self) -> &[u8] {
        cast_slice(&self.groups)
    }

    /// Interleave into a single vertex array
    pub fn vertices(&self) -> Vec<PointVertex> {
        (0..self.len())
            .map(|i| PointVertex {
                position: self.position(i).to_array(),
                color: self.color(i).to_array(),
                group: self.groups[i],
            })
            .collect()
    }

    /// Number of particles sitting exactly at the origin
    ///
    /// A large count usually means a region left slots unwritten.
    pub fn origin_count(&self) -> usize {
        self.iter_positions().filter(|p| *p == Vec3::ZERO).count()
    }

    /// True if any position or color is NaN or infinite
    pub fn has_non_finite(&self) -> bool {
        self.positions
            .iter()
            .chain(self.colors.iter())
            .any(|v| !v.is_finite())
    }

    /// Largest distance from the origin
    pub fn bounding_radius(&self) -> f32 {
        self.iter_positions().map(Vec3::length).fold(0.0, f32::max)
    }
}

/// Front-to-back writer that fills a [`ParticleBuffer`]
///
/// Writes past the end are dropped so a region that overshoots can never
/// corrupt memory; [`ParticleWriter::fill_remaining`] tops up anything a
/// region left behind.
#[derive(Debug)]
pub struct ParticleWriter {
    buffer: ParticleBuffer,
    cursor: usize,
}

impl ParticleWriter {
    /// Writer over a fresh buffer of `count` particles
    pub fn new(count: usize) -> Self {
        Self {
            buffer: ParticleBuffer::with_len(count),
            cursor: 0,
        }
    }

    /// Write the next particle, clamping its color to `[0, 1]`
    ///
    /// Returns `false` (and writes nothing) once the buffer is full.
    #[inline]
    pub fn push(&mut self, position: Vec3, color: Color, group: u32) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer
            .set(self.cursor, position, color.clamped(), group);
        self.cursor += 1;
        true
    }

    /// Index of the next slot to be written
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total capacity
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Slots still unwritten
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_full(&self) -> bool {
        self.cursor >= self.buffer.len()
    }

    /// Ambient fill: call `next` until every slot is written
    pub fn fill_remaining(&mut self, mut next: impl FnMut() -> (Vec3, Color, u32)) {
        while !self.is_full() {
            let (position, color, group) = next();
            self.push(position, color, group);
        }
    }

    /// Consume the writer and return the buffer
    pub fn finish(self) -> ParticleBuffer {
        debug_assert!(
            self.is_full(),
            "buffer under-filled: {} of {} particles written",
            self.cursor,
            self.buffer.len()
        );
        self.buffer
    }
}

/// Split of a particle budget into weighted regions
///
/// Each region gets `floor(weight * total)` particles except the last, which
/// absorbs the rounding remainder so the counts always sum to `total`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    counts: Vec<usize>,
}

impl Partition {
    /// Partition `total` by `weights`
    ///
    /// Weights are the leading regions' fractions; the trailing region is
    /// implicit and receives whatever is left (pass weights summing to less
    /// than 1). Weights whose floors overshoot `total` are truncated.
    pub fn new(total: usize, weights: &[f64]) -> Self {
        let mut counts = Vec::with_capacity(weights.len() + 1);
        let mut used = 0usize;
        for &w in weights {
            // Epsilon keeps exact products like 0.7 * 20000 from flooring to 13999
            let want = (total as f64 * w.max(0.0) + 1e-9).floor() as usize;
            let n = want.min(total - used);
            counts.push(n);
            used += n;
        }
        counts.push(total - used);
        Self { counts }
    }

    /// Particles in region `i`
    pub fn count(&self, i: usize) -> usize {
        self.counts[i]
    }

    /// Exclusive end index of region `i` (cumulative count)
    pub fn end(&self, i: usize) -> usize {
        self.counts[..=i].iter().sum()
    }

    /// Number of regions, including the trailing remainder region
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all region counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Count of the trailing remainder region
    pub fn remainder(&self) -> usize {
        self.counts.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_sums_to_total() {
        for total in [0usize, 1, 7, 99, 1000, PARTICLE_COUNT] {
            let p = Partition::new(total, &[0.1, 0.45, 0.33]);
            assert_eq!(p.total(), total);
            assert_eq!(p.len(), 4);
        }
    }

    #[test]
    fn test_partition_floors() {
        let p = Partition::new(PARTICLE_COUNT, &[0.7, 0.12, 0.1]);
        assert_eq!(p.count(0), 14_000);
        assert_eq!(p.count(1), 2_400);
        assert_eq!(p.count(2), 2_000);
        assert_eq!(p.remainder(), 1_600);
        assert_eq!(p.end(1), 16_400);
    }

    #[test]
    fn test_partition_overshoot_truncated() {
        let p = Partition::new(10, &[0.8, 0.8]);
        assert_eq!(p.count(0), 8);
        assert_eq!(p.count(1), 2);
        assert_eq!(p.remainder(), 0);
    }

    #[test]
    fn test_writer_drops_overflow() {
        let mut w = ParticleWriter::new(2);
        assert!(w.push(Vec3::X, Color::WHITE, 1));
        assert!(w.push(Vec3::Y, Color::WHITE, 2));
        assert!(!w.push(Vec3::Z, Color::WHITE, 3));
        let buf = w.finish();
        assert_eq!(buf.position(1), Vec3::Y);
        assert_eq!(buf.group(1), 2);
    }

    #[test]
    fn test_writer_clamps_color() {
        let mut w = ParticleWriter::new(1);
        w.push(Vec3::ONE, Color::new(2.0, -1.0, 0.5), 0);
        let buf = w.finish();
        assert_eq!(buf.color(0), Color::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_fill_remaining() {
        let mut w = ParticleWriter::new(5);
        w.push(Vec3::X, Color::WHITE, 0);
        w.fill_remaining(|| (Vec3::Y, Color::BLACK, 9));
        assert!(w.is_full());
        let buf = w.finish();
        assert_eq!(buf.group(4), 9);
        assert_eq!(buf.origin_count(), 0);
    }

    #[test]
    fn test_layout_lengths() {
        let buf = ParticleBuffer::with_len(10);
        assert_eq!(buf.positions.len(), 30);
        assert_eq!(buf.colors.len(), 30);
        assert_eq!(buf.groups.len(), 10);
        assert_eq!(buf.position_bytes().len(), 120);
        assert_eq!(buf.group_bytes().len(), 40);
        assert_eq!(std::mem::size_of::<PointVertex>(), 28);
    }

    #[test]
    fn test_vertices_interleave() {
        let mut buf = ParticleBuffer::with_len(2);
        buf.set(1, Vec3::new(1.0, 2.0, 3.0), Color::new(0.1, 0.2, 0.3), 4);
        let verts = buf.vertices();
        assert_eq!(verts[1].position, [1.0, 2.0, 3.0]);
        assert_eq!(verts[1].group, 4.0);
    }
}
