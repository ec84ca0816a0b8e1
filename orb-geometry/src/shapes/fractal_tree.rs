//! Fractal tree: recursive branching with glowing leaves
//!
//! The trunk splits into three children for the first two levels and into
//! two afterwards, each child rotated by a randomized spread and shortened
//! by a constant factor. Only branch direction is random; the topology
//! (segment and leaf counts) depends on the maximum depth alone.
//!
//! Groups: 0 = branches, 1 = leaves, 2 = glow, 3 = ambient.

use glam::{Quat, Vec3};
use rand::Rng;

use crate::buffer::{ParticleBuffer, ParticleWriter, Partition};
use crate::math::{Color, jitter3, random_on_unit_sphere, sample_ball, unit};

const SCALE: f32 = 0.9;
/// Depth of the generated tree
pub const MAX_DEPTH: u32 = 5;
const LENGTH_DECAY: f32 = 0.65;
const LEAF_RADIUS: f32 = 0.06;

/// One stored tree segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub start: Vec3,
    pub end: Vec3,
    pub depth: u32,
    pub thickness: f32,
}

/// Tree skeleton: every segment plus the leaf endpoints
#[derive(Clone, Debug, Default)]
pub struct TreeSkeleton {
    pub branches: Vec<Branch>,
    pub leaves: Vec<Vec3>,
}

/// Children spawned by a segment at `depth`
#[inline]
pub fn children_at(depth: u32) -> usize {
    if depth < 2 { 3 } else { 2 }
}

/// Closed-form segment count for a tree of `max_depth`
///
/// Sum over levels of the product of branching factors above each level:
/// 1 + 3 + 9 + 18 + 36 + 72 = 139 for depth 5.
pub fn segment_count(max_depth: u32) -> usize {
    let mut level = 1usize;
    let mut total = 0usize;
    for depth in 0..=max_depth {
        total += level;
        level *= children_at(depth);
    }
    total
}

/// Closed-form leaf count (segments on the deepest level)
pub fn leaf_count(max_depth: u32) -> usize {
    (0..max_depth).map(children_at).product()
}

fn grow<R: Rng + ?Sized>(
    rng: &mut R,
    skeleton: &mut TreeSkeleton,
    start: Vec3,
    direction: Vec3,
    length: f32,
    depth: u32,
    max_depth: u32,
) {
    let end = start + direction * length;
    let taper = if max_depth == 0 {
        1.0
    } else {
        1.0 - depth as f32 / max_depth as f32
    };
    skeleton.branches.push(Branch {
        start,
        end,
        depth,
        thickness: (0.05 * taper).max(0.01),
    });

    if depth >= max_depth {
        skeleton.leaves.push(end);
        return;
    }

    let children = children_at(depth);
    let spread = 0.5 + depth as f32 * 0.15;
    for i in 0..children {
        let angle_x = (unit(rng) - 0.5) * spread;
        let angle_z = (unit(rng) - 0.5) * spread;
        let fan = ((i as f32 / (children - 1).max(1) as f32) - 0.5) * spread * 1.5;

        let dir = Quat::from_axis_angle(Vec3::Z, angle_z + fan * 0.5)
            * (Quat::from_axis_angle(Vec3::X, angle_x + fan * 0.5) * direction);

        grow(
            rng,
            skeleton,
            end,
            dir.normalize_or(Vec3::Y),
            length * LENGTH_DECAY,
            depth + 1,
            max_depth,
        );
    }
}

/// Grow a tree skeleton from the standard trunk
pub fn build_branches<R: Rng + ?Sized>(rng: &mut R, max_depth: u32) -> TreeSkeleton {
    let mut skeleton = TreeSkeleton {
        branches: Vec::with_capacity(segment_count(max_depth)),
        leaves: Vec::with_capacity(leaf_count(max_depth)),
    };
    let trunk_start = Vec3::new(0.0, -1.2 * SCALE, 0.0);
    grow(
        rng,
        &mut skeleton,
        trunk_start,
        Vec3::Y,
        0.5 * SCALE,
        0,
        max_depth,
    );
    skeleton
}

/// Generate the fractal tree (55% branches, 30% leaves, 8% glow, remainder ambient)
pub fn generate_fractal_tree<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ParticleBuffer {
    let deep_teal = Color::from_hex(0x0D9488);
    let cyan = Color::from_hex(0x22D3EE);
    let light_cyan = Color::from_hex(0x67E8F9);
    let emerald = Color::from_hex(0x10B981);
    let mint = Color::from_hex(0x6EE7B7);

    let tree = build_branches(rng, MAX_DEPTH);
    let regions = Partition::new(count, &[0.55, 0.30, 0.08]);
    let mut out = ParticleWriter::new(count);

    let per_branch = (regions.count(0) / tree.branches.len().max(1)).max(1);
    'branches: for branch in &tree.branches {
        let depth_factor = branch.depth as f32 / MAX_DEPTH as f32;
        for i in 0..per_branch {
            if out.cursor() >= regions.end(0) {
                break 'branches;
            }
            let t = i as f32 / per_branch as f32;
            let p = branch.start.lerp(branch.end, t) + jitter3(rng, branch.thickness);
            let c = deep_teal
                .lerp(cyan, depth_factor)
                .lerp(light_cyan, t * 0.3)
                .lerp(Color::WHITE, unit(rng) * 0.1);
            out.push(p, c, 0);
        }
    }

    let per_leaf = (regions.count(1) / tree.leaves.len().max(1)).max(1);
    'leaves: for &leaf in &tree.leaves {
        for _ in 0..per_leaf {
            if out.cursor() >= regions.end(1) {
                break 'leaves;
            }
            let offset = sample_ball(rng, LEAF_RADIUS, 0.5);
            let brightness = 1.0 - (offset.length() / LEAF_RADIUS) * 0.5;
            let c = emerald
                .lerp(mint, unit(rng))
                .lerp(Color::WHITE, brightness * 0.4);
            out.push(leaf + offset, c, 1);
        }
    }

    // Tall glow around the crown (absorbs branch and leaf slack)
    while out.cursor() < regions.end(2) {
        let r = 1.2 + unit(rng).powi(2) * 0.4;
        let s = random_on_unit_sphere(rng) * r;
        let p = Vec3::new(s.x * 0.6, s.y * 1.2 - 0.2, s.z * 0.6);
        let c = deep_teal.lerp(cyan, unit(rng)).scale(0.2 + unit(rng) * 0.15);
        out.push(p, c, 2);
    }

    out.fill_remaining(|| {
        let r = 1.3 + unit(rng).powi(2) * 0.5;
        let s = random_on_unit_sphere(rng) * r;
        let p = Vec3::new(s.x * 0.7, s.y * 1.3 - 0.1, s.z * 0.7);
        let c = cyan.lerp(emerald, unit(rng)).scale(0.1 + unit(rng) * 0.08);
        (p, c, 3)
    });

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_well_formed, seeded};

    #[test]
    fn test_segment_count_closed_form() {
        assert_eq!(segment_count(0), 1);
        assert_eq!(segment_count(1), 4);
        assert_eq!(segment_count(2), 13);
        assert_eq!(segment_count(5), 139);
        assert_eq!(leaf_count(0), 1);
        assert_eq!(leaf_count(5), 72);
    }

    #[test]
    fn test_topology_independent_of_rng() {
        for depth in 0..=7 {
            for seed in 0..3 {
                let tree = build_branches(&mut seeded(seed), depth);
                assert_eq!(tree.branches.len(), segment_count(depth), "depth {}", depth);
                assert_eq!(tree.leaves.len(), leaf_count(depth), "depth {}", depth);
            }
        }
    }

    #[test]
    fn test_branch_lengths_decay() {
        let tree = build_branches(&mut seeded(5), MAX_DEPTH);
        for b in &tree.branches {
            let expected = 0.5 * SCALE * LENGTH_DECAY.powi(b.depth as i32);
            assert!((b.start.distance(b.end) - expected).abs() < 1e-4);
            assert!(b.thickness >= 0.01 && b.thickness.is_finite());
        }
    }

    #[test]
    fn test_zero_depth_is_trunk_only() {
        let tree = build_branches(&mut seeded(6), 0);
        assert_eq!(tree.branches.len(), 1);
        assert_eq!(tree.leaves, vec![tree.branches[0].end]);
        assert!(tree.branches[0].thickness.is_finite());
    }

    #[test]
    fn test_fractal_tree_well_formed() {
        let buf = generate_fractal_tree(&mut seeded(101), 5000);
        assert_well_formed(&buf, 5000);
    }
}
