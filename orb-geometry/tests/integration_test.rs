//! End-to-end tests over the public API.
//!
//! Covers:
//! 1. Buffer invariants for every shape at the full particle budget
//! 2. Merkaba, Earth and fallback dispatch scenarios
//! 3. Config file loading and point-cloud export

use std::collections::HashMap;

use tempfile::tempdir;

use orb_geometry::shapes::{CITY_GLOW, find_city};
use orb_geometry::{
    Color, GeneratorConfig, OrbCache, OrbError, OrbGenerator, PARTICLE_COUNT, ParticleBuffer,
    Shape, group_histogram, preview_particle_count, write_points,
};

fn assert_invariants(shape: Shape, buf: &ParticleBuffer) {
    let n = PARTICLE_COUNT;
    assert_eq!(buf.positions.len(), 3 * n, "{shape}: positions");
    assert_eq!(buf.colors.len(), 3 * n, "{shape}: colors");
    assert_eq!(buf.groups.len(), n, "{shape}: groups");
    assert!(!buf.has_non_finite(), "{shape}: non-finite values");
    assert!(
        buf.colors.iter().all(|c| (0.0..=1.0).contains(c)),
        "{shape}: color out of range"
    );
    assert!(
        buf.origin_count() < n / 200,
        "{shape}: {} particles at the origin",
        buf.origin_count()
    );
}

#[test]
fn every_shape_fills_full_budget() {
    let generator = OrbGenerator::with_seed(2024);
    let buffers = generator.generate_many(&Shape::ALL);
    assert_eq!(buffers.len(), Shape::ALL.len());
    for (shape, buf) in Shape::ALL.iter().zip(&buffers) {
        assert_invariants(*shape, buf);
    }
}

#[test]
fn merkaba_has_white_core_and_gold_edges() {
    let mut generator = OrbGenerator::with_seed(1);
    for _ in 0..2 {
        let buf = generator.generate(Shape::Merkaba);
        assert_eq!(buf.len(), PARTICLE_COUNT);
        assert!(!buf.has_non_finite());
        assert!(buf.iter_colors().any(|c| c == Color::WHITE));
        assert!(buf.iter_colors().any(|c| c.r > 0.8 && c.g > 0.6 && c.b < 0.3));
    }
}

#[test]
fn earth_lights_tokyo() {
    let mut generator = OrbGenerator::with_seed(35);
    let buf = generator.generate(Shape::Earth);
    let tokyo = find_city("Tokyo").expect("Tokyo is in the city table");
    let center = tokyo.cap.center();
    let glow = Color::from_hex(CITY_GLOW);

    let lit = (0..buf.len()).filter(|&i| {
        let dir = buf.position(i).normalize();
        dir.dot(center) > tokyo.cap.min_dot() - 1e-4 && buf.color(i) == glow
    });
    assert!(lit.count() > 0, "No city-glow particle near Tokyo");
}

#[test]
fn unknown_tag_falls_back_to_sphere() {
    let mut generator = OrbGenerator::with_seed(5);
    for tag in ["", "hypercube", "default", "MERKABA"] {
        let buf = generator.generate_tag(tag);
        assert_eq!(buf.len(), PARTICLE_COUNT);
        for p in buf.iter_positions() {
            let r = p.length();
            assert!((1.0 - 1e-4..=1.15 + 1e-4).contains(&r), "{tag:?}: radius {r}");
        }
    }
}

#[test]
fn region_proportions_are_stable_across_runs() {
    let mut generator = OrbGenerator::with_seed(8);
    let a = group_histogram(&generator.generate(Shape::DoubleHelix));
    let b = group_histogram(&generator.generate(Shape::DoubleHelix));
    // Fixed regions are identical; only positions differ
    assert_eq!(a, b);
    assert_eq!(a[&0], 7000);
    assert_eq!(a[&1], 7000);
}

#[test]
fn fractal_tree_topology_is_fixed() {
    use orb_geometry::shapes::{build_branches, segment_count};
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let tree = build_branches(&mut rng, 5);
    assert_eq!(tree.branches.len(), 139);
    assert_eq!(segment_count(5), 139);
    assert_eq!(tree.leaves.len(), 72);
}

#[test]
fn config_file_drives_generator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orb.toml");
    std::fs::write(
        &path,
        "particle_count = 1500\nseed = 99\nfallback_palette = [\"#ff0000\"]\n",
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();
    let mut generator = OrbGenerator::new(config);
    assert_eq!(generator.seed(), 99);
    let buf = generator.generate(Shape::Default);
    assert_eq!(buf.len(), 1500);
    assert!(buf.iter_colors().all(|c| c == Color::from_hex(0xFF0000)));
}

#[test]
fn bad_config_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orb.toml");
    std::fs::write(&path, "seed = [1, 2").unwrap();
    assert!(matches!(
        GeneratorConfig::load(&path),
        Err(OrbError::ConfigParse(_))
    ));
}

#[test]
fn export_writes_every_particle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("merkaba.obj");
    let buf = OrbGenerator::new(GeneratorConfig {
        particle_count: 400,
        seed: Some(3),
        ..Default::default()
    })
    .generate(Shape::Merkaba);

    write_points(&buf, &path, "merkaba").unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
    assert_eq!(vertices, 400);

    let mut header: HashMap<u32, usize> = HashMap::new();
    for line in text.lines().filter(|l| l.starts_with("# group ")) {
        let mut parts = line["# group ".len()..].split_whitespace();
        let group: u32 = parts.next().unwrap().parse().unwrap();
        let count: usize = parts.next().unwrap().parse().unwrap();
        header.insert(group, count);
    }
    assert_eq!(header.values().sum::<usize>(), 400);
    assert_eq!(header[&2], 40);
}

#[test]
fn preview_cache_reuses_buffer() {
    let mut generator = OrbGenerator::with_seed(12);
    let mut cache = OrbCache::new();
    let size = 80.0;
    let count = preview_particle_count(size);
    assert_eq!(count, 3200);

    for _ in 0..3 {
        let buf = cache.get_or_generate(Shape::SriYantra, count, |shape, _| {
            generator.generate_sized(shape, size)
        });
        assert_eq!(buf.len(), count);
    }
    assert_eq!(cache.misses(), 1);
}
