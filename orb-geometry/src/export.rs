//! OBJ point-cloud export
//!
//! One `v x y z r g b` line per particle (the vertex-color extension most
//! point-cloud viewers read), preceded by a comment header with the shape
//! name and per-group counts.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::buffer::ParticleBuffer;
use crate::error::OrbError;

/// Particles per group tag, in tag order
pub fn group_histogram(buffer: &ParticleBuffer) -> BTreeMap<u32, usize> {
    let mut histogram = BTreeMap::new();
    for i in 0..buffer.len() {
        *histogram.entry(buffer.group(i)).or_insert(0) += 1;
    }
    histogram
}

/// Write `buffer` as an OBJ point cloud to any writer
pub fn write_points_to<W: Write>(
    writer: &mut W,
    buffer: &ParticleBuffer,
    name: &str,
) -> std::io::Result<()> {
    writeln!(writer, "# {} ({} particles)", name, buffer.len())?;
    for (group, count) in group_histogram(buffer) {
        writeln!(writer, "# group {} {}", group, count)?;
    }
    writeln!(writer, "o {}", name)?;
    for (p, c) in buffer.iter_positions().zip(buffer.iter_colors()) {
        writeln!(
            writer,
            "v {:.6} {:.6} {:.6} {:.4} {:.4} {:.4}",
            p.x, p.y, p.z, c.r, c.g, c.b
        )?;
    }
    Ok(())
}

/// Write `buffer` as an OBJ point cloud file at `path`
pub fn write_points(buffer: &ParticleBuffer, path: &Path, name: &str) -> Result<(), OrbError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_points_to(&mut writer, buffer, name)?;
    writer.flush()?;
    tracing::info!(
        "Exported point cloud: {} particles to {}",
        buffer.len(),
        path.display()
    );
    Ok(())
}
