//! Wavefront OBJ export of all chunk meshes.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use terraform_core::Terrain;

/// Write every chunk as its own `o chunk_N` object.
///
/// Vertices are not shared; faces use the render winding (p3, p2, p1).
pub fn export_obj(terrain: &Terrain, path: &Path) -> Result<()> {
	let file = std::fs::File::create(path)
		.with_context(|| format!("Failed to create OBJ file: {}", path.display()))?;
	let mut w = std::io::BufWriter::new(file);
	write_obj(terrain, &mut w)?;
	w.flush()?;
	Ok(())
}

pub fn write_obj<W: Write>(terrain: &Terrain, w: &mut W) -> Result<()> {
	writeln!(w, "# terraform planet")?;
	writeln!(w, "# Resolution: {}", terrain.config().resolution)?;
	writeln!(w, "# Triangles: {}", terrain.total_triangles())?;

	// OBJ indices are 1-based and global across objects
	let mut base = 1u32;
	for (id, mesh) in terrain.chunk_meshes() {
		if mesh.is_empty() {
			continue;
		}
		let render = mesh.render_mesh();

		writeln!(w, "o chunk_{}", id.0)?;
		for [x, y, z] in &render.vertices {
			writeln!(w, "v {} {} {}", x, y, z)?;
		}
		for tri in render.indices.chunks_exact(3) {
			writeln!(w, "f {} {} {}", base + tri[0], base + tri[1], base + tri[2])?;
		}
		base += render.vertices.len() as u32;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use terraform_core::TerrainConfig;

	#[test]
	fn test_obj_counts() {
		let config = TerrainConfig::new()
			.with_resolution(8)
			.with_chunk_count(2)
			.with_iso_level(3.0)
			.without_noise();
		let terrain = Terrain::from_config(config).unwrap();

		let mut out = Vec::new();
		write_obj(&terrain, &mut out).unwrap();
		let text = String::from_utf8(out).unwrap();

		let tris = terrain.total_triangles();
		assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), tris * 3);
		assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), tris);

		// Last face references the last vertex
		let last_face = text.lines().rev().find(|l| l.starts_with("f ")).unwrap();
		assert!(last_face.ends_with(&format!(" {}", tris * 3)));
	}
}
