//! Shared fixtures and mesh checks for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::chunks::{ChunkId, ChunkLayout};
use crate::field::SphereField;
use crate::grid::VoxelGrid;
use crate::marching::{extract_chunks, InterpolationMode};
use crate::presentation::MeshSink;
use crate::types::{LatticeCoord, RenderMesh, Triangle};

/// Noise-free sphere grid centred on the lattice.
pub fn sphere_grid(resolution: u32) -> VoxelGrid {
  VoxelGrid::populate(resolution, &SphereField::new(resolution))
}

/// Extract every chunk of `layout` and concatenate the triangles.
pub fn extract_all(
  grid: &VoxelGrid,
  layout: &ChunkLayout,
  iso_level: f32,
  mode: InterpolationMode,
) -> Vec<Triangle> {
  extract_chunks(grid, layout.all_bounds(), iso_level, mode)
    .into_iter()
    .flat_map(|e| e.triangles)
    .collect()
}

type EdgeKey = ([u32; 3], [u32; 3]);

fn edge_key(a: glam::Vec3, b: glam::Vec3) -> EdgeKey {
  let a = a.to_array().map(f32::to_bits);
  let b = b.to_array().map(f32::to_bits);
  if a <= b {
    (a, b)
  } else {
    (b, a)
  }
}

/// Number of undirected edges used by an odd number of triangles.
///
/// Zero-length edges (collapsed crossings on iso-valued samples) are skipped.
/// A closed surface has none.
pub fn odd_edge_count(triangles: &[Triangle]) -> usize {
  let mut uses: HashMap<EdgeKey, u32> = HashMap::new();
  for t in triangles {
    for (a, b) in [(t.p1, t.p2), (t.p2, t.p3), (t.p3, t.p1)] {
      if a == b {
        continue;
      }
      *uses.entry(edge_key(a, b)).or_default() += 1;
    }
  }
  uses.values().filter(|&&n| n % 2 == 1).count()
}

/// Signed volume enclosed by the triangles (divergence theorem).
pub fn signed_volume(triangles: &[Triangle]) -> f64 {
  triangles
    .iter()
    .map(|t| {
      let (a, b, c) = (t.p1.as_dvec3(), t.p2.as_dvec3(), t.p3.as_dvec3());
      a.dot(b.cross(c)) / 6.0
    })
    .sum()
}

/// Sink recording every callback, for asserting what the terrain published.
#[derive(Default)]
pub struct RecordingSink {
  pub meshed: Mutex<Vec<(ChunkId, usize)>>,
  pub rejected: Mutex<Vec<LatticeCoord>>,
}

impl MeshSink for RecordingSink {
  fn on_chunk_meshed(&self, chunk: ChunkId, mesh: &RenderMesh) {
    self.meshed.lock().unwrap().push((chunk, mesh.triangle_count()));
  }

  fn on_edit_rejected(&self, coord: LatticeCoord) {
    self.rejected.lock().unwrap().push(coord);
  }
}
