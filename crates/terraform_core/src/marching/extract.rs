//! Per-chunk triangle extraction.

use glam::Vec3;
use rayon::prelude::*;

use super::classify::classify;
use super::interpolate::{interpolate, InterpolationMode};
use crate::chunks::ChunkBounds;
use crate::constants::{CORNER_OFFSETS, CUBE_CORNERS, CUBE_EDGES, MAX_TRIANGLES_PER_CUBE};
use crate::grid::VoxelGrid;
use crate::tables::EDGE_CORNERS;
use crate::types::Triangle;

/// Counters gathered during one extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
  /// Cubes whose origin fell inside the bounds.
  pub cubes_visited: u32,
  /// Cubes with a mixed configuration.
  pub active_cubes: u32,
  /// Edge crossings placed at the midpoint because both values were equal.
  pub degenerate_edges: u32,
}

impl std::ops::AddAssign for ExtractStats {
  fn add_assign(&mut self, rhs: Self) {
    self.cubes_visited += rhs.cubes_visited;
    self.active_cubes += rhs.active_cubes;
    self.degenerate_edges += rhs.degenerate_edges;
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
  pub triangles: Vec<Triangle>,
  pub stats: ExtractStats,
}

/// Extract the iso-surface triangles of every cube whose origin lies in
/// `bounds`.
///
/// Origins are further limited to `resolution - 2` so the far corner stays in
/// the lattice. Iteration is x outer, y middle, z inner; the output order is
/// deterministic.
pub fn extract(
  grid: &VoxelGrid,
  bounds: &ChunkBounds,
  iso_level: f32,
  mode: InterpolationMode,
) -> Extraction {
  let mut out = Extraction::default();
  let res = grid.resolution();
  if res < 2 {
    return out;
  }
  let last_origin = res - 1;

  let xs = bounds.x.begin..bounds.x.end.min(last_origin);
  let ys = bounds.y.begin..bounds.y.end.min(last_origin);
  let zs = bounds.z.begin..bounds.z.end.min(last_origin);

  for x in xs {
    for y in ys.clone() {
      for z in zs.clone() {
        out.stats.cubes_visited += 1;
        march_cube(grid, [x, y, z], iso_level, mode, &mut out);
      }
    }
  }

  if out.stats.degenerate_edges > 0 {
    tracing::debug!(
      ?bounds,
      degenerate_edges = out.stats.degenerate_edges,
      iso_level,
      "Degenerate edge interpolations fell back to midpoints"
    );
  }

  out
}

#[inline]
fn march_cube(
  grid: &VoxelGrid,
  origin: [u32; 3],
  iso_level: f32,
  mode: InterpolationMode,
  out: &mut Extraction,
) {
  let [x, y, z] = origin;
  let values = grid.corner_values(x, y, z);
  let config = classify(&values, iso_level);
  if config.is_homogeneous() {
    return;
  }
  out.stats.active_cubes += 1;

  let mut positions = [Vec3::ZERO; CUBE_CORNERS];
  for (pos, [dx, dy, dz]) in positions.iter_mut().zip(CORNER_OFFSETS) {
    *pos = Vec3::new((x + dx) as f32, (y + dy) as f32, (z + dz) as f32);
  }

  // Place each crossing edge once per cube
  let mask = config.edge_mask();
  let mut edge_points = [Vec3::ZERO; CUBE_EDGES];
  for (edge, &[c0, c1]) in EDGE_CORNERS.iter().enumerate() {
    if mask & (1 << edge) == 0 {
      continue;
    }
    let (c0, c1) = (c0 as usize, c1 as usize);
    let hit = interpolate(positions[c0], positions[c1], values[c0], values[c1], iso_level, mode);
    if hit.degenerate {
      out.stats.degenerate_edges += 1;
    }
    edge_points[edge] = hit.position;
  }

  out.triangles.reserve(MAX_TRIANGLES_PER_CUBE);
  for [a, b, c] in config.triangles() {
    out
      .triangles
      .push(Triangle::new(edge_points[a], edge_points[b], edge_points[c]));
  }
}

/// Extract many chunks in parallel against a shared read-only grid.
///
/// Output order matches `bounds` order.
pub fn extract_chunks(
  grid: &VoxelGrid,
  bounds: &[ChunkBounds],
  iso_level: f32,
  mode: InterpolationMode,
) -> Vec<Extraction> {
  bounds
    .par_iter()
    .map(|b| extract(grid, b, iso_level, mode))
    .collect()
}
