use glam::Vec3;

use super::*;
use crate::chunks::{ChunkBounds, ChunkLayout, Span};
use crate::field::ConstantField;
use crate::grid::VoxelGrid;
use crate::test_utils::{extract_all, odd_edge_count, signed_volume, sphere_grid};
use crate::types::LatticeCoord;

fn full_bounds(res: u32) -> ChunkBounds {
  let s = Span::new(0, res - 1);
  ChunkBounds::new(s, s, s)
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_classify_homogeneous() {
  assert_eq!(classify(&[0.0; 8], 1.0), CubeConfiguration::EMPTY);
  assert_eq!(classify(&[2.0; 8], 1.0), CubeConfiguration::FULL);
  assert_eq!(CubeConfiguration::EMPTY.triangles().count(), 0);
  assert_eq!(CubeConfiguration::FULL.triangles().count(), 0);
  assert!(CubeConfiguration::FULL.is_homogeneous());
}

#[test]
fn test_classify_is_strict() {
  // Exactly at iso counts as below
  assert_eq!(classify(&[1.0; 8], 1.0), CubeConfiguration::EMPTY);

  let mut values = [0.0; 8];
  values[3] = 1.5;
  values[6] = 1.0;
  assert_eq!(classify(&values, 1.0), CubeConfiguration(1 << 3));
}

#[test]
fn test_configuration_triangles() {
  let config = CubeConfiguration(1);
  assert_eq!(config.triangles().collect::<Vec<_>>(), vec![[0, 8, 3]]);
  assert_eq!(config.triangle_count(), 1);
  assert_eq!(config.edge_mask(), (1 << 0) | (1 << 3) | (1 << 8));
  assert!(!config.is_homogeneous());
}

// =============================================================================
// Interpolation
// =============================================================================

#[test]
fn test_interpolate_midpoint_property_both_modes() {
  let a = Vec3::new(2.0, 4.0, 6.0);
  let b = Vec3::new(3.0, 4.0, 6.0);
  let expected = Vec3::new(2.5, 4.0, 6.0);

  let linear = interpolate(a, b, 0.0, 1.0, 0.5, InterpolationMode::Linear);
  let midpoint = interpolate(a, b, 0.0, 1.0, 0.5, InterpolationMode::Midpoint);

  assert_eq!(linear.position, expected);
  assert_eq!(midpoint.position, expected);
  assert!(!linear.degenerate);
  assert!(!midpoint.degenerate);
}

#[test]
fn test_interpolate_linear_position() {
  let hit = interpolate(Vec3::ZERO, Vec3::Y, 1.0, 5.0, 2.0, InterpolationMode::Linear);
  assert_eq!(hit.position, Vec3::new(0.0, 0.25, 0.0));
}

#[test]
fn test_midpoint_mode_ignores_values() {
  let hit = interpolate(Vec3::ZERO, Vec3::Z, 1.0, 100.0, 2.0, InterpolationMode::Midpoint);
  assert_eq!(hit.position, Vec3::new(0.0, 0.0, 0.5));
}

#[test]
fn test_interpolate_equal_values_is_degenerate() {
  let hit = interpolate(Vec3::ZERO, Vec3::X, 3.0, 3.0, 3.0, InterpolationMode::Linear);
  assert!(hit.degenerate);
  assert_eq!(hit.position, Vec3::new(0.5, 0.0, 0.0));
  assert!(hit.position.is_finite());
}

#[test]
fn test_interpolate_clamps_t() {
  // iso outside the value range
  let hit = interpolate(Vec3::ZERO, Vec3::X, 0.0, 1.0, 4.0, InterpolationMode::Linear);
  assert_eq!(hit.position, Vec3::X);

  let hit = interpolate(Vec3::ZERO, Vec3::X, 0.0, 1.0, -4.0, InterpolationMode::Linear);
  assert_eq!(hit.position, Vec3::ZERO);
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn test_constant_field_yields_nothing() {
  let grid = VoxelGrid::populate(8, &ConstantField(0.0));
  let layout = ChunkLayout::compute(8, 2).unwrap();

  for extraction in extract_chunks(&grid, layout.all_bounds(), 1.0, InterpolationMode::Linear) {
    assert!(extraction.triangles.is_empty());
    assert_eq!(extraction.stats.active_cubes, 0);
    assert!(extraction.stats.cubes_visited > 0);
  }
}

#[test]
fn test_zero_width_bounds_yield_nothing() {
  let grid = sphere_grid(8);
  let empty = ChunkBounds::new(Span::new(2, 2), Span::new(0, 7), Span::new(0, 7));
  let out = extract(&grid, &empty, 3.0, InterpolationMode::Linear);

  assert!(out.triangles.is_empty());
  assert_eq!(out.stats, ExtractStats::default());
}

#[test]
fn test_origins_clamped_inside_lattice() {
  let grid = sphere_grid(8);
  let oversized = ChunkBounds::new(Span::new(0, 100), Span::new(0, 100), Span::new(0, 100));
  let out = extract(&grid, &oversized, 3.0, InterpolationMode::Linear);
  assert_eq!(out.stats.cubes_visited, 7 * 7 * 7);
}

#[test]
fn test_extraction_is_idempotent() {
  let grid = VoxelGrid::populate(
    16,
    &crate::field::SphereField::new(16).with_noise(0.17, 2.0),
  );
  let bounds = full_bounds(16);

  let a = extract(&grid, &bounds, 5.0, InterpolationMode::Linear);
  let b = extract(&grid, &bounds, 5.0, InterpolationMode::Linear);
  assert_eq!(a, b);
  assert!(!a.triangles.is_empty());
}

#[test]
fn test_chunked_extraction_matches_whole_lattice() {
  let grid = sphere_grid(16);
  let layout = ChunkLayout::compute(16, 4).unwrap();

  let whole = extract(&grid, &full_bounds(16), 5.0, InterpolationMode::Linear);
  let chunked = extract_all(&grid, &layout, 5.0, InterpolationMode::Linear);

  assert_eq!(whole.triangles.len(), chunked.len());
  assert_eq!(odd_edge_count(&chunked), 0);
}

#[test]
fn test_parallel_extraction_preserves_order() {
  let grid = sphere_grid(16);
  let layout = ChunkLayout::compute(16, 4).unwrap();

  let parallel = extract_chunks(&grid, layout.all_bounds(), 5.0, InterpolationMode::Linear);
  assert_eq!(parallel.len(), layout.len());
  for (bounds, extraction) in layout.all_bounds().iter().zip(&parallel) {
    assert_eq!(
      *extraction,
      extract(&grid, bounds, 5.0, InterpolationMode::Linear)
    );
  }
}

#[test]
fn test_sphere_is_closed_and_outward() {
  let grid = sphere_grid(8);
  let layout = ChunkLayout::compute(8, 2).unwrap();
  let triangles = extract_all(&grid, &layout, 3.0, InterpolationMode::Linear);

  assert!(!triangles.is_empty());
  assert_eq!(odd_edge_count(&triangles), 0, "Mesh has boundary edges");

  let volume = signed_volume(&triangles);
  let ideal = 4.0 / 3.0 * std::f64::consts::PI * 27.0;
  assert!(volume > 0.0, "Normals should face outwards, volume {}", volume);
  assert!(
    volume > 0.6 * ideal && volume < 1.2 * ideal,
    "Volume {} far from {}",
    volume,
    ideal
  );
}

#[test]
fn test_sphere_midpoint_mode_is_closed() {
  // Radius 5 keeps the surface clear of the lattice faces
  let grid = sphere_grid(16);
  let layout = ChunkLayout::compute(16, 4).unwrap();
  let triangles = extract_all(&grid, &layout, 5.0, InterpolationMode::Midpoint);

  assert_eq!(odd_edge_count(&triangles), 0);
  assert!(signed_volume(&triangles) > 0.0);
}

#[test]
fn test_triangles_stay_inside_their_cubes() {
  let grid = sphere_grid(16);
  let bounds = ChunkBounds::new(Span::new(4, 8), Span::new(0, 8), Span::new(8, 12));
  let out = extract(&grid, &bounds, 5.0, InterpolationMode::Linear);

  for t in &out.triangles {
    for p in [t.p1, t.p2, t.p3] {
      assert!(p.x >= 4.0 && p.x <= 8.0, "{:?}", p);
      assert!(p.y >= 0.0 && p.y <= 8.0, "{:?}", p);
      assert!(p.z >= 8.0 && p.z <= 12.0, "{:?}", p);
    }
  }
}

#[test]
fn test_non_finite_crossing_counted_as_degenerate() {
  let mut grid = VoxelGrid::filled(4, f32::NEG_INFINITY);
  grid.set(LatticeCoord::new(1, 1, 1), f32::INFINITY);

  let out = extract(&grid, &full_bounds(4), 0.0, InterpolationMode::Linear);
  assert!(out.stats.degenerate_edges > 0);
  for t in &out.triangles {
    assert!(t.p1.is_finite() && t.p2.is_finite() && t.p3.is_finite());
  }
}
