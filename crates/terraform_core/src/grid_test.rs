use super::*;
use crate::field::{ConstantField, SphereField};

#[test]
fn test_populate_layout_matches_flattening() {
  let field = |c: LatticeCoord| (c.x + 10 * c.y + 100 * c.z) as f32;
  let grid = VoxelGrid::populate(4, &field);

  assert_eq!(grid.len(), 64);
  for (i, sample) in grid.samples().iter().enumerate() {
    let (x, y, z) = index_to_coord(i, 4);
    assert_eq!(sample.coord, LatticeCoord::new(x, y, z));
    assert_eq!(sample.value, (x + 10 * y + 100 * z) as f32);
  }
}

#[test]
fn test_populate_matches_serial_evaluation() {
  let field = SphereField::new(8).with_noise(0.3, 2.0);
  let grid = VoxelGrid::populate(8, &field);

  for sample in grid.samples() {
    assert_eq!(sample.value, field.evaluate(sample.coord));
  }
}

#[test]
fn test_filled_equals_constant_field() {
  let a = VoxelGrid::filled(6, 1.25);
  let b = VoxelGrid::populate(6, &ConstantField(1.25));
  assert_eq!(a, b);
}

#[test]
fn test_get_and_set() {
  let mut grid = VoxelGrid::filled(4, 0.0);
  let c = LatticeCoord::new(1, 2, 3);

  assert_eq!(grid.set(c, 5.0), Some(0.0));
  assert_eq!(grid.get(c), Some(5.0));
  assert_eq!(grid.value(1, 2, 3), 5.0);

  let outside = LatticeCoord::new(4, 0, 0);
  assert_eq!(grid.set(outside, 1.0), None);
  assert_eq!(grid.get(outside), None);

  // Length never changes
  assert_eq!(grid.len(), 64);
}

#[test]
fn test_corner_values_follow_corner_order() {
  let field = |c: LatticeCoord| (c.x + 2 * c.y + 4 * c.z) as f32;
  let grid = VoxelGrid::populate(3, &field);

  let corners = grid.corner_values(1, 1, 1);
  let base = 1.0 + 2.0 + 4.0;
  assert_eq!(
    corners,
    [
      base,
      base + 1.0,
      base + 3.0,
      base + 2.0,
      base + 4.0,
      base + 5.0,
      base + 7.0,
      base + 6.0,
    ]
  );
}
