use glam::Vec3;

use super::*;

#[test]
fn test_offset_inside_and_outside() {
  let c = LatticeCoord::new(0, 3, 7);
  assert_eq!(c.offset(1, 0, 0, 8), Some(LatticeCoord::new(1, 3, 7)));
  assert_eq!(c.offset(-1, 0, 0, 8), None);
  assert_eq!(c.offset(0, 0, 1, 8), None);
  assert_eq!(c.offset(0, -3, -7, 8), Some(LatticeCoord::new(0, 0, 0)));
}

#[test]
fn test_from_world_rounds_to_nearest() {
  let c = LatticeCoord::from_world(Vec3::new(1.4, 2.6, 0.0), 8);
  assert_eq!(c, Some(LatticeCoord::new(1, 3, 0)));

  assert_eq!(LatticeCoord::from_world(Vec3::new(-0.6, 0.0, 0.0), 8), None);
  assert_eq!(LatticeCoord::from_world(Vec3::new(7.6, 0.0, 0.0), 8), None);
  assert_eq!(LatticeCoord::from_world(Vec3::splat(f32::NAN), 8), None);
}

#[test]
fn test_triangle_normal_is_right_handed() {
  let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
  assert_eq!(t.normal(), Vec3::Z);
  assert!(!t.is_degenerate());

  let flat = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X);
  assert!(flat.is_degenerate());
}

#[test]
fn test_render_mesh_reverses_winding() {
  let t = Triangle::new(
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(2.0, 0.0, 0.0),
    Vec3::new(3.0, 0.0, 0.0),
  );
  let mesh = RenderMesh::from_triangles(&[t, t]);

  assert_eq!(mesh.vertices.len(), 6);
  assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
  assert_eq!(mesh.vertices[0], [3.0, 0.0, 0.0]);
  assert_eq!(mesh.vertices[1], [2.0, 0.0, 0.0]);
  assert_eq!(mesh.vertices[2], [1.0, 0.0, 0.0]);
  assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn test_render_mesh_bounds() {
  let t = Triangle::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 0.0));
  let mesh = RenderMesh::from_triangles(&[t]);

  assert!(mesh.bounds.is_valid());
  assert_eq!(mesh.bounds.min, [-1.0, 0.0, 0.0]);
  assert_eq!(mesh.bounds.max, [1.0, 2.0, 3.0]);
}

#[test]
fn test_render_mesh_clear() {
  let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
  let mut mesh = RenderMesh::from_triangles(&[t]);
  mesh.clear();

  assert!(mesh.is_empty());
  assert_eq!(mesh.triangle_count(), 0);
  assert!(!mesh.bounds.is_valid());
}

#[test]
fn test_sample_serializes_as_plain_fields() {
  let sample = ScalarSample::new(LatticeCoord::new(1, 2, 3), 4.5);
  let json = serde_json::to_string(&sample).unwrap();
  assert_eq!(json, r#"{"coord":{"x":1,"y":2,"z":3},"value":4.5}"#);
}
