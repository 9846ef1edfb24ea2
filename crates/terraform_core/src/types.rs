//! Core data types shared by the field, extractor and terrain.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Integer lattice position. Identity of a scalar sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LatticeCoord {
  pub x: u32,
  pub y: u32,
  pub z: u32,
}

impl LatticeCoord {
  pub const fn new(x: u32, y: u32, z: u32) -> Self {
    Self { x, y, z }
  }

  /// True if every component is below `resolution`.
  #[inline]
  pub const fn in_lattice(&self, resolution: u32) -> bool {
    self.x < resolution && self.y < resolution && self.z < resolution
  }

  /// Neighbouring coordinate, or `None` if it leaves the lattice.
  pub fn offset(&self, dx: i32, dy: i32, dz: i32, resolution: u32) -> Option<Self> {
    let shift = |c: u32, d: i32| -> Option<u32> {
      let v = c as i64 + d as i64;
      (v >= 0 && v < resolution as i64).then_some(v as u32)
    };
    Some(Self::new(
      shift(self.x, dx)?,
      shift(self.y, dy)?,
      shift(self.z, dz)?,
    ))
  }

  /// Nearest lattice point to a position in lattice-local space.
  ///
  /// Returns `None` for positions that round outside the lattice. Hit
  /// testing and world-to-local transforms stay with the caller.
  pub fn from_world(pos: Vec3, resolution: u32) -> Option<Self> {
    let rounded = pos.round();
    if !rounded.is_finite() || rounded.min_element() < 0.0 {
      return None;
    }
    let coord = Self::new(rounded.x as u32, rounded.y as u32, rounded.z as u32);
    coord.in_lattice(resolution).then_some(coord)
  }

  #[inline]
  pub fn as_vec3(&self) -> Vec3 {
    Vec3::new(self.x as f32, self.y as f32, self.z as f32)
  }

  #[inline]
  pub const fn to_array(&self) -> [u32; 3] {
    [self.x, self.y, self.z]
  }
}

impl From<[u32; 3]> for LatticeCoord {
  fn from([x, y, z]: [u32; 3]) -> Self {
    Self::new(x, y, z)
  }
}

impl From<(u32, u32, u32)> for LatticeCoord {
  fn from((x, y, z): (u32, u32, u32)) -> Self {
    Self::new(x, y, z)
  }
}

impl std::fmt::Display for LatticeCoord {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {}, {})", self.x, self.y, self.z)
  }
}

/// One lattice point and its density value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarSample {
  pub coord: LatticeCoord,
  pub value: f32,
}

impl ScalarSample {
  pub const fn new(coord: LatticeCoord, value: f32) -> Self {
    Self { coord, value }
  }
}

/// Triangle in lattice space, corners in triangle-table order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub p1: Vec3,
  pub p2: Vec3,
  pub p3: Vec3,
}

impl Triangle {
  pub const fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
    Self { p1, p2, p3 }
  }

  /// Unnormalized right-handed normal of `(p1, p2, p3)`.
  ///
  /// Points towards the side of the surface above the iso-level.
  #[inline]
  pub fn normal(&self) -> Vec3 {
    (self.p2 - self.p1).cross(self.p3 - self.p1)
  }

  /// True if two corners coincide or all three are collinear.
  pub fn is_degenerate(&self) -> bool {
    self.normal().length_squared() <= f32::EPSILON * f32::EPSILON
  }

  /// Corners in emission order for render meshes (p3, p2, p1).
  #[inline]
  pub fn emission_order(&self) -> [Vec3; 3] {
    [self.p3, self.p2, self.p1]
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Flat vertex + index buffers handed to a rendering sink.
///
/// Every triangle contributes three new vertices; indices are sequential.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderMesh {
  pub vertices: Vec<[f32; 3]>,
  pub indices: Vec<u32>,
  pub bounds: MinMaxAABB,
}

impl RenderMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build render buffers from extracted triangles, emitting p3, p2, p1.
  pub fn from_triangles(triangles: &[Triangle]) -> Self {
    let mut mesh = Self {
      vertices: Vec::with_capacity(triangles.len() * 3),
      indices: Vec::with_capacity(triangles.len() * 3),
      bounds: MinMaxAABB::empty(),
    };

    for triangle in triangles {
      for corner in triangle.emission_order() {
        let position = corner.to_array();
        mesh.indices.push(mesh.vertices.len() as u32);
        mesh.vertices.push(position);
        mesh.bounds.encapsulate(position);
      }
    }

    mesh
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
