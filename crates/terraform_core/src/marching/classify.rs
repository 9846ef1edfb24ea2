//! Cube corner classification.

use crate::constants::CUBE_CORNERS;
use crate::tables::{EDGE_TABLE, TABLE_END, TRIANGLE_TABLE};

/// 8-bit cube configuration. Bit `i` is set iff corner `i` is above iso.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeConfiguration(pub u8);

impl CubeConfiguration {
  /// All corners at or below iso.
  pub const EMPTY: Self = Self(0);
  /// All corners above iso.
  pub const FULL: Self = Self(255);

  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }

  /// No surface passes through the cube.
  #[inline]
  pub const fn is_homogeneous(self) -> bool {
    self.0 == 0 || self.0 == 255
  }

  /// Bitmask of edges with a surface crossing.
  #[inline]
  pub fn edge_mask(self) -> u16 {
    EDGE_TABLE[self.index()]
  }

  /// Edge triples for this configuration, in table order.
  pub fn triangles(self) -> impl Iterator<Item = [usize; 3]> {
    let row = &TRIANGLE_TABLE[self.index()];
    row
      .chunks_exact(3)
      .take_while(|tri| tri[0] != TABLE_END)
      .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
  }

  pub fn triangle_count(self) -> usize {
    self.triangles().count()
  }
}

/// Classify eight corner values against `iso_level`.
///
/// Strict comparison: a corner exactly at iso counts as below.
#[inline]
pub fn classify(corner_values: &[f32; CUBE_CORNERS], iso_level: f32) -> CubeConfiguration {
  let mut config = 0u8;
  for (i, &value) in corner_values.iter().enumerate() {
    if value > iso_level {
      config |= 1 << i;
    }
  }
  CubeConfiguration(config)
}
