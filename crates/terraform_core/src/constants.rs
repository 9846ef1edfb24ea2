//! Lattice layout constants and flattening helpers.
//!
//! # Lattice Layout
//!
//! The planet lattice is a cube of `resolution³` samples. Samples are stored
//! in a single flat vector with X as the fastest-moving axis:
//!
//! ```text
//! index = z * res² + y * res + x
//!
//! Address:  0       1       ...  res-1     res     ...  res²    ...
//! Content: [0,0,0] [1,0,0]  ... [res-1,0,0][0,1,0] ... [0,0,1] ...
//!          └──────── X ────────┘└──── X ────┘
//! ```
//!
//! This order is part of the cached chunk format and must not change.
//!
//! # Coordinate System
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//!
//! Cube corner indices (marching cubes order):
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (1,1,0)    6 = (1,1,1)
//!   3 = (0,1,0)    7 = (0,1,1)
//! ```

/// Number of corners on a lattice cube.
pub const CUBE_CORNERS: usize = 8;

/// Number of edges on a lattice cube.
pub const CUBE_EDGES: usize = 12;

/// Maximum triangles a single cube configuration can emit.
pub const MAX_TRIANGLES_PER_CUBE: usize = 5;

/// Number of chunk slabs along Y. Fixed at two (upper and lower hemisphere).
pub const Y_SLABS: u32 = 2;

/// Integer offsets from a cube origin to its 8 corners.
pub const CORNER_OFFSETS: [[u32; 3]; CUBE_CORNERS] = [
  [0, 0, 0], // 0
  [1, 0, 0], // 1
  [1, 1, 0], // 2
  [0, 1, 0], // 3
  [0, 0, 1], // 4
  [1, 0, 1], // 5
  [1, 1, 1], // 6
  [0, 1, 1], // 7
];

/// Total number of samples for a lattice of the given resolution.
#[inline(always)]
pub const fn sample_count(resolution: u32) -> usize {
  let r = resolution as usize;
  r * r * r
}

/// Convert 3D lattice coordinates to a flat sample index.
///
/// Layout: X is the minor axis (stride 1), Y is middle (stride res), Z is
/// major (stride res²).
#[inline(always)]
pub const fn coord_to_index(x: u32, y: u32, z: u32, resolution: u32) -> usize {
  let r = resolution as usize;
  (z as usize) * r * r + (y as usize) * r + x as usize
}

/// Convert a flat sample index back to lattice coordinates.
#[inline(always)]
pub const fn index_to_coord(index: usize, resolution: u32) -> (u32, u32, u32) {
  let r = resolution as usize;
  let x = index % r;
  let y = (index / r) % r;
  let z = index / (r * r);
  (x as u32, y as u32, z as u32)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
