//! Static chunk partitioning of the lattice.
//!
//! # Layout
//!
//! X and Z are split into `n` slabs of `resolution / n` samples, Y into two
//! slabs of `resolution / 2`. Intervals are half-open ranges of cube origins.
//! The last interval on every axis ends at `resolution - 1`, which is also
//! the last valid cube origin plus one:
//!
//! ```text
//! res = 16, n = 4 (X axis)
//!
//! origin:  0   1   2   3   4  ...  8  ...  12  13  14 | 15
//! chunk:  [─── 0 ────][─── 1 ──][── 2 ──][── 3 ───)   | gap
//! ```
//!
//! Lattice points on the maximal face (`x`, `y` or `z == res - 1`) are
//! therefore read by the last chunks but owned by none.
//!
//! Chunks are ordered x outer, y middle, z inner; a [`ChunkId`] is the
//! position in that order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::Y_SLABS;
use crate::error::ConfigError;
use crate::types::LatticeCoord;

/// Index of a chunk in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub u32);

impl ChunkId {
  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }
}

impl std::fmt::Display for ChunkId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Half-open interval `[begin, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
  pub begin: u32,
  pub end: u32,
}

impl Span {
  pub const fn new(begin: u32, end: u32) -> Self {
    Self { begin, end }
  }

  #[inline]
  pub const fn contains(&self, v: u32) -> bool {
    v >= self.begin && v < self.end
  }

  #[inline]
  pub const fn len(&self) -> u32 {
    self.end.saturating_sub(self.begin)
  }

  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.end <= self.begin
  }

  /// True if the closed range `[lo, hi]` intersects this span.
  #[inline]
  const fn touches(&self, lo: u32, hi: u32) -> bool {
    lo < self.end && hi >= self.begin
  }
}

/// Cube origin ranges of one chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBounds {
  pub x: Span,
  pub y: Span,
  pub z: Span,
}

impl ChunkBounds {
  pub const fn new(x: Span, y: Span, z: Span) -> Self {
    Self { x, y, z }
  }

  /// True if `coord` is a cube origin of this chunk.
  #[inline]
  pub const fn contains(&self, coord: LatticeCoord) -> bool {
    self.x.contains(coord.x) && self.y.contains(coord.y) && self.z.contains(coord.z)
  }

  /// Number of cube origins.
  pub const fn cube_count(&self) -> u32 {
    self.x.len() * self.y.len() * self.z.len()
  }

  /// Every lattice point read by this chunk's cubes (origins plus one).
  pub fn sample_coords(&self) -> impl Iterator<Item = LatticeCoord> + '_ {
    let (xs, ys, zs) = (
      self.x.begin..=self.x.end,
      self.y.begin..=self.y.end,
      self.z.begin..=self.z.end,
    );
    xs.flat_map(move |x| {
      let zs = zs.clone();
      ys.clone()
        .flat_map(move |y| zs.clone().map(move |z| LatticeCoord::new(x, y, z)))
    })
  }
}

/// Reject resolution/chunk-count pairs that cannot be partitioned exactly.
pub fn validate_layout(resolution: u32, chunk_count_per_axis: u32) -> Result<(), ConfigError> {
  if resolution == 0 {
    return Err(ConfigError::ZeroResolution);
  }
  if chunk_count_per_axis == 0 {
    return Err(ConfigError::ZeroChunkCount);
  }
  if resolution % chunk_count_per_axis != 0 {
    return Err(ConfigError::UnevenChunks {
      resolution,
      chunk_count: chunk_count_per_axis,
    });
  }
  if resolution % Y_SLABS != 0 {
    return Err(ConfigError::OddResolution(resolution));
  }
  let step = (resolution / chunk_count_per_axis).min(resolution / Y_SLABS);
  if step < 2 {
    return Err(ConfigError::ChunkTooThin { resolution, step });
  }
  Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChunkLayout {
  resolution: u32,
  chunk_count_per_axis: u32,
  step_xz: u32,
  step_y: u32,
  chunks: Vec<ChunkBounds>,
}

impl ChunkLayout {
  /// Partition a lattice of `resolution³` into `n · 2 · n` chunks.
  pub fn compute(resolution: u32, chunk_count_per_axis: u32) -> Result<Self, ConfigError> {
    validate_layout(resolution, chunk_count_per_axis)?;

    let n = chunk_count_per_axis;
    let step_xz = resolution / n;
    let step_y = resolution / Y_SLABS;

    let span = |i: u32, count: u32, step: u32| {
      let end = if i + 1 == count {
        step * (i + 1) - 1
      } else {
        step * (i + 1)
      };
      Span::new(step * i, end)
    };

    let mut chunks = Vec::with_capacity((n * Y_SLABS * n) as usize);
    for x in 0..n {
      for y in 0..Y_SLABS {
        for z in 0..n {
          chunks.push(ChunkBounds::new(
            span(x, n, step_xz),
            span(y, Y_SLABS, step_y),
            span(z, n, step_xz),
          ));
        }
      }
    }

    tracing::info!(
      resolution,
      chunk_count_per_axis,
      chunks = chunks.len(),
      "Chunk layout computed"
    );

    Ok(Self {
      resolution,
      chunk_count_per_axis,
      step_xz,
      step_y,
      chunks,
    })
  }

  #[inline]
  pub fn resolution(&self) -> u32 {
    self.resolution
  }

  #[inline]
  pub fn chunk_count_per_axis(&self) -> u32 {
    self.chunk_count_per_axis
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  pub fn bounds(&self, id: ChunkId) -> Option<&ChunkBounds> {
    self.chunks.get(id.index())
  }

  /// All chunk bounds in layout order.
  pub fn all_bounds(&self) -> &[ChunkBounds] {
    &self.chunks
  }

  pub fn ids(&self) -> impl Iterator<Item = ChunkId> {
    (0..self.chunks.len() as u32).map(ChunkId)
  }

  pub fn iter(&self) -> impl Iterator<Item = (ChunkId, &ChunkBounds)> {
    self.ids().zip(self.chunks.iter())
  }

  /// Owning chunk of `coord` by linear scan; first match in layout order.
  pub fn locate_chunk(&self, coord: LatticeCoord) -> Option<ChunkId> {
    self
      .chunks
      .iter()
      .position(|b| b.contains(coord))
      .map(|i| ChunkId(i as u32))
  }

  /// Owning chunk of `coord` by index arithmetic. Same answer as
  /// [`locate_chunk`](Self::locate_chunk).
  pub fn locate_chunk_direct(&self, coord: LatticeCoord) -> Option<ChunkId> {
    let n = self.chunk_count_per_axis;
    let ix = coord.x / self.step_xz;
    let iy = coord.y / self.step_y;
    let iz = coord.z / self.step_xz;
    if ix >= n || iy >= Y_SLABS || iz >= n {
      return None;
    }

    let id = ChunkId((ix * Y_SLABS + iy) * n + iz);
    // Rejects the unowned maximal face
    self.bounds(id).filter(|b| b.contains(coord)).map(|_| id)
  }

  /// Chunks with a cube that reads the sample at `coord`, in layout order.
  ///
  /// A sample is a corner of the cubes with origins in `[c - 1, c]` on each
  /// axis.
  pub fn chunks_touching(&self, coord: LatticeCoord) -> SmallVec<[ChunkId; 8]> {
    let lo = |c: u32| c.saturating_sub(1);
    self
      .iter()
      .filter(|(_, b)| {
        b.x.touches(lo(coord.x), coord.x)
          && b.y.touches(lo(coord.y), coord.y)
          && b.z.touches(lo(coord.z), coord.z)
      })
      .map(|(id, _)| id)
      .collect()
  }
}

#[cfg(test)]
#[path = "chunks_test.rs"]
mod chunks_test;
