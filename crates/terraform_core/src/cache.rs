//! Per-chunk sample cache in JSON.
//!
//! A cache holds every lattice sample a chunk's cubes read, in x-outer,
//! z-inner order. Loading validates the cache against the current layout;
//! any mismatch is a [`CacheError`] and the caller regenerates from the field.
//! The format carries no version and may change between releases.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chunks::{ChunkId, ChunkLayout};
use crate::error::CacheError;
use crate::grid::VoxelGrid;
use crate::types::ScalarSample;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChunkCache {
  pub chunk_id: ChunkId,
  pub voxel_points: Vec<ScalarSample>,
}

impl ChunkCache {
  /// Snapshot the samples read by `chunk`. `None` for an unknown chunk.
  pub fn capture(grid: &VoxelGrid, layout: &ChunkLayout, chunk: ChunkId) -> Option<Self> {
    let bounds = layout.bounds(chunk)?;
    let voxel_points = bounds
      .sample_coords()
      .filter_map(|coord| grid.get(coord).map(|value| ScalarSample::new(coord, value)))
      .collect();
    Some(Self {
      chunk_id: chunk,
      voxel_points,
    })
  }

  /// Check that the cache matches `expected` under `layout`.
  pub fn validate(&self, layout: &ChunkLayout, expected: ChunkId) -> Result<(), CacheError> {
    if self.chunk_id != expected {
      return Err(CacheError::ChunkMismatch {
        expected,
        found: self.chunk_id,
      });
    }
    let bounds = layout.bounds(expected).ok_or(CacheError::ChunkMismatch {
      expected,
      found: self.chunk_id,
    })?;

    let expected_count = bounds.sample_coords().count();
    if self.voxel_points.len() != expected_count {
      return Err(CacheError::SampleCount {
        expected: expected_count,
        found: self.voxel_points.len(),
      });
    }

    for (sample, coord) in self.voxel_points.iter().zip(bounds.sample_coords()) {
      if sample.coord != coord {
        return Err(CacheError::ForeignSample(sample.coord));
      }
      if !sample.value.is_finite() {
        return Err(CacheError::NonFinite(sample.coord));
      }
    }
    Ok(())
  }

  /// Conventional file name inside a cache directory.
  pub fn file_name(chunk: ChunkId) -> String {
    format!("chunk_{}.json", chunk.0)
  }

  pub fn path_in(dir: &Path, chunk: ChunkId) -> PathBuf {
    dir.join(Self::file_name(chunk))
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CacheError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, self)?;
    Ok(())
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, CacheError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
  }

  pub fn to_json(&self) -> Result<String, CacheError> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn from_json(json: &str) -> Result<Self, CacheError> {
    Ok(serde_json::from_str(json)?)
  }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;
