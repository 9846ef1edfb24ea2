//! Error types for configuration, terrain edits and chunk caches.

use thiserror::Error;

use crate::chunks::ChunkId;
use crate::terrain::Edit;
use crate::types::LatticeCoord;

/// Invalid configuration, raised before any lattice is allocated.
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("resolution must be greater than zero")]
  ZeroResolution,

  #[error("chunk count per axis must be greater than zero")]
  ZeroChunkCount,

  #[error("resolution {resolution} is not divisible by chunk count {chunk_count}")]
  UnevenChunks { resolution: u32, chunk_count: u32 },

  #[error("resolution {0} must be even (Y is split into two slabs)")]
  OddResolution(u32),

  #[error("chunk step {step} is too thin to hold a cube (resolution {resolution})")]
  ChunkTooThin { resolution: u32, step: u32 },

  #[error("iso level must be finite, got {0}")]
  InvalidIsoLevel(f32),

  #[error("noise parameters must be finite (scale {scale}, height {height})")]
  InvalidNoise { scale: f32, height: f32 },

  #[error("grid resolution {found} does not match configured resolution {expected}")]
  GridMismatch { expected: u32, found: u32 },

  #[error("failed to read config: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
}

/// Failure loading or validating a persisted chunk cache.
#[derive(Error, Debug)]
pub enum CacheError {
  #[error("cache IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("cache is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("cache belongs to chunk {found}, expected {expected}")]
  ChunkMismatch { expected: ChunkId, found: ChunkId },

  #[error("cache holds {found} samples, chunk needs {expected}")]
  SampleCount { expected: usize, found: usize },

  #[error("cached sample {0} lies outside the chunk")]
  ForeignSample(LatticeCoord),

  #[error("cached sample at {0} has a non-finite value")]
  NonFinite(LatticeCoord),
}

/// Edit could not be queued. The rejected edit is handed back.
#[derive(Error, Debug)]
pub enum SubmitError {
  #[error("edit queue is full")]
  QueueFull(Edit),

  #[error("edit queue receiver was dropped")]
  Disconnected(Edit),
}

/// Errors surfaced by [`Terrain`](crate::terrain::Terrain) operations.
#[derive(Error, Debug)]
pub enum TerrainError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("no chunk owns lattice point {0}")]
  ChunkNotFound(LatticeCoord),

  #[error("lattice point {coord} is outside a lattice of resolution {resolution}")]
  OutOfBounds {
    coord: LatticeCoord,
    resolution: u32,
  },

  #[error(transparent)]
  Cache(#[from] CacheError),
}
