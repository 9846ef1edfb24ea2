//! Terrain configuration.
//!
//! Loaded from TOML (every field optional, falling back to [`Default`]) or
//! built in code with the `with_*` setters. [`TerrainConfig::validate`] runs
//! before any lattice is allocated.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::marching::InterpolationMode;

/// How the noise term combines with the sphere distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseBlend {
  /// `distance + noise`. Noise pushes the surface inwards.
  #[default]
  Add,
  /// `distance - noise`. Noise pushes the surface outwards.
  Subtract,
  /// `distance + max(noise - height_scale / 2, 0)`. Only the part of the
  /// noise above its midline is added, so the base distance never drops.
  ClampedAdd,
}

/// Shape of the lattice region written by one edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditBrush {
  /// The edited sample only.
  #[default]
  Single,
  /// The sample plus 14 neighbours (±X, ±Z at y-1, y, y+1, and ±Y).
  Cross,
}

/// Which chunks are re-extracted after an edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeamPolicy {
  /// Only the owning chunk. Neighbours sharing a face keep stale triangles.
  #[default]
  OwnerOnly,
  /// The owner plus every chunk whose cubes read an edited sample.
  IncludeNeighbors,
}

/// Total chunk count on one X/Z face, mapped to per-axis chunk counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkDensity {
  Four = 4,
  Eight = 8,
  Sixteen = 16,
  ThirtyTwo = 32,
}

impl ChunkDensity {
  /// Chunk count per X/Z axis.
  pub const fn per_axis(self) -> u32 {
    self as u32 / 4
  }
}

/// Common lattice sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionPreset {
  R16 = 16,
  R32 = 32,
  R64 = 64,
  R128 = 128,
  R256 = 256,
  R512 = 512,
}

impl ResolutionPreset {
  pub const ALL: [ResolutionPreset; 6] = [
    Self::R16,
    Self::R32,
    Self::R64,
    Self::R128,
    Self::R256,
    Self::R512,
  ];

  /// Samples per axis.
  pub const fn value(self) -> u32 {
    self as u32
  }

  pub fn from_value(value: u32) -> Option<Self> {
    Self::ALL.into_iter().find(|p| p.value() == value)
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
  /// Lattice samples per axis.
  pub resolution: u32,

  /// Surface threshold. Samples strictly above are "outside".
  pub iso_level: f32,

  /// Chunk slabs along X and Z. Y is always split in two.
  pub chunk_count_per_axis: u32,

  /// Multiplier applied to lattice coordinates before sampling noise.
  pub noise_scale: f32,

  /// Amplitude of the averaged noise term.
  pub height_scale: f32,

  /// Linear edge interpolation when true, edge midpoints otherwise.
  pub use_interpolation: bool,

  pub noise_blend: NoiseBlend,
  pub brush: EditBrush,
  pub seam_policy: SeamPolicy,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      resolution: 64,
      iso_level: 24.0,
      chunk_count_per_axis: 4,
      noise_scale: 0.1,
      height_scale: 4.0,
      use_interpolation: true,
      noise_blend: NoiseBlend::default(),
      brush: EditBrush::default(),
      seam_policy: SeamPolicy::default(),
    }
  }
}

impl TerrainConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Load and validate a configuration from a TOML file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// Parse and validate a configuration from TOML text.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    let config: TerrainConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Check scalar parameters and the chunk layout constraints.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.iso_level.is_finite() {
      return Err(ConfigError::InvalidIsoLevel(self.iso_level));
    }
    if !self.noise_scale.is_finite() || !self.height_scale.is_finite() {
      return Err(ConfigError::InvalidNoise {
        scale: self.noise_scale,
        height: self.height_scale,
      });
    }
    crate::chunks::validate_layout(self.resolution, self.chunk_count_per_axis)
  }

  /// Edge placement mode derived from `use_interpolation`.
  pub fn interpolation_mode(&self) -> InterpolationMode {
    if self.use_interpolation {
      InterpolationMode::Linear
    } else {
      InterpolationMode::Midpoint
    }
  }

  pub fn with_resolution(mut self, resolution: u32) -> Self {
    self.resolution = resolution;
    self
  }

  pub fn with_resolution_preset(mut self, preset: ResolutionPreset) -> Self {
    self.resolution = preset.value();
    self
  }

  pub fn with_iso_level(mut self, iso_level: f32) -> Self {
    self.iso_level = iso_level;
    self
  }

  pub fn with_chunk_count(mut self, chunk_count_per_axis: u32) -> Self {
    self.chunk_count_per_axis = chunk_count_per_axis;
    self
  }

  pub fn with_chunk_density(mut self, density: ChunkDensity) -> Self {
    self.chunk_count_per_axis = density.per_axis();
    self
  }

  pub fn with_noise(mut self, noise_scale: f32, height_scale: f32) -> Self {
    self.noise_scale = noise_scale;
    self.height_scale = height_scale;
    self
  }

  /// Pure sphere: zero noise amplitude.
  pub fn without_noise(mut self) -> Self {
    self.height_scale = 0.0;
    self
  }

  pub fn with_interpolation(mut self, use_interpolation: bool) -> Self {
    self.use_interpolation = use_interpolation;
    self
  }

  pub fn with_noise_blend(mut self, blend: NoiseBlend) -> Self {
    self.noise_blend = blend;
    self
  }

  pub fn with_brush(mut self, brush: EditBrush) -> Self {
    self.brush = brush;
    self
  }

  pub fn with_seam_policy(mut self, policy: SeamPolicy) -> Self {
    self.seam_policy = policy;
    self
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
