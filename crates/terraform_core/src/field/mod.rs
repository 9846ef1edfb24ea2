//! Scalar fields sampled onto the lattice.
//!
//! A field is a pure `LatticeCoord -> f32` function. It is evaluated once per
//! lattice point when the grid is populated, possibly from many threads.

mod perlin;

pub use perlin::perlin_2d;

use glam::Vec3;

use crate::config::{NoiseBlend, TerrainConfig};
use crate::types::LatticeCoord;

/// Density source for lattice population.
pub trait ScalarField: Send + Sync {
  fn evaluate(&self, coord: LatticeCoord) -> f32;
}

impl<F> ScalarField for F
where
  F: Fn(LatticeCoord) -> f32 + Send + Sync,
{
  #[inline]
  fn evaluate(&self, coord: LatticeCoord) -> f32 {
    self(coord)
  }
}

/// Same value everywhere.
#[derive(Clone, Copy, Debug)]
pub struct ConstantField(pub f32);

impl ScalarField for ConstantField {
  #[inline]
  fn evaluate(&self, _coord: LatticeCoord) -> f32 {
    self.0
  }
}

/// Distance to the lattice centre, perturbed by averaged 2D Perlin noise.
///
/// The centre is `resolution / 2` (integer division) on every axis, so an
/// even lattice has its centre exactly on a sample.
#[derive(Clone, Debug)]
pub struct SphereField {
  pub center: Vec3,
  pub noise_scale: f32,
  pub height_scale: f32,
  pub blend: NoiseBlend,
}

impl SphereField {
  pub fn new(resolution: u32) -> Self {
    let c = (resolution / 2) as f32;
    Self {
      center: Vec3::splat(c),
      noise_scale: 0.0,
      height_scale: 0.0,
      blend: NoiseBlend::Add,
    }
  }

  pub fn from_config(config: &TerrainConfig) -> Self {
    Self::new(config.resolution)
      .with_noise(config.noise_scale, config.height_scale)
      .with_blend(config.noise_blend)
  }

  pub fn with_noise(mut self, noise_scale: f32, height_scale: f32) -> Self {
    self.noise_scale = noise_scale;
    self.height_scale = height_scale;
    self
  }

  pub fn with_blend(mut self, blend: NoiseBlend) -> Self {
    self.blend = blend;
    self
  }

  /// Mean of the six axis-pair projections, scaled by `height_scale`.
  pub fn noise(&self, coord: LatticeCoord) -> f32 {
    if self.height_scale == 0.0 {
      return 0.0;
    }
    let p = coord.as_vec3() * self.noise_scale;
    let sum = perlin_2d(p.x, p.y)
      + perlin_2d(p.x, p.z)
      + perlin_2d(p.y, p.x)
      + perlin_2d(p.y, p.z)
      + perlin_2d(p.z, p.x)
      + perlin_2d(p.z, p.y);
    sum / 6.0 * self.height_scale
  }
}

impl ScalarField for SphereField {
  fn evaluate(&self, coord: LatticeCoord) -> f32 {
    let distance = coord.as_vec3().distance(self.center);
    let noise = self.noise(coord);
    match self.blend {
      NoiseBlend::Add => distance + noise,
      NoiseBlend::Subtract => distance - noise,
      NoiseBlend::ClampedAdd => distance + (noise - 0.5 * self.height_scale).max(0.0),
    }
  }
}
