//! Owned lattice of scalar samples.
//!
//! The sample vector is allocated once at construction and never resized;
//! edits overwrite `.value` in place. Layout follows
//! [`coord_to_index`](crate::constants::coord_to_index).

use rayon::prelude::*;
use tracing::info_span;
use web_time::Instant;

use crate::constants::{coord_to_index, index_to_coord, sample_count, CORNER_OFFSETS, CUBE_CORNERS};
use crate::field::ScalarField;
use crate::types::{LatticeCoord, ScalarSample};

#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
  resolution: u32,
  samples: Vec<ScalarSample>,
}

impl VoxelGrid {
  /// Lattice filled with a single value.
  pub fn filled(resolution: u32, value: f32) -> Self {
    let samples = (0..sample_count(resolution))
      .map(|i| ScalarSample::new(index_to_coord(i, resolution).into(), value))
      .collect();
    Self {
      resolution,
      samples,
    }
  }

  /// Evaluate `field` at every lattice point in parallel.
  ///
  /// Each flattened slot has exactly one writer.
  pub fn populate<F: ScalarField + ?Sized>(resolution: u32, field: &F) -> Self {
    let _span = info_span!("populate", resolution).entered();
    let start = Instant::now();

    let mut samples = vec![ScalarSample::new(LatticeCoord::default(), 0.0); sample_count(resolution)];
    samples.par_iter_mut().enumerate().for_each(|(i, sample)| {
      let coord: LatticeCoord = index_to_coord(i, resolution).into();
      *sample = ScalarSample::new(coord, field.evaluate(coord));
    });

    tracing::info!(
      resolution,
      samples = samples.len(),
      elapsed_us = start.elapsed().as_micros() as u64,
      "Lattice populated"
    );

    Self {
      resolution,
      samples,
    }
  }

  #[inline]
  pub fn resolution(&self) -> u32 {
    self.resolution
  }

  #[inline]
  pub fn samples(&self) -> &[ScalarSample] {
    &self.samples
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.samples.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  #[inline]
  pub fn contains(&self, coord: LatticeCoord) -> bool {
    coord.in_lattice(self.resolution)
  }

  /// Value at `coord`, or `None` outside the lattice.
  #[inline]
  pub fn get(&self, coord: LatticeCoord) -> Option<f32> {
    self
      .contains(coord)
      .then(|| self.samples[coord_to_index(coord.x, coord.y, coord.z, self.resolution)].value)
  }

  /// Value at `(x, y, z)`. Panics outside the lattice.
  #[inline(always)]
  pub fn value(&self, x: u32, y: u32, z: u32) -> f32 {
    self.samples[coord_to_index(x, y, z, self.resolution)].value
  }

  /// Overwrite the value at `coord`, returning the previous value.
  ///
  /// `None` (and no change) outside the lattice.
  pub fn set(&mut self, coord: LatticeCoord, value: f32) -> Option<f32> {
    if !self.contains(coord) {
      return None;
    }
    let slot = &mut self.samples[coord_to_index(coord.x, coord.y, coord.z, self.resolution)];
    Some(std::mem::replace(&mut slot.value, value))
  }

  /// Values at the eight corners of the cube whose minimal corner is
  /// `(x, y, z)`, in corner order. Caller keeps `origin + 1` in range.
  #[inline]
  pub fn corner_values(&self, x: u32, y: u32, z: u32) -> [f32; CUBE_CORNERS] {
    let mut values = [0.0; CUBE_CORNERS];
    for (value, [dx, dy, dz]) in values.iter_mut().zip(CORNER_OFFSETS) {
      *value = self.value(x + dx, y + dy, z + dz);
    }
    values
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
