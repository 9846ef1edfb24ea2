//! Engine-agnostic metrics collection for terrain statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use terraform_core::metrics::{TerrainMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Read after meshing:
//! let m = terrain.metrics();
//! println!("avg extract {:.1}us", m.avg_extract_timing_us());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::marching::ExtractStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity history of recent samples, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }
}

impl RollingWindow<u64> {
  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = *self.buffer.iter().min()?;
    let max = *self.buffer.iter().max()?;
    Some((min, max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Terrain statistics, updated on every extraction and edit.
#[derive(Debug, Clone, Default)]
pub struct TerrainMetrics {
  // Timing
  /// Per-chunk extraction times in microseconds.
  pub extract_timings: RollingWindow<u64>,
  /// Whole remesh passes (initial build or one edit) in microseconds.
  pub remesh_timings: RollingWindow<u64>,
  pub last_extract_us: u64,
  pub last_remesh_us: u64,

  // Geometry
  /// Triangles currently held across all chunk meshes.
  pub total_triangles: u64,
  /// Cumulative chunk extractions this session.
  pub chunks_meshed: u64,
  /// Cumulative degenerate edge interpolations.
  pub degenerate_edges: u64,

  // Edits
  pub edits_applied: u64,
  pub edits_failed: u64,
}

impl TerrainMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset everything except cumulative counters.
  pub fn reset(&mut self) {
    self.extract_timings.clear();
    self.remesh_timings.clear();
    self.last_extract_us = 0;
    self.last_remesh_us = 0;
  }

  /// Record one chunk extraction.
  pub fn record_extraction(&mut self, timing_us: u64, stats: &ExtractStats) {
    if !is_enabled() {
      return;
    }
    self.extract_timings.push(timing_us);
    self.last_extract_us = timing_us;
    self.chunks_meshed += 1;
    self.degenerate_edges += stats.degenerate_edges as u64;
  }

  /// Record a full remesh pass and the resulting triangle total.
  pub fn record_remesh(&mut self, timing_us: u64, total_triangles: u64) {
    if !is_enabled() {
      return;
    }
    self.remesh_timings.push(timing_us);
    self.last_remesh_us = timing_us;
    self.total_triangles = total_triangles;
  }

  pub fn record_edit(&mut self, applied: bool) {
    if !is_enabled() {
      return;
    }
    if applied {
      self.edits_applied += 1;
    } else {
      self.edits_failed += 1;
    }
  }

  pub fn avg_extract_timing_us(&self) -> f64 {
    self.extract_timings.average()
  }

  pub fn avg_remesh_timing_us(&self) -> f64 {
    self.remesh_timings.average()
  }
}
