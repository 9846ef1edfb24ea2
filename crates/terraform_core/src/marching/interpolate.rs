//! Iso-crossing placement along a cube edge.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMode {
  /// Lerp by `(iso - v_start) / (v_end - v_start)`, clamped to `[0, 1]`.
  #[default]
  Linear,
  /// Edge midpoint regardless of sample values.
  Midpoint,
}

/// Result of placing a vertex on an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolated {
  pub position: Vec3,
  /// Linear mode fell back to the midpoint (equal values or non-finite `t`).
  pub degenerate: bool,
}

/// Place the iso-surface crossing on the edge `start -> end`.
#[inline]
pub fn interpolate(
  start: Vec3,
  end: Vec3,
  value_start: f32,
  value_end: f32,
  iso_level: f32,
  mode: InterpolationMode,
) -> Interpolated {
  let midpoint = (start + end) * 0.5;
  match mode {
    InterpolationMode::Midpoint => Interpolated {
      position: midpoint,
      degenerate: false,
    },
    InterpolationMode::Linear => {
      let denom = value_end - value_start;
      let t = (iso_level - value_start) / denom;
      if denom == 0.0 || !t.is_finite() {
        return Interpolated {
          position: midpoint,
          degenerate: true,
        };
      }
      Interpolated {
        position: start.lerp(end, t.clamp(0.0, 1.0)),
        degenerate: false,
      }
    }
  }
}
