//! Marching Cubes surface extraction.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  grid: VoxelGrid         - res³ scalar samples                  │
//! │  bounds: ChunkBounds     - half-open cube origin ranges         │
//! │  iso_level: f32          - surface threshold                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 1: Classification                      │
//! │  For each cube origin in bounds (x outer, z inner):             │
//! │    Load 8 corner samples via CORNER_OFFSETS                     │
//! │    Bit i set iff corner i > iso_level                           │
//! │    Early-out if homogeneous (config 0 or 255)                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Edge Crossings                      │
//! │    For every edge in EDGE_TABLE[config]:                        │
//! │      Interpolate low corner -> high corner (or midpoint)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Triangulation                       │
//! │    Emit one Triangle per edge triple in TRIANGLE_TABLE[config]  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Triangles are not welded. Shared lattice edges still produce identical
//! positions because every edge is interpolated from its lower corner.

mod classify;
mod extract;
mod interpolate;

pub use classify::{classify, CubeConfiguration};
pub use extract::{extract, extract_chunks, ExtractStats, Extraction};
pub use interpolate::{interpolate, Interpolated, InterpolationMode};

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
