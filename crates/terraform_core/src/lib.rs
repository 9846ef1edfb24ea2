//! terraform_core - Engine independent planet terraforming core
//!
//! This crate samples a sphere + Perlin noise density field onto a cubic
//! lattice, meshes it per chunk with Marching Cubes, and re-meshes only the
//! affected chunk when a single lattice sample is edited.
//!
//! # Features
//!
//! - **Marching Cubes**: Canonical 256-entry triangle table with linear or
//!   midpoint edge placement
//! - **Static Chunking**: `n × 2 × n` chunk layout with O(1) ownership lookup
//! - **Incremental Edits**: Single-sample or cross-brush edits, owner-only or
//!   seam-aware re-meshing, bounded cross-thread edit queue
//! - **Parallel Build**: Lattice population and initial meshing run on rayon
//!
//! # Example
//!
//! ```ignore
//! use terraform_core::{Edit, LatticeCoord, Terrain, TerrainConfig};
//!
//! let config = TerrainConfig::new().with_resolution(32).with_iso_level(12.0);
//! let mut terrain = Terrain::from_config(config)?;
//!
//! let outcome = terrain.apply_edit(Edit::new(LatticeCoord::new(16, 28, 16), 0.0))?;
//! let mesh = terrain.render_mesh(outcome.owner).unwrap();
//!
//! println!("Chunk {} now has {} triangles", outcome.owner, mesh.triangle_count());
//! ```

pub mod constants;
pub mod tables;
pub mod types;

pub use constants::{coord_to_index, index_to_coord, sample_count, CORNER_OFFSETS};
pub use tables::{EDGE_CORNERS, EDGE_TABLE, TRIANGLE_TABLE};
pub use types::{LatticeCoord, MinMaxAABB, RenderMesh, ScalarSample, Triangle};

pub mod config;
pub use config::{ChunkDensity, EditBrush, NoiseBlend, ResolutionPreset, SeamPolicy, TerrainConfig};

pub mod error;
pub use error::{CacheError, ConfigError, SubmitError, TerrainError};

// Density fields
pub mod field;
pub use field::{ConstantField, ScalarField, SphereField};

pub mod grid;
pub use grid::VoxelGrid;

// Marching Cubes extraction
pub mod marching;
pub use marching::{classify, extract, interpolate, CubeConfiguration, InterpolationMode};

pub mod chunks;
pub use chunks::{ChunkBounds, ChunkId, ChunkLayout, Span};

pub mod terrain;
pub use terrain::{ChunkMesh, Edit, EditOutcome, Terrain};

// Cross-thread edit submission
pub mod edit_queue;
pub use edit_queue::{EditReceiver, EditSender};

pub mod presentation;
pub use presentation::{MeshSink, NullSink};

pub mod cache;
pub use cache::ChunkCache;

pub mod metrics;

#[cfg(test)]
pub(crate) mod test_utils;
