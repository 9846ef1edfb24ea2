//! Terrain - owns the lattice, the chunk layout and one mesh per chunk.
//!
//! # Edit Flow
//!
//! ```text
//! Edit { coord, value }
//!   │
//!   ├─ coord outside lattice ──────────► Err(OutOfBounds)      (no change)
//!   ├─ no chunk owns coord ────────────► Err(ChunkNotFound)    (no change)
//!   │
//!   ├─ write brush samples into grid
//!   ├─ extract owner (+ seam neighbours)
//!   └─ swap in new meshes ─────────────► Ok(EditOutcome)
//! ```
//!
//! All mutation goes through `&mut self`, so extraction never observes a
//! half-applied edit.

use rayon::prelude::*;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, info, info_span, warn};
use web_time::Instant;

use crate::cache::ChunkCache;
use crate::chunks::{ChunkId, ChunkLayout};
use crate::config::{EditBrush, SeamPolicy, TerrainConfig};
use crate::edit_queue::EditReceiver;
use crate::error::{ConfigError, TerrainError};
use crate::field::{ScalarField, SphereField};
use crate::grid::VoxelGrid;
use crate::marching::{extract, ExtractStats, Extraction};
use crate::metrics::TerrainMetrics;
use crate::presentation::MeshSink;
use crate::types::{LatticeCoord, RenderMesh, Triangle};

/// Offsets written by [`EditBrush::Cross`], centre first.
const CROSS_OFFSETS: [[i32; 3]; 15] = [
  [0, 0, 0],
  // Horizontal ring at y
  [1, 0, 0],
  [-1, 0, 0],
  [0, 0, 1],
  [0, 0, -1],
  // Same ring at y + 1
  [1, 1, 0],
  [-1, 1, 0],
  [0, 1, 1],
  [0, 1, -1],
  // Same ring at y - 1
  [1, -1, 0],
  [-1, -1, 0],
  [0, -1, 1],
  [0, -1, -1],
  // Vertical
  [0, 1, 0],
  [0, -1, 0],
];

/// Set the sample at `coord` to `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edit {
  pub coord: LatticeCoord,
  pub value: f32,
}

impl Edit {
  pub const fn new(coord: LatticeCoord, value: f32) -> Self {
    Self { coord, value }
  }
}

/// Result of a successful edit.
#[derive(Clone, Debug, PartialEq)]
pub struct EditOutcome {
  /// Chunk owning the edited coordinate.
  pub owner: ChunkId,
  /// Chunks whose meshes were replaced, in layout order.
  pub remeshed: SmallVec<[ChunkId; 8]>,
  /// Lattice samples written by the brush.
  pub samples_changed: usize,
}

/// Extracted triangles of one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
  pub triangles: Vec<Triangle>,
  pub stats: ExtractStats,
  /// Incremented every time the mesh is replaced.
  pub revision: u64,
}

impl ChunkMesh {
  pub fn render_mesh(&self) -> RenderMesh {
    RenderMesh::from_triangles(&self.triangles)
  }

  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }
}

pub struct Terrain {
  config: TerrainConfig,
  grid: VoxelGrid,
  layout: ChunkLayout,
  meshes: Vec<ChunkMesh>,
  metrics: TerrainMetrics,
}

impl Terrain {
  /// Build the planet from the configured sphere + noise field.
  pub fn from_config(config: TerrainConfig) -> Result<Self, TerrainError> {
    let field = SphereField::from_config(&config);
    Self::with_field(config, &field)
  }

  /// Validate, populate the lattice from `field` and mesh every chunk.
  pub fn with_field<F: ScalarField + ?Sized>(
    config: TerrainConfig,
    field: &F,
  ) -> Result<Self, TerrainError> {
    config.validate()?;
    let grid = VoxelGrid::populate(config.resolution, field);
    Self::from_grid(config, grid)
  }

  /// Mesh an already populated lattice.
  pub fn from_grid(config: TerrainConfig, grid: VoxelGrid) -> Result<Self, TerrainError> {
    config.validate()?;
    if grid.resolution() != config.resolution {
      return Err(
        ConfigError::GridMismatch {
          expected: config.resolution,
          found: grid.resolution(),
        }
        .into(),
      );
    }

    let layout = ChunkLayout::compute(config.resolution, config.chunk_count_per_axis)?;
    let mut terrain = Self {
      meshes: vec![ChunkMesh::default(); layout.len()],
      config,
      grid,
      layout,
      metrics: TerrainMetrics::new(),
    };
    terrain.remesh_all();
    Ok(terrain)
  }

  pub fn config(&self) -> &TerrainConfig {
    &self.config
  }

  pub fn grid(&self) -> &VoxelGrid {
    &self.grid
  }

  pub fn layout(&self) -> &ChunkLayout {
    &self.layout
  }

  pub fn metrics(&self) -> &TerrainMetrics {
    &self.metrics
  }

  pub fn chunk_mesh(&self, id: ChunkId) -> Option<&ChunkMesh> {
    self.meshes.get(id.index())
  }

  /// Render buffers for one chunk (p3, p2, p1 winding).
  pub fn render_mesh(&self, id: ChunkId) -> Option<RenderMesh> {
    self.chunk_mesh(id).map(ChunkMesh::render_mesh)
  }

  /// All chunk meshes in layout order.
  pub fn chunk_meshes(&self) -> impl Iterator<Item = (ChunkId, &ChunkMesh)> {
    self.layout.ids().zip(self.meshes.iter())
  }

  pub fn total_triangles(&self) -> usize {
    self.meshes.iter().map(|m| m.triangles.len()).sum()
  }

  /// Re-extract every chunk in parallel.
  pub fn remesh_all(&mut self) {
    let _span = info_span!("remesh_all", chunks = self.layout.len()).entered();
    let ids: Vec<ChunkId> = self.layout.ids().collect();
    let start = Instant::now();
    self.remesh(&ids);
    let elapsed_us = start.elapsed().as_micros() as u64;

    info!(
      chunks = ids.len(),
      triangles = self.total_triangles(),
      elapsed_us,
      "Initial meshing complete"
    );
  }

  /// Apply one edit and re-extract the affected chunks.
  ///
  /// On error nothing is mutated.
  pub fn apply_edit(&mut self, edit: Edit) -> Result<EditOutcome, TerrainError> {
    let result = self.try_apply_edit(edit);
    self.metrics.record_edit(result.is_ok());
    result
  }

  fn try_apply_edit(&mut self, edit: Edit) -> Result<EditOutcome, TerrainError> {
    let resolution = self.grid.resolution();
    let coord = edit.coord;

    if !coord.in_lattice(resolution) {
      warn!(%coord, resolution, "Edit outside lattice ignored");
      return Err(TerrainError::OutOfBounds { coord, resolution });
    }

    // Resolve the owner before touching the grid
    let Some(owner) = self.layout.locate_chunk(coord) else {
      warn!(%coord, "No chunk owns edited coordinate, edit ignored");
      return Err(TerrainError::ChunkNotFound(coord));
    };

    let _span = info_span!("apply_edit", %coord, owner = owner.0).entered();

    let touched = self.brush_coords(coord);
    for &c in &touched {
      self.grid.set(c, edit.value);
    }

    let remeshed = match self.config.seam_policy {
      SeamPolicy::OwnerOnly => smallvec![owner],
      SeamPolicy::IncludeNeighbors => self.chunks_reading(&touched),
    };

    let start = Instant::now();
    self.remesh(&remeshed);
    debug!(
      chunks = remeshed.len(),
      samples = touched.len(),
      elapsed_us = start.elapsed().as_micros() as u64,
      "Edit applied"
    );

    Ok(EditOutcome {
      owner,
      remeshed,
      samples_changed: touched.len(),
    })
  }

  /// Apply an edit and forward the replaced meshes (or the rejection) to
  /// `sink`.
  pub fn apply_edit_to_sink<S: MeshSink + ?Sized>(
    &mut self,
    edit: Edit,
    sink: &S,
  ) -> Result<EditOutcome, TerrainError> {
    match self.apply_edit(edit) {
      Ok(outcome) => {
        self.publish(outcome.remeshed.iter().copied(), sink);
        Ok(outcome)
      }
      Err(err) => {
        sink.on_edit_rejected(edit.coord);
        Err(err)
      }
    }
  }

  /// Apply every queued edit in FIFO order, returning each outcome.
  pub fn drain_edits(&mut self, receiver: &EditReceiver) -> Vec<Result<EditOutcome, TerrainError>> {
    receiver.pending().map(|edit| self.apply_edit(edit)).collect()
  }

  /// Send the current meshes of `ids` to `sink`.
  pub fn publish<S: MeshSink + ?Sized>(&self, ids: impl IntoIterator<Item = ChunkId>, sink: &S) {
    for id in ids {
      if let Some(mesh) = self.chunk_mesh(id) {
        sink.on_chunk_meshed(id, &mesh.render_mesh());
      }
    }
  }

  /// Send every chunk mesh to `sink`.
  pub fn publish_all<S: MeshSink + ?Sized>(&self, sink: &S) {
    self.publish(self.layout.ids(), sink);
  }

  /// Snapshot the samples of one chunk.
  pub fn capture_chunk(&self, id: ChunkId) -> Option<ChunkCache> {
    ChunkCache::capture(&self.grid, &self.layout, id)
  }

  /// Overwrite the samples of chunk `expected` from a validated cache and
  /// remesh every chunk reading them.
  ///
  /// Cached samples include the chunk's far faces, which neighbours also
  /// read, so restores ignore [`SeamPolicy`]. An invalid cache (including
  /// one recorded for another chunk) leaves the terrain untouched.
  pub fn restore_chunk(
    &mut self,
    expected: ChunkId,
    cache: &ChunkCache,
  ) -> Result<SmallVec<[ChunkId; 8]>, TerrainError> {
    if let Err(err) = cache.validate(&self.layout, expected) {
      warn!(chunk = expected.0, %err, "Rejected chunk cache");
      return Err(err.into());
    }

    let coords: Vec<LatticeCoord> = cache.voxel_points.iter().map(|s| s.coord).collect();
    for sample in &cache.voxel_points {
      self.grid.set(sample.coord, sample.value);
    }

    let remeshed = self.chunks_reading(&coords);
    self.remesh(&remeshed);
    Ok(remeshed)
  }

  fn brush_coords(&self, center: LatticeCoord) -> SmallVec<[LatticeCoord; 15]> {
    let resolution = self.grid.resolution();
    match self.config.brush {
      EditBrush::Single => smallvec![center],
      EditBrush::Cross => CROSS_OFFSETS
        .iter()
        .filter_map(|&[dx, dy, dz]| center.offset(dx, dy, dz, resolution))
        .collect(),
    }
  }

  /// Every chunk with a cube reading any of `coords`, sorted and unique.
  fn chunks_reading(&self, coords: &[LatticeCoord]) -> SmallVec<[ChunkId; 8]> {
    let mut ids: SmallVec<[ChunkId; 8]> = coords
      .iter()
      .flat_map(|&c| self.layout.chunks_touching(c))
      .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
  }

  /// Extract `ids` against the current grid, then swap all meshes in.
  fn remesh(&mut self, ids: &[ChunkId]) {
    let start = Instant::now();
    let iso_level = self.config.iso_level;
    let mode = self.config.interpolation_mode();
    let grid = &self.grid;
    let layout = &self.layout;

    let results: Vec<(ChunkId, Extraction, u64)> = ids
      .par_iter()
      .filter_map(|&id| {
        let bounds = layout.bounds(id)?;
        let t = Instant::now();
        let extraction = extract(grid, bounds, iso_level, mode);
        Some((id, extraction, t.elapsed().as_micros() as u64))
      })
      .collect();

    for (id, extraction, timing_us) in results {
      debug!(
        chunk = id.0,
        triangles = extraction.triangles.len(),
        active_cubes = extraction.stats.active_cubes,
        degenerate_edges = extraction.stats.degenerate_edges,
        timing_us,
        "Chunk extracted"
      );
      self.metrics.record_extraction(timing_us, &extraction.stats);

      let mesh = &mut self.meshes[id.index()];
      mesh.triangles = extraction.triangles;
      mesh.stats = extraction.stats;
      mesh.revision += 1;
    }

    let total = self.total_triangles() as u64;
    self
      .metrics
      .record_remesh(start.elapsed().as_micros() as u64, total);
  }
}

#[cfg(test)]
#[path = "terrain_test.rs"]
mod terrain_test;
