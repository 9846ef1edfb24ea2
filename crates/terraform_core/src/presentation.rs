//! MeshSink - callback interface for renderers.
//!
//! Lets the terrain hand finished chunk meshes to engine-specific code
//! without depending on any engine.

use crate::chunks::ChunkId;
use crate::types::{LatticeCoord, RenderMesh};

/// Receiver of chunk meshes.
///
/// Must be thread-safe; the terrain may be driven from any thread.
///
/// # Example
///
/// ```ignore
/// struct UploadSink {
///     uploads: Mutex<Vec<(ChunkId, RenderMesh)>>,
/// }
///
/// impl MeshSink for UploadSink {
///     fn on_chunk_meshed(&self, chunk: ChunkId, mesh: &RenderMesh) {
///         self.uploads.lock().unwrap().push((chunk, mesh.clone()));
///     }
/// }
/// ```
pub trait MeshSink: Send + Sync {
  /// Called with the new mesh of a chunk after (re-)extraction.
  fn on_chunk_meshed(&self, chunk: ChunkId, mesh: &RenderMesh);

  /// Called when an edit at `coord` was rejected and nothing changed.
  fn on_edit_rejected(&self, _coord: LatticeCoord) {}
}

/// No-op implementation for testing and headless operation.
pub struct NullSink;

impl MeshSink for NullSink {
  fn on_chunk_meshed(&self, _chunk: ChunkId, _mesh: &RenderMesh) {
    // No-op
  }
}
