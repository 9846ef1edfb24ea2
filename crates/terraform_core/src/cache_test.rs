use std::fs;

use super::*;
use crate::test_utils::sphere_grid;
use crate::types::LatticeCoord;

fn temp_path(name: &str) -> PathBuf {
  let mut path = std::env::temp_dir();
  path.push(format!("terraform_cache_{}_{}", std::process::id(), name));
  path
}

fn fixture() -> (VoxelGrid, ChunkLayout) {
  (sphere_grid(8), ChunkLayout::compute(8, 2).unwrap())
}

#[test]
fn test_capture_covers_cube_corners() {
  let (grid, layout) = fixture();
  let cache = ChunkCache::capture(&grid, &layout, ChunkId(0)).unwrap();

  // Chunk 0 owns origins [0,4)³ and reads samples [0,4]³
  assert_eq!(cache.voxel_points.len(), 5 * 5 * 5);
  assert_eq!(cache.voxel_points[0].coord, LatticeCoord::new(0, 0, 0));
  for sample in &cache.voxel_points {
    assert_eq!(Some(sample.value), grid.get(sample.coord));
  }
  cache.validate(&layout, ChunkId(0)).unwrap();
}

#[test]
fn test_capture_unknown_chunk() {
  let (grid, layout) = fixture();
  assert!(ChunkCache::capture(&grid, &layout, ChunkId(99)).is_none());
}

#[test]
fn test_file_roundtrip() {
  let (grid, layout) = fixture();
  let cache = ChunkCache::capture(&grid, &layout, ChunkId(7)).unwrap();
  let path = temp_path(&ChunkCache::file_name(ChunkId(7)));

  cache.save(&path).unwrap();
  let loaded = ChunkCache::load(&path).unwrap();
  fs::remove_file(&path).ok();

  assert_eq!(loaded, cache);
  loaded.validate(&layout, ChunkId(7)).unwrap();
}

#[test]
fn test_missing_file_is_io_error() {
  let err = ChunkCache::load(temp_path("does_not_exist.json")).unwrap_err();
  assert!(matches!(err, CacheError::Io(_)));
}

#[test]
fn test_garbage_is_json_error() {
  let err = ChunkCache::from_json("{ not json").unwrap_err();
  assert!(matches!(err, CacheError::Json(_)));
}

#[test]
fn test_validate_rejects_wrong_chunk() {
  let (grid, layout) = fixture();
  let cache = ChunkCache::capture(&grid, &layout, ChunkId(1)).unwrap();
  assert!(matches!(
    cache.validate(&layout, ChunkId(2)),
    Err(CacheError::ChunkMismatch {
      expected: ChunkId(2),
      found: ChunkId(1)
    })
  ));
}

#[test]
fn test_validate_rejects_truncated_and_tampered() {
  let (grid, layout) = fixture();
  let cache = ChunkCache::capture(&grid, &layout, ChunkId(3)).unwrap();

  let mut truncated = cache.clone();
  truncated.voxel_points.pop();
  assert!(matches!(
    truncated.validate(&layout, ChunkId(3)),
    Err(CacheError::SampleCount { .. })
  ));

  let mut moved = cache.clone();
  moved.voxel_points[5].coord = LatticeCoord::new(7, 7, 7);
  assert!(matches!(
    moved.validate(&layout, ChunkId(3)),
    Err(CacheError::ForeignSample(_))
  ));

  let mut nan = cache;
  nan.voxel_points[0].value = f32::NAN;
  assert!(matches!(
    nan.validate(&layout, ChunkId(3)),
    Err(CacheError::NonFinite(_))
  ));
}

#[test]
fn test_json_field_names() {
  let (grid, layout) = fixture();
  let json = ChunkCache::capture(&grid, &layout, ChunkId(0))
    .unwrap()
    .to_json()
    .unwrap();
  assert!(json.starts_with(r#"{"chunk_id":0,"voxel_points":[{"coord":{"x":0,"y":0,"z":0}"#));
}
