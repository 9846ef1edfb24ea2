use super::*;

fn all_coords(res: u32) -> impl Iterator<Item = LatticeCoord> {
  (0..res).flat_map(move |x| (0..res).flat_map(move |y| (0..res).map(move |z| LatticeCoord::new(x, y, z))))
}

#[test]
fn test_sixteen_by_four_layout() {
  let layout = ChunkLayout::compute(16, 4).unwrap();
  assert_eq!(layout.len(), 32);

  let first = layout.bounds(ChunkId(0)).unwrap();
  assert_eq!(first.x, Span::new(0, 4));
  assert_eq!(first.y, Span::new(0, 8));
  assert_eq!(first.z, Span::new(0, 4));

  let last = layout.bounds(ChunkId(31)).unwrap();
  assert_eq!(last.x, Span::new(12, 15));
  assert_eq!(last.y, Span::new(8, 15));
  assert_eq!(last.z, Span::new(12, 15));
}

#[test]
fn test_layout_order_is_x_y_z() {
  let layout = ChunkLayout::compute(16, 4).unwrap();

  // z is innermost
  assert_eq!(layout.bounds(ChunkId(1)).unwrap().z.begin, 4);
  // then y
  assert_eq!(layout.bounds(ChunkId(4)).unwrap().y.begin, 8);
  assert_eq!(layout.bounds(ChunkId(4)).unwrap().z.begin, 0);
  // x outermost
  assert_eq!(layout.bounds(ChunkId(8)).unwrap().x.begin, 4);
  assert_eq!(layout.bounds(ChunkId(8)).unwrap().y.begin, 0);
}

#[test]
fn test_chunks_tile_every_cube_once() {
  let layout = ChunkLayout::compute(16, 4).unwrap();

  for coord in all_coords(16) {
    let owners = layout.iter().filter(|(_, b)| b.contains(coord)).count();
    let on_max_face = coord.x == 15 || coord.y == 15 || coord.z == 15;
    let expected = if on_max_face { 0 } else { 1 };
    assert_eq!(owners, expected, "Coord {} owned {} times", coord, owners);
  }

  let cubes: u32 = layout.all_bounds().iter().map(|b| b.cube_count()).sum();
  assert_eq!(cubes, 15 * 15 * 15);
}

#[test]
fn test_every_chunk_holds_a_cube() {
  for (res, n) in [(4, 2), (8, 4), (16, 8), (12, 3)] {
    let layout = ChunkLayout::compute(res, n).unwrap();
    for (id, b) in layout.iter() {
      assert!(b.cube_count() > 0, "res {} n {} chunk {} is empty", res, n, id);
    }
  }
}

#[test]
fn test_layout_errors() {
  assert!(matches!(
    ChunkLayout::compute(0, 4),
    Err(ConfigError::ZeroResolution)
  ));
  assert!(matches!(
    ChunkLayout::compute(16, 0),
    Err(ConfigError::ZeroChunkCount)
  ));
  assert!(matches!(
    ChunkLayout::compute(18, 4),
    Err(ConfigError::UnevenChunks {
      resolution: 18,
      chunk_count: 4
    })
  ));
  assert!(matches!(
    ChunkLayout::compute(9, 3),
    Err(ConfigError::OddResolution(9))
  ));
  assert!(matches!(
    ChunkLayout::compute(8, 8),
    Err(ConfigError::ChunkTooThin { step: 1, .. })
  ));
  assert!(matches!(
    ChunkLayout::compute(2, 1),
    Err(ConfigError::ChunkTooThin { step: 1, .. })
  ));
}

#[test]
fn test_direct_lookup_matches_linear_scan() {
  for (res, n) in [(16, 4), (8, 2), (12, 3), (8, 1)] {
    let layout = ChunkLayout::compute(res, n).unwrap();
    for coord in all_coords(res) {
      assert_eq!(
        layout.locate_chunk(coord),
        layout.locate_chunk_direct(coord),
        "res {} n {} coord {}",
        res,
        n,
        coord
      );
    }
  }
}

#[test]
fn test_locate_chunk() {
  let layout = ChunkLayout::compute(16, 4).unwrap();

  assert_eq!(layout.locate_chunk(LatticeCoord::new(0, 0, 0)), Some(ChunkId(0)));
  assert_eq!(layout.locate_chunk(LatticeCoord::new(4, 0, 0)), Some(ChunkId(8)));
  assert_eq!(layout.locate_chunk(LatticeCoord::new(0, 8, 0)), Some(ChunkId(4)));
  assert_eq!(layout.locate_chunk(LatticeCoord::new(14, 14, 14)), Some(ChunkId(31)));

  // Maximal face and out-of-lattice points are unowned
  assert_eq!(layout.locate_chunk(LatticeCoord::new(15, 3, 3)), None);
  assert_eq!(layout.locate_chunk_direct(LatticeCoord::new(3, 15, 3)), None);
  assert_eq!(layout.locate_chunk_direct(LatticeCoord::new(40, 0, 0)), None);
}

#[test]
fn test_chunks_touching_interior() {
  let layout = ChunkLayout::compute(16, 4).unwrap();
  let touching = layout.chunks_touching(LatticeCoord::new(5, 5, 5));
  assert_eq!(touching.as_slice(), &[ChunkId(4 * 2 + 1)][..]);
}

#[test]
fn test_chunks_touching_corner_of_eight() {
  let layout = ChunkLayout::compute(16, 4).unwrap();
  let coord = LatticeCoord::new(4, 8, 4);
  let touching = layout.chunks_touching(coord);

  assert_eq!(touching.len(), 8);
  assert!(touching.contains(&layout.locate_chunk(coord).unwrap()));

  // Layout order is preserved
  let mut sorted = touching.clone();
  sorted.sort();
  assert_eq!(touching, sorted);
}

#[test]
fn test_chunks_touching_lattice_extremes() {
  let layout = ChunkLayout::compute(16, 4).unwrap();
  assert_eq!(
    layout.chunks_touching(LatticeCoord::new(0, 0, 0)).as_slice(),
    &[ChunkId(0)][..]
  );
  assert_eq!(
    layout.chunks_touching(LatticeCoord::new(15, 15, 15)).as_slice(),
    &[ChunkId(31)][..]
  );
}

#[test]
fn test_sample_coords_cover_cube_corners() {
  let bounds = ChunkBounds::new(Span::new(0, 2), Span::new(0, 1), Span::new(3, 4));
  let coords: Vec<_> = bounds.sample_coords().collect();

  assert_eq!(coords.len(), 3 * 2 * 2);
  assert_eq!(coords[0], LatticeCoord::new(0, 0, 3));
  assert_eq!(*coords.last().unwrap(), LatticeCoord::new(2, 1, 4));
}
