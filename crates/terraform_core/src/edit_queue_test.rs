use super::*;
use crate::types::LatticeCoord;

fn edit(x: u32) -> Edit {
  Edit::new(LatticeCoord::new(x, 1, 1), x as f32)
}

#[test]
fn test_fifo_order() {
  let (tx, rx) = channel(8);
  for x in 0..5 {
    tx.submit(edit(x)).unwrap();
  }

  let drained: Vec<u32> = rx.pending().map(|e| e.coord.x).collect();
  assert_eq!(drained, vec![0, 1, 2, 3, 4]);
  assert!(rx.is_empty());
}

#[test]
fn test_try_submit_reports_full_queue() {
  let (tx, rx) = channel(2);
  tx.try_submit(edit(0)).unwrap();
  tx.try_submit(edit(1)).unwrap();

  match tx.try_submit(edit(2)) {
    Err(SubmitError::QueueFull(rejected)) => assert_eq!(rejected, edit(2)),
    other => panic!("Expected QueueFull, got {:?}", other),
  }
  assert_eq!(rx.len(), 2);
  assert_eq!(rx.capacity(), Some(2));
}

#[test]
fn test_disconnected_receiver() {
  let (tx, rx) = channel(2);
  drop(rx);
  assert!(matches!(tx.try_submit(edit(0)), Err(SubmitError::Disconnected(_))));
  assert!(matches!(tx.submit(edit(0)), Err(SubmitError::Disconnected(_))));
}

#[test]
fn test_cross_thread_submission() {
  let (tx, rx) = channel(64);

  let handles: Vec<_> = (0..4)
    .map(|t| {
      let tx = tx.clone();
      std::thread::spawn(move || {
        for i in 0..8 {
          tx.submit(edit(t * 8 + i)).unwrap();
        }
      })
    })
    .collect();
  for h in handles {
    h.join().unwrap();
  }

  let mut xs: Vec<u32> = rx.pending().map(|e| e.coord.x).collect();
  xs.sort_unstable();
  assert_eq!(xs, (0..32).collect::<Vec<_>>());
  assert!(rx.try_next().is_none());
}
