//! Bounded edit queue for submitting terraform edits from other threads.
//!
//! Producers hold an [`EditSender`]; the thread owning the
//! [`Terrain`](crate::terrain::Terrain) drains the [`EditReceiver`] with
//! [`Terrain::drain_edits`](crate::terrain::Terrain::drain_edits). Edits are
//! applied in submission order.

use crossbeam_channel::{self as channel, Receiver, Sender, TryRecvError, TrySendError};

use crate::error::SubmitError;
use crate::terrain::Edit;

/// Create a bounded queue holding at most `capacity` pending edits.
pub fn channel(capacity: usize) -> (EditSender, EditReceiver) {
  let (sender, receiver) = channel::bounded(capacity);
  (EditSender { inner: sender }, EditReceiver { inner: receiver })
}

#[derive(Clone, Debug)]
pub struct EditSender {
  inner: Sender<Edit>,
}

impl EditSender {
  /// Queue an edit, blocking while the queue is full.
  pub fn submit(&self, edit: Edit) -> Result<(), SubmitError> {
    self
      .inner
      .send(edit)
      .map_err(|e| SubmitError::Disconnected(e.into_inner()))
  }

  /// Queue an edit without blocking.
  pub fn try_submit(&self, edit: Edit) -> Result<(), SubmitError> {
    self.inner.try_send(edit).map_err(|e| match e {
      TrySendError::Full(edit) => SubmitError::QueueFull(edit),
      TrySendError::Disconnected(edit) => SubmitError::Disconnected(edit),
    })
  }
}

#[derive(Debug)]
pub struct EditReceiver {
  inner: Receiver<Edit>,
}

impl EditReceiver {
  /// Next pending edit (non-blocking).
  pub fn try_next(&self) -> Option<Edit> {
    match self.inner.try_recv() {
      Ok(edit) => Some(edit),
      Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
    }
  }

  /// Pending edits at the time of the call, oldest first.
  pub fn pending(&self) -> impl Iterator<Item = Edit> + '_ {
    self.inner.try_iter()
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  pub fn capacity(&self) -> Option<usize> {
    self.inner.capacity()
  }
}

#[cfg(test)]
#[path = "edit_queue_test.rs"]
mod edit_queue_test;
