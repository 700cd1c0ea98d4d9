//! Single-slot latest-value relay between the receive task and the tick loop.

use parking_lot::Mutex;

use pulsegate_types::Bpm;

/// A single-slot, overwrite-on-write rendezvous cell.
///
/// The receive task calls [`write`](LatestRelay::write) for every decoded
/// sample; the dispatcher calls [`drain`](LatestRelay::drain) once per tick.
/// The slot holds at most one pending sample: writes overwrite, never queue,
/// so a slow consumer only ever sees the freshest value.
///
/// Both operations take the lock for O(1) work and nothing else.
///
/// # Example
///
/// ```rust
/// use pulsegate_ingest::{Bpm, LatestRelay};
///
/// let relay = LatestRelay::default();
/// relay.write(Bpm::new(70));
/// relay.write(Bpm::new(95));
///
/// assert_eq!(relay.drain(), Some(Bpm::new(95)));
/// assert_eq!(relay.drain(), None);
/// ```
#[derive(Debug, Default)]
pub struct LatestRelay {
    slot: Mutex<Option<Bpm>>,
}

impl LatestRelay {
    /// Create an empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the pending slot with a new sample.
    ///
    /// Never blocks beyond the slot's own O(1) critical section and is safe
    /// to call concurrently with [`drain`](LatestRelay::drain).
    pub fn write(&self, bpm: Bpm) {
        *self.slot.lock() = Some(bpm);
    }

    /// Atomically take the pending sample, leaving the slot empty.
    ///
    /// Returns `None` if nothing arrived since the last drain.
    pub fn drain(&self) -> Option<Bpm> {
        self.slot.lock().take()
    }

    /// Whether a sample is currently pending.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }
}
