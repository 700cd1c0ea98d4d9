//! Tick-driven sample dispatcher.
//!
//! Runs on the session's scheduling loop: drains the relay once per tick and
//! fans a fresh sample out to subscribers synchronously, in registration
//! order. The last observed value is published through a watch channel for
//! read-only consumers (display, recovery polling) that must not touch the
//! fan-out path.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use pulsegate_types::Bpm;

use crate::relay::LatestRelay;

/// Fans relayed samples out to subscribers once per scheduling tick.
///
/// Subscribers are invoked synchronously and must return quickly: no I/O, no
/// long computation. A subscriber must not assume it is the only one.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use pulsegate_ingest::{Bpm, LatestRelay, SampleDispatcher};
///
/// let relay = Arc::new(LatestRelay::default());
/// let mut dispatcher = SampleDispatcher::new(relay.clone());
/// dispatcher.subscribe(|bpm| println!("got {bpm}"));
///
/// relay.write(Bpm::new(88));
/// assert_eq!(dispatcher.tick(), Some(Bpm::new(88)));
///
/// // Nothing pending: no notification, and that is normal
/// assert_eq!(dispatcher.tick(), None);
/// ```
pub struct SampleDispatcher {
    relay: Arc<LatestRelay>,
    subscribers: Vec<Box<dyn FnMut(Bpm) + Send>>,
    reading_tx: watch::Sender<Option<Bpm>>,
}

impl SampleDispatcher {
    /// Create a dispatcher draining the given relay.
    pub fn new(relay: Arc<LatestRelay>) -> Self {
        let (reading_tx, _) = watch::channel(None);
        Self {
            relay,
            subscribers: Vec::new(),
            reading_tx,
        }
    }

    /// Register a subscriber.
    ///
    /// Subscribers are notified in registration order, on the tick context.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Bpm) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Drain the relay once and notify subscribers if a sample was pending.
    ///
    /// Returns the dispatched sample, if any. An empty drain is not an
    /// error; it just means no datagram arrived since the last tick.
    pub fn tick(&mut self) -> Option<Bpm> {
        let bpm = self.relay.drain()?;

        // Publish before the fan-out so readers polled on the same tick see
        // the value subscribers are being handed.
        self.reading_tx.send_replace(Some(bpm));
        debug!(%bpm, "dispatching sample");

        for subscriber in &mut self.subscribers {
            subscriber(bpm);
        }

        Some(bpm)
    }

    /// Hand out a read-only view of the last dispatched value.
    pub fn readout(&self) -> HeartRateReadout {
        HeartRateReadout {
            rx: self.reading_tx.subscribe(),
        }
    }
}

impl std::fmt::Debug for SampleDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleDispatcher")
            .field("subscribers", &self.subscribers.len())
            .field("last_seen", &*self.reading_tx.borrow())
            .finish()
    }
}

/// Read-only view of the last known heart rate.
///
/// Refreshed at dispatcher cadence; intended for display and for the
/// recovery wait's polling. Not part of the notification path - reads never
/// coordinate with the fan-out.
#[derive(Debug, Clone)]
pub struct HeartRateReadout {
    rx: watch::Receiver<Option<Bpm>>,
}

impl HeartRateReadout {
    /// The last dispatched sample, or `None` if nothing has arrived yet.
    pub fn current(&self) -> Option<Bpm> {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn dispatcher_with_relay() -> (SampleDispatcher, Arc<LatestRelay>) {
        let relay = Arc::new(LatestRelay::new());
        (SampleDispatcher::new(relay.clone()), relay)
    }

    #[test]
    fn empty_tick_fires_nothing() {
        let (mut dispatcher, _relay) = dispatcher_with_relay();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        dispatcher.subscribe(move |bpm| sink.lock().unwrap().push(bpm));

        assert_eq!(dispatcher.tick(), None);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn dispatches_to_all_subscribers_in_order() {
        let (mut dispatcher, relay) = dispatcher_with_relay();

        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let sink = order.clone();
            dispatcher.subscribe(move |_| sink.lock().unwrap().push(tag));
        }

        relay.write(Bpm::new(90));
        assert_eq!(dispatcher.tick(), Some(Bpm::new(90)));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn burst_before_tick_delivers_only_latest() {
        let (mut dispatcher, relay) = dispatcher_with_relay();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        dispatcher.subscribe(move |bpm| sink.lock().unwrap().push(bpm));

        for bpm in [70, 95, 92, 60] {
            relay.write(Bpm::new(bpm));
        }
        dispatcher.tick();

        // No intermediate value is ever delivered
        assert_eq!(*seen.lock().unwrap(), vec![Bpm::new(60)]);
    }

    #[test]
    fn readout_tracks_last_dispatched_value() {
        let (mut dispatcher, relay) = dispatcher_with_relay();
        let readout = dispatcher.readout();

        assert_eq!(readout.current(), None);

        relay.write(Bpm::new(84));
        dispatcher.tick();
        assert_eq!(readout.current(), Some(Bpm::new(84)));

        // An empty tick leaves the cached value untouched
        dispatcher.tick();
        assert_eq!(readout.current(), Some(Bpm::new(84)));

        relay.write(Bpm::new(79));
        dispatcher.tick();
        assert_eq!(readout.current(), Some(Bpm::new(79)));
    }

    #[test]
    fn readout_updates_before_fanout() {
        let (mut dispatcher, relay) = dispatcher_with_relay();
        let readout = dispatcher.readout();

        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        let inner = readout.clone();
        dispatcher.subscribe(move |_| {
            *sink.lock().unwrap() = inner.current();
        });

        relay.write(Bpm::new(101));
        dispatcher.tick();

        // A subscriber reading the readout sees the value it was handed
        assert_eq!(*observed.lock().unwrap(), Some(Bpm::new(101)));
    }

    #[test]
    fn subscribers_added_later_still_notified() {
        let (mut dispatcher, relay) = dispatcher_with_relay();

        relay.write(Bpm::new(90));
        dispatcher.tick();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        dispatcher.subscribe(move |bpm| sink.lock().unwrap().push(bpm));

        relay.write(Bpm::new(91));
        dispatcher.tick();
        assert_eq!(*seen.lock().unwrap(), vec![Bpm::new(91)]);
    }
}
