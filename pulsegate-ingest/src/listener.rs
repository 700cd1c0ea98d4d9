//! UDP sample source.
//!
//! Receives textual heart-rate samples from the monitor bridge and feeds the
//! latest-value relay. The wire format is a single base-10 integer per
//! datagram, UTF-8 encoded; anything else is dropped without a response and
//! the stream self-heals on the next datagram.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use pulsegate_types::Bpm;

use crate::error::IngestError;
use crate::relay::LatestRelay;

/// Largest datagram we care about. "65535" plus slack for whitespace.
const MAX_DATAGRAM: usize = 64;

/// A UDP listener feeding decoded samples into a [`LatestRelay`].
///
/// Binding spawns a background receive task whose lifetime is tied to this
/// handle: [`shutdown`](UdpSampleSource::shutdown) signals the task and waits
/// for it to exit, so the task never outlives socket closure.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use pulsegate_ingest::{LatestRelay, UdpSampleSource};
///
/// # tokio_test::block_on(async {
/// let relay = Arc::new(LatestRelay::default());
/// let source = UdpSampleSource::bind(12345, relay.clone()).await.unwrap();
///
/// // ... samples arrive in the relay as datagrams come in ...
///
/// source.shutdown().await;
/// # });
/// ```
#[derive(Debug)]
pub struct UdpSampleSource {
    local_addr: SocketAddr,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl UdpSampleSource {
    /// Bind on the given port and start the background receive loop.
    ///
    /// Fails fast if the port is unavailable; the caller decides whether the
    /// session continues without a live signal.
    pub async fn bind(port: u16, relay: Arc<LatestRelay>) -> Result<Self, IngestError> {
        let socket = UdpSocket::bind(("0.0.0.0", port))
            .await
            .map_err(|source| IngestError::Bind { port, source })?;
        Self::from_socket(socket, relay)
    }

    /// Start the receive loop on an already-bound socket.
    ///
    /// Useful for tests, which bind port 0 and read back the assigned port
    /// from [`local_addr`](UdpSampleSource::local_addr).
    pub fn from_socket(socket: UdpSocket, relay: Arc<LatestRelay>) -> Result<Self, IngestError> {
        let local_addr = socket.local_addr()?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(receive_loop(socket, relay, stop_rx));

        info!(%local_addr, "UDP sample source started");

        Ok(Self {
            local_addr,
            stop_tx,
            task,
        })
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the receive loop and wait for the background task to exit.
    ///
    /// The pending `recv_from` is abandoned immediately; this never hangs on
    /// an in-flight receive.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
        info!(local_addr = %self.local_addr, "UDP sample source stopped");
    }
}

async fn receive_loop(
    socket: UdpSocket,
    relay: Arc<LatestRelay>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut buf = [0u8; MAX_DATAGRAM];

    loop {
        tokio::select! {
            recv = socket.recv_from(&mut buf) => {
                match recv {
                    Ok((len, peer)) => {
                        if let Some(bpm) = decode_sample(&buf[..len]) {
                            trace!(%bpm, %peer, "sample received");
                            relay.write(bpm);
                        } else {
                            trace!(%peer, len, "malformed datagram dropped");
                        }
                    }
                    Err(e) => {
                        // Transient receive errors (e.g. ICMP port unreachable
                        // surfaced on some platforms) do not end the stream.
                        debug!(error = %e, "UDP receive error");
                    }
                }
            }
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
        }
    }
}

/// Decode one datagram payload: UTF-8 text, trimmed, base-10 integer.
fn decode_sample(payload: &[u8]) -> Option<Bpm> {
    std::str::from_utf8(payload).ok()?.trim().parse().ok()
}
