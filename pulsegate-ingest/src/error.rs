//! Error types for the ingestion pipeline.

use thiserror::Error;

/// Errors that can occur while setting up sample ingestion.
///
/// Malformed datagrams are not represented here: they are dropped inside the
/// receive loop and the stream self-heals on the next datagram.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Binding the UDP listener failed (port in use, permissions, ...).
    #[error("failed to bind UDP listener on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Inspecting an already-bound socket failed.
    #[error("failed to inspect UDP listener: {0}")]
    Socket(#[from] std::io::Error),
}
