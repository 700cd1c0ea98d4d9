//! # pulsegate-ingest
//!
//! Concurrent heart-rate sample ingestion for pulsegate.
//!
//! This crate owns everything between the network socket and the session
//! controller: a UDP listener running on a background task, a single-slot
//! latest-value relay crossing from that task to the session tick loop, and a
//! dispatcher that drains the relay once per tick and fans the sample out to
//! subscribers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pulsegate_ingest::{LatestRelay, SampleDispatcher, UdpSampleSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pulsegate_ingest::IngestError> {
//!     let relay = Arc::new(LatestRelay::default());
//!     let source = UdpSampleSource::bind(12345, relay.clone()).await?;
//!
//!     let mut dispatcher = SampleDispatcher::new(relay);
//!     dispatcher.subscribe(|bpm| println!("sample: {bpm}"));
//!
//!     // Drive `dispatcher.tick()` from your scheduling loop...
//!
//!     source.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Backpressure
//!
//! The relay never buffers more than one sample. If the tick loop falls
//! behind the monitor, intermediate readings are dropped and only the
//! freshest survives. Staleness is unacceptable here; completeness of the
//! sample history is not required.

mod dispatcher;
mod error;
mod listener;
mod relay;

pub use dispatcher::{HeartRateReadout, SampleDispatcher};
pub use error::IngestError;
pub use listener::UdpSampleSource;
pub use relay::LatestRelay;

// Re-export types for convenience
pub use pulsegate_types::Bpm;
