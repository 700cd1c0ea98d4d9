//! Session wiring and the main scheduling loop.
//!
//! One tick loop drives everything on the consumer side: the dispatcher
//! drain/fan-out and the controller's recovery polling. The only other
//! execution context is the UDP receive task inside `pulsegate-ingest`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use parking_lot::Mutex;
use tracing::{error, info};

use pulsegate_ingest::{HeartRateReadout, LatestRelay, SampleDispatcher, UdpSampleSource};

use crate::config::SessionConfig;
use crate::controller::DistressController;
use crate::duration::format_duration;
use crate::intervention::Intervention;

/// A wired monitoring session.
///
/// [`start`](Session::start) builds the pipeline: relay, UDP source,
/// dispatcher with the controller subscribed, readout. [`run`](Session::run)
/// then drives the tick loop until ctrl-c. The pieces are public enough to be
/// driven manually (see `tick_once`), which is also how the wiring is tested.
pub struct Session {
    config: SessionConfig,
    dispatcher: SampleDispatcher,
    readout: HeartRateReadout,
    controller: Arc<Mutex<DistressController>>,
    source: Option<UdpSampleSource>,
}

impl Session {
    /// Wire up a session from a resolved configuration.
    ///
    /// A bind failure is fatal to the sample source only: it is logged and
    /// the session continues with an absent signal, so the operator can see
    /// the session rather than a dead process.
    pub async fn start(
        config: SessionConfig,
        intervention: Box<dyn Intervention>,
    ) -> Result<Self> {
        config.validate()?;

        let relay = Arc::new(LatestRelay::new());
        let source = match UdpSampleSource::bind(config.port, relay.clone()).await {
            Ok(source) => Some(source),
            Err(e) => {
                error!(error = %e, "sample source unavailable, continuing without a live signal");
                None
            }
        };

        let mut dispatcher = SampleDispatcher::new(relay);
        let readout = dispatcher.readout();

        let controller = Arc::new(Mutex::new(DistressController::new(
            config.thresholds,
            intervention,
        )));
        {
            let controller = controller.clone();
            dispatcher.subscribe(move |bpm| controller.lock().on_sample(bpm, Instant::now()));
        }

        info!(
            port = config.port,
            trigger = %config.thresholds.trigger,
            recovery = %config.thresholds.recovery,
            sustain = %format_duration(config.thresholds.sustain),
            floor = %format_duration(config.thresholds.cooldown_floor),
            "session started"
        );

        Ok(Self {
            config,
            dispatcher,
            readout,
            controller,
            source,
        })
    }

    /// Address the sample source is listening on, if it bound.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.source.as_ref().map(|s| s.local_addr())
    }

    /// Read-only last-known heart rate, for display.
    pub fn readout(&self) -> HeartRateReadout {
        self.readout.clone()
    }

    /// One scheduling step: drain/dispatch, then advance the recovery wait.
    pub fn tick_once(&mut self, now: Instant) {
        self.dispatcher.tick();
        self.controller.lock().poll_recovery(self.readout.current(), now);
    }

    /// Drive the tick loop until ctrl-c, then tear down.
    pub async fn run(mut self) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.tick);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick_once(Instant::now());
                }
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        self.finish().await;
        Ok(())
    }

    /// Tear down: stop the source, log the episode summary.
    pub async fn finish(self) {
        if let Some(source) = self.source {
            source.shutdown().await;
        }

        let controller = self.controller.lock();
        let episodes = controller.episodes();
        info!(
            episodes = episodes.len(),
            phase = %controller.phase(),
            "session ended"
        );
        for (n, episode) in episodes.iter().enumerate() {
            match episode.duration() {
                Some(d) => info!(episode = n + 1, duration = %format_duration(d), "episode"),
                None => info!(episode = n + 1, "episode never recovered before teardown"),
            }
        }
    }
}
