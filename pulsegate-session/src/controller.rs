//! Distress detection and intervention state machine.
//!
//! Two phases: monitoring and intervening. Elevation must be continuous,
//! not cumulative: a single sample at or below the trigger threshold resets
//! the sustained-elevation timer. Recovery is hysteretic - it completes at a
//! lower threshold than the one that triggered, and never before the
//! cool-down floor has elapsed.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use pulsegate_types::{Bpm, Phase, Thresholds};

use crate::intervention::Intervention;

/// One intervention, from trigger to resume.
#[derive(Debug, Clone, Copy)]
pub struct Episode {
    /// When the intervention began.
    pub started: Instant,
    /// When prior content was resumed; `None` while still intervening.
    pub resumed: Option<Instant>,
}

impl Episode {
    /// Trigger-to-resume duration, once the episode has completed.
    pub fn duration(&self) -> Option<Duration> {
        self.resumed.map(|r| r.duration_since(self.started))
    }
}

/// The session's distress state machine.
///
/// Fed each dispatched sample via [`on_sample`](DistressController::on_sample)
/// and polled once per scheduling tick via
/// [`poll_recovery`](DistressController::poll_recovery). All state lives here
/// and is mutated only through `&mut self`; the dispatcher only delivers
/// read-only sample values.
///
/// Timestamps are passed in rather than read from the clock so transitions
/// are deterministic under test.
pub struct DistressController {
    thresholds: Thresholds,
    intervention: Box<dyn Intervention>,
    phase: Phase,
    above_since: Option<Instant>,
    can_trigger: bool,
    floor_deadline: Option<Instant>,
    episodes: Vec<Episode>,
}

impl DistressController {
    /// Create a controller in the monitoring phase.
    ///
    /// `thresholds` should have been validated by the caller; the controller
    /// honors whatever gap it is given.
    pub fn new(thresholds: Thresholds, intervention: Box<dyn Intervention>) -> Self {
        Self {
            thresholds,
            intervention,
            phase: Phase::Monitoring,
            above_since: None,
            can_trigger: true,
            floor_deadline: None,
            episodes: Vec::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed and in-flight episodes, oldest first.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Feed one dispatched sample.
    ///
    /// Called synchronously from the dispatcher fan-out. While intervening
    /// (or while re-triggering is suppressed) samples are observed but do not
    /// drive transitions.
    pub fn on_sample(&mut self, bpm: Bpm, now: Instant) {
        if self.phase == Phase::Intervening || !self.can_trigger {
            return;
        }

        if bpm > self.thresholds.trigger {
            let since = *self.above_since.get_or_insert(now);
            if now.duration_since(since) >= self.thresholds.sustain {
                self.trigger_intervention(now);
            }
        } else {
            // Elevation must be continuous; any sample at or below the
            // trigger threshold restarts the window.
            if self.above_since.take().is_some() {
                debug!(%bpm, "elevation ended before sustain window");
            }
        }
    }

    /// Advance the recovery wait by one scheduling tick.
    ///
    /// `reading` is the dispatcher's last known value. Does nothing while
    /// monitoring. During an intervention: waits out the cool-down floor
    /// unconditionally, then completes recovery once the reading is at or
    /// below the recovery threshold. There is no timeout - if the signal
    /// never recovers, the wait persists for the life of the session.
    pub fn poll_recovery(&mut self, reading: Option<Bpm>, now: Instant) {
        if self.phase != Phase::Intervening {
            return;
        }
        let Some(deadline) = self.floor_deadline else {
            return;
        };
        if now < deadline {
            return;
        }

        match reading {
            Some(bpm) if bpm <= self.thresholds.recovery => self.complete_recovery(now),
            _ => {}
        }
    }

    fn trigger_intervention(&mut self, now: Instant) {
        // Phase guard and flag are checked together; redundant with the
        // caller's guard but kept as the authoritative pair.
        if self.phase == Phase::Intervening || !self.can_trigger {
            return;
        }

        info!(
            sustained = ?self.thresholds.sustain,
            trigger = %self.thresholds.trigger,
            "sustained elevation detected, beginning intervention"
        );

        self.intervention.begin_intervention();
        self.phase = Phase::Intervening;
        self.can_trigger = false;
        self.floor_deadline = Some(now + self.thresholds.cooldown_floor);
        self.episodes.push(Episode {
            started: now,
            resumed: None,
        });
    }

    fn complete_recovery(&mut self, now: Instant) {
        info!(recovery = %self.thresholds.recovery, "recovery complete, resuming prior content");

        self.intervention.resume_prior_content();
        self.phase = Phase::Monitoring;
        self.above_since = None;
        self.can_trigger = true;
        self.floor_deadline = None;
        if let Some(episode) = self.episodes.last_mut() {
            episode.resumed = Some(now);
        }
    }
}

impl std::fmt::Debug for DistressController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistressController")
            .field("phase", &self.phase)
            .field("above_since", &self.above_since)
            .field("can_trigger", &self.can_trigger)
            .field("episodes", &self.episodes.len())
            .finish()
    }
}
