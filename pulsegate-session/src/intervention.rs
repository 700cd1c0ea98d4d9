//! The intervention collaborator seam.

use tracing::warn;

/// Collaborator that performs the actual content switch.
///
/// The controller calls [`begin_intervention`](Intervention::begin_intervention)
/// at most once per distress episode and
/// [`resume_prior_content`](Intervention::resume_prior_content) exactly once
/// when recovery completes. Implementations must not block: the calls happen
/// on the session tick loop, inside the controller's transition.
///
/// Both operations are infallible by contract. An implementation that cannot
/// act (nothing wired up yet, device gone) must degrade to a logged no-op so
/// the state machine's bookkeeping stays consistent.
pub trait Intervention: Send {
    /// Switch to calming content.
    fn begin_intervention(&mut self);

    /// Return to the content that was interrupted by the intervention.
    fn resume_prior_content(&mut self);
}

/// Degraded-mode collaborator: warns and does nothing.
///
/// Used when no content backend is wired up. The controller still
/// transitions phases so a backend attached next session sees consistent
/// behavior.
#[derive(Debug, Default)]
pub struct NoopIntervention;

impl Intervention for NoopIntervention {
    fn begin_intervention(&mut self) {
        warn!("no content backend wired up; intervention is a no-op");
    }

    fn resume_prior_content(&mut self) {
        warn!("no content backend wired up; resume is a no-op");
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_calls_do_not_panic() {
        let mut noop = NoopIntervention;
        noop.begin_intervention();
        noop.resume_prior_content();
        // Safe to call repeatedly in degraded mode
        noop.begin_intervention();
        noop.resume_prior_content();
    }
}
