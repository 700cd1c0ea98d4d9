//! Controller phase.

use core::fmt;

/// The two phases of the distress controller.
///
/// A session is always in exactly one of these; there is no error phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    /// Watching the signal for sustained elevation.
    #[default]
    Monitoring,
    /// Calming content is active; waiting for recovery.
    Intervening,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Monitoring => write!(f, "monitoring"),
            Phase::Intervening => write!(f, "intervening"),
        }
    }
}
