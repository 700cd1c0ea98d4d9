//! Session threshold configuration.

use core::fmt;
use core::time::Duration;

use crate::Bpm;

/// Thresholds governing when an intervention begins and ends.
///
/// The trigger/recovery pair forms a hysteresis gap: elevation is detected
/// strictly above `trigger`, recovery at or below `recovery`. Keeping the two
/// apart prevents flapping at a single boundary.
///
/// # Example
///
/// ```rust
/// use pulsegate_types::{Bpm, Thresholds};
/// use std::time::Duration;
///
/// let thresholds = Thresholds {
///     trigger: Bpm::new(100),
///     recovery: Bpm::new(90),
///     sustain: Duration::from_secs(5),
///     cooldown_floor: Duration::from_secs(15),
/// };
/// assert!(thresholds.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Upper threshold: samples strictly above this count as elevated.
    pub trigger: Bpm,
    /// Lower threshold: recovery completes once the reading is at or below this.
    pub recovery: Bpm,
    /// How long the signal must stay continuously above `trigger` before an
    /// intervention begins.
    pub sustain: Duration,
    /// Minimum duration of an intervention, regardless of the signal.
    pub cooldown_floor: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            trigger: Bpm::new(90),
            recovery: Bpm::new(85),
            sustain: Duration::from_secs(3),
            cooldown_floor: Duration::from_secs(10),
        }
    }
}

impl Thresholds {
    /// Check internal consistency.
    ///
    /// `recovery` must sit strictly below `trigger`; a zero-width gap would
    /// reintroduce the single-boundary flapping the pair exists to prevent.
    pub fn validate(&self) -> Result<(), InvalidThresholds> {
        if self.recovery >= self.trigger {
            return Err(InvalidThresholds::NoHysteresisGap {
                trigger: self.trigger,
                recovery: self.recovery,
            });
        }
        if self.sustain.is_zero() {
            return Err(InvalidThresholds::ZeroSustain);
        }
        Ok(())
    }
}

/// Validation failure for a [`Thresholds`] configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidThresholds {
    /// `recovery` is not strictly below `trigger`.
    NoHysteresisGap { trigger: Bpm, recovery: Bpm },
    /// A zero sustain window would trigger on any single elevated sample.
    ZeroSustain,
}

impl fmt::Display for InvalidThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidThresholds::NoHysteresisGap { trigger, recovery } => write!(
                f,
                "recovery threshold ({recovery}) must be strictly below trigger threshold ({trigger})"
            ),
            InvalidThresholds::ZeroSustain => write!(f, "sustain duration must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidThresholds {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Thresholds::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_gap() {
        let t = Thresholds {
            trigger: Bpm::new(85),
            recovery: Bpm::new(90),
            ..Thresholds::default()
        };
        assert!(matches!(
            t.validate(),
            Err(InvalidThresholds::NoHysteresisGap { .. })
        ));
    }

    #[test]
    fn rejects_equal_thresholds() {
        let t = Thresholds {
            trigger: Bpm::new(90),
            recovery: Bpm::new(90),
            ..Thresholds::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn rejects_zero_sustain() {
        let t = Thresholds {
            sustain: Duration::ZERO,
            ..Thresholds::default()
        };
        assert_eq!(t.validate(), Err(InvalidThresholds::ZeroSustain));
    }

    #[test]
    fn error_display_names_both_thresholds() {
        let err = InvalidThresholds::NoHysteresisGap {
            trigger: Bpm::new(85),
            recovery: Bpm::new(90),
        };
        let msg = err.to_string();
        assert!(msg.contains("90 BPM"));
        assert!(msg.contains("85 BPM"));
    }
}
