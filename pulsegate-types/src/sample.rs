//! Heart-rate sample representation.
//!
//! We use whole beats per minute as the canonical unit. Monitors report
//! integer BPM; sub-beat precision never crosses the wire.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

/// A heart-rate reading in beats per minute.
///
/// This wrapper gives samples a distinct type from bare counters and
/// thresholds. Values are unbounded in the type but practically 0-300.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Bpm(pub u16);

impl Bpm {
    /// Create from a beats-per-minute value.
    pub const fn new(bpm: u16) -> Self {
        Self(bpm)
    }

    /// Get the value in beats per minute.
    pub const fn get(&self) -> u16 {
        self.0
    }
}

impl From<u16> for Bpm {
    fn from(bpm: u16) -> Self {
        Self(bpm)
    }
}

impl From<Bpm> for u16 {
    fn from(bpm: Bpm) -> Self {
        bpm.0
    }
}

impl fmt::Display for Bpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}

impl FromStr for Bpm {
    type Err = ParseIntError;

    /// Parse the wire representation: base-10 integer text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>().map(Self)
    }
}
