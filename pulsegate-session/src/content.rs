//! Render-free content bookkeeping.
//!
//! Tracks which content item a session is on and swaps in the calming item
//! during an intervention. Playback, rendering and UI belong to external
//! consumers; this type only answers "what should be playing right now".

use tracing::{info, warn};

use crate::intervention::Intervention;

/// Orders a session's exposure content and the calming alternative.
///
/// Content is organized as levels of items, progressed with
/// [`advance_level`](ContentDirector::advance_level) and
/// [`cycle_item`](ContentDirector::cycle_item). During an intervention the
/// calming item is current; resuming returns to the interrupted item.
///
/// # Example
///
/// ```rust
/// use pulsegate_session::{ContentDirector, Intervention};
///
/// let mut director = ContentDirector::new(
///     vec![vec!["spider-far".into(), "spider-near".into()]],
///     "calm-meadow",
/// );
/// assert_eq!(director.current_item(), Some("spider-far"));
///
/// director.begin_intervention();
/// assert_eq!(director.current_item(), Some("calm-meadow"));
///
/// director.resume_prior_content();
/// assert_eq!(director.current_item(), Some("spider-far"));
/// ```
#[derive(Debug)]
pub struct ContentDirector {
    levels: Vec<Vec<String>>,
    calming: String,
    level: usize,
    item: usize,
    calming_active: bool,
    episodes: u32,
}

impl ContentDirector {
    /// Create a director over the given levels and calming item.
    pub fn new(levels: Vec<Vec<String>>, calming: impl Into<String>) -> Self {
        Self {
            levels,
            calming: calming.into(),
            level: 0,
            item: 0,
            calming_active: false,
            episodes: 0,
        }
    }

    /// The item that should be playing right now.
    ///
    /// `None` when no exposure content is configured and no intervention is
    /// active.
    pub fn current_item(&self) -> Option<&str> {
        if self.calming_active {
            return Some(&self.calming);
        }
        self.levels
            .get(self.level)
            .and_then(|items| items.get(self.item))
            .map(String::as_str)
    }

    /// Whether the calming item is currently active.
    pub fn calming_active(&self) -> bool {
        self.calming_active
    }

    /// Number of interventions begun so far.
    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    /// Move to the first item of the next level, if one exists.
    pub fn advance_level(&mut self) {
        if self.level + 1 < self.levels.len() {
            self.level += 1;
            self.item = 0;
            info!(level = self.level + 1, "advanced to next level");
        } else {
            info!("already at the highest level");
        }
    }

    /// Rotate to the next item within the current level, wrapping around.
    pub fn cycle_item(&mut self) {
        if let Some(items) = self.levels.get(self.level) {
            if !items.is_empty() {
                self.item = (self.item + 1) % items.len();
            }
        }
    }
}

impl Intervention for ContentDirector {
    fn begin_intervention(&mut self) {
        self.episodes += 1;
        self.calming_active = true;
        info!(
            episode = self.episodes,
            interrupted = self.levels
                .get(self.level)
                .and_then(|items| items.get(self.item))
                .map(String::as_str),
            calming = %self.calming,
            "switching to calming content"
        );
    }

    fn resume_prior_content(&mut self) {
        if !self.calming_active {
            warn!("resume requested while no intervention was active");
        }
        self.calming_active = false;
        info!(item = ?self.current_item(), "resuming prior content");
    }
}
