//! # pulsegate-session
//!
//! The exposure-session controller: watches the live heart-rate signal for
//! sustained distress, switches to calming content, and resumes the
//! interrupted content once the subject has recovered.
//!
//! The state machine lives in [`controller`]; the content collaborator seam
//! is the [`Intervention`] trait. [`session::Session`] wires the controller
//! to the `pulsegate-ingest` pipeline and drives everything from one tick
//! loop.

pub mod config;
pub mod content;
pub mod controller;
pub mod duration;
pub mod intervention;
pub mod session;

pub use config::SessionConfig;
pub use content::ContentDirector;
pub use controller::DistressController;
pub use intervention::{Intervention, NoopIntervention};
pub use session::Session;
