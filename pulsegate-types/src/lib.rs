//! # pulsegate-types
//!
//! Core types for heart-rate-gated exposure sessions. This crate defines the
//! shared vocabulary used by the pulsegate ingestion pipeline and session
//! controller.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **Transport agnostic**: The types carry no socket or runtime assumptions
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization of samples, phases and thresholds via serde
//!
//! ## Example
//!
//! ```rust
//! use pulsegate_types::{Bpm, Thresholds};
//!
//! let thresholds = Thresholds::default();
//! assert!(thresholds.validate().is_ok());
//!
//! let sample: Bpm = "95".parse().unwrap();
//! assert!(sample > thresholds.trigger);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod phase;
mod sample;
mod thresholds;

pub use phase::*;
pub use sample::*;
pub use thresholds::*;
