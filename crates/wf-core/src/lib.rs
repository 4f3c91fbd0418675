//! wf-core - wow-and-flutter measurement core
//!
//! This crate implements the DSP pipeline behind a wow-and-flutter meter:
//! given mono 16-bit PCM of a constant-frequency test tone played back
//! through the transport under test, it isolates the tone, times its
//! zero-crossings to sub-sample accuracy, weights the resulting timing-error
//! sequence against one of four reference curves, and publishes rolling
//! RMS/quasi-peak flutter percentages plus the recovered tone frequency.
//!
//! # Core Abstractions
//!
//! - [`Session`] - the measurement handle: `init` once, `process` 10-second
//!   blocks repeatedly, `get_results` at any time.
//! - [`Config`] - derived, immutable per-session constants.
//! - [`FilterBank`] / [`FilterSelect`] - the isolator and the four weighting
//!   filters (Unweighted, DIN, Wow, Flutter).
//! - [`Results`] - the published measurement snapshot.
//!
//! # Pipeline
//!
//! Each `process` call advances the measurement by exactly 10 seconds, in
//! 100 ms blocks: a validity gate ([`gate`]) admits or rejects the block,
//! admitted samples pass through the isolator and sub-sample zero-crossing
//! detector ([`crossing`]), crossings become timing-error samples
//! ([`timing`]) that are weighted and fed to a quasi-peak envelope
//! ([`envelope`]), and every 100 ms/1 s/5 s the rolling aggregator
//! ([`window`]) publishes a fresh [`Results`] snapshot.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! wf-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use wf_core::Session;
//!
//! let mut session = Session::init(48_000, 3150.0);
//! session.process(&samples, 0)?;
//! let results = session.get_results();
//! println!("{:.3}% flutter at {:.1} Hz", results.rms_percent, results.frequency_hz);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod crossing;
pub mod effect;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod gate;
pub mod results;
pub mod session;
pub mod timing;
pub mod window;

pub use config::Config;
pub use crossing::{CrossingEvent, CrossingState};
pub use effect::{Chain, Effect, EffectExt};
pub use envelope::QuasiPeak;
pub use error::{Error, Result};
pub use filter::{BiquadCascade, FilterBank, FilterSelect, Isolator, Section, Weighter};
pub use gate::{GateOutcome, GateState};
pub use results::Results;
pub use session::Session;
pub use timing::ErrorAccumulator;
pub use window::{WindowPublication, WindowRing};
