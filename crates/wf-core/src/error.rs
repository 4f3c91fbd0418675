//! Error type for the measurement core.
//!
//! `wf-core` stays `no_std`-compatible (§10), so this implements
//! [`core::fmt::Display`] directly rather than pulling in `thiserror`; under
//! `std` it also implements [`std::error::Error`].

use core::fmt;

/// Errors [`crate::Session::process`] can return.
///
/// The design intentionally has exactly one error kind: everything else
/// (§7 `DegenerateDenominator`, `InvalidBlock`, `FilterTypeOutOfRange`) is
/// recovered locally and never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `process` was called with fewer than `100 * samples_per_100ms`
    /// samples (§6, §7 `InsufficientSamples`).
    InsufficientSamples {
        /// Samples actually supplied.
        got: usize,
        /// Samples required for one 10-second `process` call.
        needed: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientSamples { got, needed } => write!(
                f,
                "insufficient samples for a 10s process call: got {got}, needed {needed}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convenience result alias for the measurement core.
pub type Result<T> = core::result::Result<T, Error>;
