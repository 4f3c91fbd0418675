//! WAV/RIFF reading for the wow-and-flutter measurement core (§6 `wf-io`).
//!
//! ```rust,ignore
//! use wf_io::read_mono_pcm16;
//! use wf_core::Session;
//!
//! let (samples, sample_rate) = read_mono_pcm16("test-tone.wav")?;
//! let mut session = Session::init(sample_rate, 3150.0);
//! for block in samples.chunks_exact(session_block_len) {
//!     session.process(block, 0)?;
//! }
//! ```

mod wav;

pub use wav::{WavInfo, read_mono_pcm16, read_wav_info};

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),
}

/// Convenience result type for WAV I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
