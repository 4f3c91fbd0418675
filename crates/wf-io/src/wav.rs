//! WAV/RIFF reading for the measurement pipeline (§6).
//!
//! Only reading is in scope: the core consumes mono 16-bit PCM, and this
//! module's job is to get a WAV file into that shape regardless of how
//! many channels or what bit depth it was actually recorded at.

use crate::Result;
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// WAV file metadata, read without decoding sample data.
#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    /// Number of audio channels in the source file.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample in the source file.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
}

/// Reads WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64;
    let num_frames = total_samples / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
    })
}

/// Reads a WAV file and returns its first channel as signed 16-bit PCM,
/// along with the source sample rate (§6: "mono 16-bit PCM, if stereo,
/// first channel only").
///
/// Float and non-16-bit integer source formats are rescaled to the full
/// 16-bit signed range; a source that is already 16-bit PCM passes through
/// unchanged.
pub fn read_mono_pcm16<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, u32)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);

    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits_per_sample = spec.bits_per_sample,
        "reading WAV"
    );

    let first_channel: Vec<i16> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .step_by(channels.max(1))
            .map(|s| s.map(|v| (v * f32::from(i16::MAX)) as i16))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int if spec.bits_per_sample == 16 => reader
            .into_samples::<i16>()
            .step_by(channels.max(1))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let shift = 16 - i32::from(bits).min(16);
            reader
                .into_samples::<i32>()
                .step_by(channels.max(1))
                .map(|s| s.map(|v| (v << shift.max(0)) as i16))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((first_channel, spec.sample_rate))
}
