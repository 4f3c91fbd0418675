//! Signal validity gate (§4.2).
//!
//! Runs once per 100 ms block, over the raw 16-bit signed samples, before
//! the DSP pass is allowed to touch that block. A block with too little
//! amplitude, or a zero-crossing count outside the expected band for the
//! configured test tone, is skipped entirely.

use crate::config::Config;

/// Per-session gate state. Only `previous_raw` survives across blocks; the
/// per-block scalars are recomputed fresh for each 100 ms window.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateState {
    previous_raw: i16,
}

/// Outcome of a [`GateState::evaluate`] pass: whether the block is valid,
/// and — regardless of validity — the updated `previous_raw` value the
/// caller must retain for the next block.
#[derive(Debug, Clone, Copy)]
pub struct GateOutcome {
    /// Whether the block passed both the amplitude and crossing-count checks.
    pub valid: bool,
}

impl GateState {
    /// Evaluates one 100 ms block of raw samples.
    ///
    /// `max_amplitude` tracks only positive excursions (seeded at 0, per
    /// §9 open question 2) and `zero_crossing_count` uses the convention
    /// `(curr >= 0 && prev < 0) || (curr < 0 && prev >= 0)`.
    pub fn evaluate(&mut self, block: &[i16], config: &Config) -> GateOutcome {
        let mut max_amplitude: i16 = 0;
        let mut zero_crossing_count: u32 = 0;
        let mut prev = self.previous_raw;

        for &curr in block {
            if curr > max_amplitude {
                max_amplitude = curr;
            }
            let sign_change = (curr >= 0 && prev < 0) || (curr < 0 && prev >= 0);
            if sign_change {
                zero_crossing_count += 1;
            }
            prev = curr;
        }
        self.previous_raw = prev;

        let valid = max_amplitude >= 50
            && zero_crossing_count >= config.min_crossings_per_100ms
            && zero_crossing_count <= config.max_crossings_per_100ms;

        GateOutcome { valid }
    }

    /// Resets cross-block state. Does not need to be called on a fresh
    /// session (the `Default` state is already zeroed); provided for
    /// parity with the other components' `reset`.
    pub fn reset(&mut self) {
        self.previous_raw = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(48_000, 3150.0)
    }

    #[test]
    fn silence_is_invalid() {
        let mut gate = GateState::default();
        let block = vec![0i16; config().samples_per_100ms];
        assert!(!gate.evaluate(&block, &config()).valid);
    }

    #[test]
    fn low_amplitude_tone_is_invalid() {
        let cfg = config();
        let mut gate = GateState::default();
        let block: Vec<i16> = (0..cfg.samples_per_100ms)
            .map(|i| {
                let t = i as f32 / cfg.sample_rate_hz as f32;
                (30.0 * libm::sinf(2.0 * core::f32::consts::PI * cfg.test_frequency_hz * t)) as i16
            })
            .collect();
        assert!(!gate.evaluate(&block, &cfg).valid);
    }

    #[test]
    fn full_amplitude_tone_at_expected_rate_is_valid() {
        let cfg = config();
        let mut gate = GateState::default();
        let block: Vec<i16> = (0..cfg.samples_per_100ms)
            .map(|i| {
                let t = i as f32 / cfg.sample_rate_hz as f32;
                (10_000.0 * libm::sinf(2.0 * core::f32::consts::PI * cfg.test_frequency_hz * t)) as i16
            })
            .collect();
        assert!(gate.evaluate(&block, &cfg).valid);
    }

    #[test]
    fn out_of_band_crossing_count_is_invalid() {
        let cfg = config();
        let mut gate = GateState::default();
        // Noise-ish signal with far too many crossings for the configured tone.
        let block: Vec<i16> = (0..cfg.samples_per_100ms)
            .map(|i| if i % 2 == 0 { 10_000 } else { -10_000 })
            .collect();
        assert!(!gate.evaluate(&block, &cfg).valid);
    }

    #[test]
    fn previous_raw_persists_across_blocks() {
        let cfg = config();
        let mut gate = GateState::default();
        gate.evaluate(&[5, 10, -5], &cfg);
        assert_eq!(gate.previous_raw, -5);
        gate.evaluate(&[1], &cfg);
        // crossing check against carried-over previous_raw: -5 -> 1 is a sign change
        assert_eq!(gate.previous_raw, 1);
    }
}
