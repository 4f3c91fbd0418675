//! Derived, immutable session configuration (§3 `Config`).

/// Configuration derived once at [`crate::Session::init`] from the caller's
/// sample rate and test tone frequency. Every field here is a pure function
/// of those two inputs and never changes for the life of the session.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Sample rate the session was initialized with, in Hz.
    pub sample_rate_hz: u32,
    /// Test tone frequency the session was initialized with, in Hz.
    pub test_frequency_hz: f32,
    /// Nanoseconds represented by one sample period.
    pub nanoseconds_per_sample: f64,
    /// Expected half-period of the test tone, in nanoseconds.
    pub expected_half_period_ns: f64,
    /// Number of samples in a 100 ms block.
    pub samples_per_100ms: usize,
    /// Minimum zero-crossing count for a 100 ms block to be valid.
    pub min_crossings_per_100ms: u32,
    /// Maximum zero-crossing count for a 100 ms block to be valid.
    pub max_crossings_per_100ms: u32,
}

impl Config {
    /// Derives a [`Config`] from the sample rate and test tone frequency.
    ///
    /// Matches §3's invariants exactly:
    /// - `samples_per_100ms = floor(sample_rate_hz / 10)`
    /// - `nanoseconds_per_sample = 1e9 / sample_rate_hz`
    /// - `expected_half_period_ns = 0.5e9 / test_frequency_hz`
    /// - expected crossings per 100 ms is `test_frequency_hz / 5`, with a
    ///   +/-5% tolerance band floored to an integer count.
    pub fn new(sample_rate_hz: u32, test_frequency_hz: f32) -> Self {
        let sample_rate_f = f64::from(sample_rate_hz);
        let expected_crossings = f64::from(test_frequency_hz) / 5.0;
        Self {
            sample_rate_hz,
            test_frequency_hz,
            nanoseconds_per_sample: 1.0e9 / sample_rate_f,
            expected_half_period_ns: 0.5e9 / f64::from(test_frequency_hz),
            samples_per_100ms: (sample_rate_hz / 10) as usize,
            min_crossings_per_100ms: (expected_crossings * 0.95) as u32,
            max_crossings_per_100ms: (expected_crossings * 1.05) as u32,
        }
    }

    /// Samples needed for one `process` call (exactly 10 s, §4.6).
    pub fn samples_per_process_call(&self) -> usize {
        self.samples_per_100ms * WINDOWS_PER_PROCESS_CALL
    }
}

/// Every `process` call advances the measurement by exactly 100 windows of
/// 100 ms each, i.e. 10 seconds (§4.6).
pub const WINDOWS_PER_PROCESS_CALL: usize = 100;
