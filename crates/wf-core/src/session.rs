//! Top-level measurement session (§5 `Session`).
//!
//! Owns every piece of per-measurement state and exposes the three-call
//! public surface: [`Session::init`], [`Session::process`], and
//! [`Session::get_results`].

use crate::config::Config;
use crate::crossing::{CrossingEvent, CrossingState};
use crate::envelope::QuasiPeak;
use crate::error::{Error, Result};
use crate::filter::{FilterBank, FilterSelect};
use crate::gate::GateState;
use crate::results::Results;
use crate::timing::{self, ErrorAccumulator};
use crate::window::WindowRing;

/// A running wow-and-flutter measurement.
///
/// Built once with [`Session::init`] for a fixed sample rate and test tone
/// frequency, then fed 10-second blocks of mono 16-bit PCM via repeated
/// calls to [`Session::process`]. [`Session::get_results`] returns the most
/// recently published 1-second snapshot at any time.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    filters: FilterBank,
    gate: GateState,
    crossings: CrossingState,
    accumulator: ErrorAccumulator,
    quasi_peak: QuasiPeak,
    window: WindowRing,
    freq_sum_hz: f64,
    freq_count: u32,
    results: Results,
}

impl Session {
    /// Initializes a fresh session for the given sample rate and test tone
    /// frequency. All internal state starts zeroed (§5, §9 invariants).
    pub fn init(sample_rate_hz: u32, test_frequency_hz: f32) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate_hz, test_frequency_hz, "initializing session");

        let config = Config::new(sample_rate_hz, test_frequency_hz);
        Self {
            filters: FilterBank::new(sample_rate_hz as f32, test_frequency_hz),
            gate: GateState::default(),
            crossings: CrossingState::default(),
            accumulator: ErrorAccumulator::default(),
            quasi_peak: QuasiPeak::default(),
            window: WindowRing::default(),
            freq_sum_hz: 0.0,
            freq_count: 0,
            results: Results::default(),
            config,
        }
    }

    /// Processes exactly one 10-second block of mono samples (§4.6, §6).
    ///
    /// `samples` must contain `100 * samples_per_100ms` entries; anything
    /// shorter returns [`Error::InsufficientSamples`] without touching any
    /// state. `filter_type` selects the weighting filter per
    /// [`FilterSelect::from_selector`].
    ///
    /// §9 open question 4: the whole-call frequency average accumulates
    /// across the 100 blocks of a single `process` call and resets at the
    /// start of the next call, independent of the 1-second RMS/peak
    /// publication cadence.
    pub fn process(&mut self, samples: &[i16], filter_type: i32) -> Result<()> {
        let needed = self.config.samples_per_process_call();
        if samples.len() < needed {
            return Err(Error::InsufficientSamples {
                got: samples.len(),
                needed,
            });
        }

        let selector = FilterSelect::from_selector(filter_type);
        self.freq_sum_hz = 0.0;
        self.freq_count = 0;

        for block_index in 0..crate::config::WINDOWS_PER_PROCESS_CALL {
            let start = block_index * self.config.samples_per_100ms;
            let block = &samples[start..start + self.config.samples_per_100ms];
            self.process_100ms_block(block, selector);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            rms_percent = self.results.rms_percent,
            quasi_peak = self.results.quasi_peak,
            frequency_hz = self.results.frequency_hz,
            "process call complete"
        );

        Ok(())
    }

    fn process_100ms_block(&mut self, block: &[i16], selector: FilterSelect) {
        let outcome = self.gate.evaluate(block, &self.config);
        self.accumulator.reset_100ms();

        if !outcome.valid {
            // §4.2: skipped entirely. Isolator/crossing/weighter state stays
            // untouched and the window ring is not advanced or written.
            return;
        }

        for &raw in block {
            let isolated = self.filters.isolate(f32::from(raw));
            let event = self.crossings.push_sample(isolated, self.config.nanoseconds_per_sample);
            if let CrossingEvent::Interval(interval_ns) = event {
                let error = timing::timing_error(interval_ns, self.config.expected_half_period_ns) as f32;
                let weighted = self.filters.weight(selector, error);
                let measurement = timing::measurement(weighted);
                self.quasi_peak.update(measurement);
                self.accumulator.accumulate(weighted, interval_ns);
            }
        }

        let publication = self.window.end_of_100ms_block(
            self.accumulator.sum_of_squares_100ms,
            self.accumulator.valid_count,
            self.quasi_peak.value(),
        );

        if let Some(block_frequency_hz) = self.accumulator.measured_frequency_hz() {
            self.freq_sum_hz += block_frequency_hz;
            self.freq_count += 1;
        }

        if publication.is_some() {
            self.accumulator.reset_1sec();
        }

        if let Some(publication) = publication {
            self.results.rms_percent = publication.rms_percent;
            self.results.quasi_peak = publication.quasi_peak;
            if self.freq_count > 0 {
                self.results.frequency_hz = (self.freq_sum_hz / f64::from(self.freq_count)) as f32;
            }
        }
    }

    /// Returns the most recently published measurement snapshot. Zero
    /// before the first 1-second boundary has been reached.
    pub fn get_results(&self) -> Results {
        self.results
    }

    /// Reverts every piece of mutable state to its just-initialized form,
    /// without rederiving filter coefficients (§5).
    pub fn reset(&mut self) {
        self.filters.reset();
        self.gate.reset();
        self.crossings.reset();
        self.accumulator.reset_1sec();
        self.quasi_peak = QuasiPeak::default();
        self.window.reset();
        self.freq_sum_hz = 0.0;
        self.freq_count = 0;
        self.results = Results::default();
    }
}
