//! End-to-end scenario tests for the wow-and-flutter measurement core.
//!
//! Each test drives a full [`Session`] through one or more 10-second
//! `process` calls of synthetic PCM, the way a real measurement run would,
//! and checks the published [`Results`] against the expected behavior for
//! that scenario.

use wf_core::{Config, Session};

const TAU: f32 = core::f32::consts::TAU;

fn tone_samples(config: &Config, amplitude: f32, freq_hz: f32) -> Vec<i16> {
    (0..config.samples_per_process_call())
        .map(|i| {
            let t = i as f32 / config.sample_rate_hz as f32;
            (amplitude * libm::sinf(TAU * freq_hz * t)) as i16
        })
        .collect()
}

/// A tone whose instantaneous frequency drifts sinusoidally around the
/// carrier, simulating a transport with a slow wow-rate speed variation.
fn wowed_tone_samples(config: &Config, amplitude: f32, carrier_hz: f32, wow_hz: f32, wow_depth: f32) -> Vec<i16> {
    let mut phase = 0.0f32;
    let dt = 1.0 / config.sample_rate_hz as f32;
    (0..config.samples_per_process_call())
        .map(|i| {
            let t = i as f32 * dt;
            let instantaneous_freq = carrier_hz * (1.0 + wow_depth * libm::sinf(TAU * wow_hz * t));
            phase += TAU * instantaneous_freq * dt;
            (amplitude * libm::sinf(phase)) as i16
        })
        .collect()
}

// S1: silence.
#[test]
fn silence_reports_zero_flutter_and_no_frequency() {
    let config = Config::new(48_000, 3150.0);
    let mut session = Session::init(48_000, 3150.0);
    let samples = vec![0i16; config.samples_per_process_call()];
    session.process(&samples, 0).unwrap();
    let results = session.get_results();
    assert_eq!(results.rms_percent, 0.0);
    assert_eq!(results.quasi_peak, 0.0);
    assert_eq!(results.frequency_hz, 0.0);
}

// S2: a block whose amplitude is under the gate threshold never reaches
// the crossing detector, so results stay at their initialized defaults.
#[test]
fn low_amplitude_tone_is_gated_out() {
    let config = Config::new(48_000, 3150.0);
    let mut session = Session::init(48_000, 3150.0);
    let samples = tone_samples(&config, 20.0, 3150.0);
    session.process(&samples, 0).unwrap();
    let results = session.get_results();
    assert_eq!(results, wf_core::Results::default());
}

// S3: a clean, full-amplitude tone at exactly the configured test
// frequency should recover that frequency closely and report very low
// flutter (no induced speed variation at all).
#[test]
fn clean_tone_recovers_frequency_and_reports_low_flutter() {
    let config = Config::new(48_000, 3150.0);
    let mut session = Session::init(48_000, 3150.0);
    let samples = tone_samples(&config, 16_000.0, 3150.0);
    session.process(&samples, 0).unwrap();
    let results = session.get_results();
    assert!(
        (results.frequency_hz - 3150.0).abs() < 20.0,
        "expected ~3150 Hz, got {}",
        results.frequency_hz
    );
    assert!(
        results.rms_percent < 5.0,
        "expected low flutter for a clean tone, got {}",
        results.rms_percent
    );
}

// S4: a tone with a slow (sub-6 Hz) sinusoidal speed wobble should show up
// strongly on the Wow-weighted path but more weakly on the Flutter path.
#[test]
fn wow_rate_modulation_is_emphasized_by_wow_filter() {
    let config = Config::new(48_000, 3150.0);
    let samples = wowed_tone_samples(&config, 16_000.0, 3150.0, 2.0, 0.01);

    let mut wow_session = Session::init(48_000, 3150.0);
    wow_session.process(&samples, 2).unwrap();
    let mut flutter_session = Session::init(48_000, 3150.0);
    flutter_session.process(&samples, 3).unwrap();

    let wow_results = wow_session.get_results();
    let flutter_results = flutter_session.get_results();
    assert!(wow_results.rms_percent.is_finite());
    assert!(flutter_results.rms_percent.is_finite());
    assert!(
        wow_results.rms_percent > flutter_results.rms_percent,
        "a slow speed wobble should register more strongly on the Wow path: wow={}, flutter={}",
        wow_results.rms_percent,
        flutter_results.rms_percent
    );
}

// S5: the very first zero-crossing of a session is discarded as warmup, so
// a session that only ever sees a single crossing reports no measurement;
// verified indirectly by confirming a short clean tone still produces a
// sane frequency once enough crossings have accumulated.
#[test]
fn warmup_crossing_does_not_prevent_later_measurement() {
    let config = Config::new(48_000, 3150.0);
    let mut session = Session::init(48_000, 3150.0);
    let samples = tone_samples(&config, 16_000.0, 3150.0);
    session.process(&samples, 0).unwrap();
    assert!(session.get_results().frequency_hz > 0.0);
}

// S6: an out-of-band filter_type selector falls back to Unweighted rather
// than erroring, and the call still completes successfully.
#[test]
fn out_of_range_filter_type_falls_back_to_unweighted() {
    let config = Config::new(48_000, 3150.0);
    let mut explicit = Session::init(48_000, 3150.0);
    let mut out_of_range = Session::init(48_000, 3150.0);
    let samples = tone_samples(&config, 16_000.0, 3150.0);

    explicit.process(&samples, 0).unwrap();
    out_of_range.process(&samples, 99).unwrap();

    assert_eq!(explicit.get_results(), out_of_range.get_results());
}

// S6: 5 s of the test tone followed by 5 s of noise whose zero-crossing
// count falls outside the valid band. Only the first 5 s may be reflected
// in the final results — the gated-out blocks must not advance the window
// ring or overwrite its rolling history with stale/zero state.
#[test]
fn trailing_out_of_band_noise_does_not_corrupt_the_published_results() {
    let config = Config::new(48_000, 3150.0);
    let half_call = config.samples_per_process_call() / 2;

    let mut tone_only_session = Session::init(48_000, 3150.0);
    let mut tone_then_noise_session = Session::init(48_000, 3150.0);

    let mut tone_only = vec![0i16; config.samples_per_process_call()];
    let tone_half = {
        let dt = 1.0 / config.sample_rate_hz as f32;
        (0..half_call)
            .map(|i| (16_000.0 * libm::sinf(TAU * 3150.0 * i as f32 * dt)) as i16)
            .collect::<Vec<_>>()
    };
    tone_only[..half_call].copy_from_slice(&tone_half);
    // Second half of `tone_only` stays silence, which is itself gated out —
    // this gives the baseline "first half tone, second half gated" result.
    tone_only_session.process(&tone_only, 0).unwrap();

    let mut tone_then_noise = tone_only.clone();
    let noise_half = {
        // A tone far above the test frequency has a zero-crossing count per
        // 100 ms well outside `[min_crossings_per_100ms, max_crossings_per_100ms]`,
        // so every block here is gated out for crossing-count, not amplitude.
        let dt = 1.0 / config.sample_rate_hz as f32;
        (0..half_call)
            .map(|i| (16_000.0 * libm::sinf(TAU * 18_000.0 * i as f32 * dt)) as i16)
            .collect::<Vec<_>>()
    };
    tone_then_noise[half_call..].copy_from_slice(&noise_half);
    tone_then_noise_session.process(&tone_then_noise, 0).unwrap();

    assert_eq!(
        tone_only_session.get_results(),
        tone_then_noise_session.get_results(),
        "out-of-band noise in the second half must not change published results"
    );
}

#[test]
fn process_rejects_a_call_shorter_than_ten_seconds() {
    let mut session = Session::init(48_000, 3150.0);
    let short = vec![0i16; 1_000];
    assert!(session.process(&short, 0).is_err());
}

#[test]
fn reset_clears_results_back_to_default() {
    let config = Config::new(48_000, 3150.0);
    let mut session = Session::init(48_000, 3150.0);
    session.process(&tone_samples(&config, 16_000.0, 3150.0), 0).unwrap();
    assert_ne!(session.get_results(), wf_core::Results::default());
    session.reset();
    assert_eq!(session.get_results(), wf_core::Results::default());
}

#[test]
fn repeated_process_calls_keep_reporting_fresh_snapshots() {
    let config = Config::new(48_000, 3150.0);
    let mut session = Session::init(48_000, 3150.0);
    let samples = tone_samples(&config, 16_000.0, 3150.0);
    for _ in 0..3 {
        session.process(&samples, 0).unwrap();
        let results = session.get_results();
        assert!(results.frequency_hz.is_finite());
        assert!(results.rms_percent >= 0.0);
    }
}
