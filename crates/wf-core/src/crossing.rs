//! Sub-sample-accurate zero-crossing detector (§4.3).
//!
//! Consumes the isolator's filtered output one sample at a time and emits
//! inter-crossing intervals, in nanoseconds, with linear interpolation
//! between the last two filtered samples straddling a sign change.

/// What happened when a sample was pushed through the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossingEvent {
    /// No zero-crossing on this sample; accumulation continues silently.
    None,
    /// The session's one-time warmup crossing: discarded to let the
    /// isolator's initial transient settle (§4.3, fires exactly once).
    Warmup,
    /// A completed inter-crossing interval, in nanoseconds.
    Interval(f64),
}

/// Per-session crossing-detector state (§3 `CrossingState`).
#[derive(Debug, Clone, Copy)]
pub struct CrossingState {
    previous_filtered: i32,
    accumulating_interval_ns: f64,
    carry_remainder_ns: f64,
    warmup: bool,
}

impl Default for CrossingState {
    fn default() -> Self {
        Self {
            previous_filtered: 0,
            accumulating_interval_ns: 0.0,
            carry_remainder_ns: 0.0,
            warmup: true,
        }
    }
}

impl CrossingState {
    /// Feeds one filtered (floating-point) sample through the detector.
    ///
    /// `ns_per_sample` is [`crate::config::Config::nanoseconds_per_sample`].
    pub fn push_sample(&mut self, filtered: f32, ns_per_sample: f64) -> CrossingEvent {
        // Truncate toward zero (§4.3 step 2) — `as` on float-to-int casts
        // in Rust already truncate toward zero.
        let current = filtered.trunc() as i32;
        let previous = self.previous_filtered;

        let mut is_crossing = false;
        if (current > 0 && previous < 0) || (current < 0 && previous > 0) {
            let mut denom = f64::from(current - previous);
            if denom.abs() < 1e-9 {
                denom = if denom < 0.0 { -1e-9 } else { 1e-9 };
            }
            let crossing_offset_ns = -f64::from(previous) * ns_per_sample / denom;
            self.accumulating_interval_ns += crossing_offset_ns;
            self.carry_remainder_ns = ns_per_sample - crossing_offset_ns;
            is_crossing = true;
        } else {
            self.accumulating_interval_ns += ns_per_sample;
        }

        // Exact-zero overrides the remainder computed above (§4.3 step 4).
        if current == 0 {
            self.carry_remainder_ns = 0.0;
            is_crossing = true;
        }

        self.previous_filtered = current;

        if !is_crossing {
            return CrossingEvent::None;
        }

        if self.warmup {
            self.warmup = false;
            self.accumulating_interval_ns = self.carry_remainder_ns;
            return CrossingEvent::Warmup;
        }

        let interval_ns = self.accumulating_interval_ns;
        self.accumulating_interval_ns = self.carry_remainder_ns;
        CrossingEvent::Interval(interval_ns)
    }

    /// Resets to a fresh session's initial state, including re-arming the
    /// one-time warmup discard.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
