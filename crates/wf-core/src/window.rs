//! Rolling 5-second window aggregator (§4.6, §3 `WindowRing`).
//!
//! Tracks per-100ms sum-of-squares for the current 1-second RMS, and keeps
//! a 50-slot rolling history (5 seconds at 100ms resolution) of per-second
//! RMS results and per-100ms quasi-peak maxima, publishing the maxima of
//! both at every 1-second boundary.

/// Three cyclically-indexed arrays plus their indices (§3 `WindowRing`).
#[derive(Debug, Clone, Copy)]
pub struct WindowRing {
    rms_1sec_sums: [f64; 10],
    max_rms_slots: [f32; 50],
    peak_slots: [f32; 50],
    idx_100ms: usize,
    idx_5sec: usize,
}

impl Default for WindowRing {
    fn default() -> Self {
        Self {
            rms_1sec_sums: [0.0; 10],
            max_rms_slots: [0.0; 50],
            peak_slots: [0.0; 50],
            idx_100ms: 0,
            idx_5sec: 0,
        }
    }
}

/// Published at a 1-second boundary: the rolling 5-second maxima.
#[derive(Debug, Clone, Copy)]
pub struct WindowPublication {
    /// `max(max_rms_slots)` over the rolling 5-second history.
    pub rms_percent: f32,
    /// `max(peak_slots)` over the rolling 5-second history.
    pub quasi_peak: f32,
}

impl WindowRing {
    /// Called once per 100 ms **valid** block. Appends the block's
    /// sum-of-squares and final quasi-peak value into the ring, and — on
    /// the 10th call since the last boundary — computes and publishes the
    /// 1-second RMS and scans the 5-second history for its maxima.
    ///
    /// `valid_count` is the crossing count accumulated over the just-closed
    /// 1-second window; it is read, not mutated, here (§3 `ErrorAccumulator`
    /// owns its own reset).
    pub fn end_of_100ms_block(
        &mut self,
        sum_of_squares_100ms: f64,
        valid_count: u32,
        quasi_peak: f32,
    ) -> Option<WindowPublication> {
        self.rms_1sec_sums[self.idx_100ms] = sum_of_squares_100ms;
        self.peak_slots[self.idx_5sec] = quasi_peak;
        self.idx_5sec = (self.idx_5sec + 1) % self.peak_slots.len();
        self.idx_100ms += 1;

        if self.idx_100ms < self.rms_1sec_sums.len() {
            return None;
        }
        self.idx_100ms = 0;

        let total_ss: f64 = self.rms_1sec_sums.iter().sum();
        let rms_percent = if valid_count > 0 {
            libm::sqrt(total_ss / f64::from(valid_count)) as f32 * 100.0
        } else {
            0.0
        };
        // §9 open question 1: deliberately reuses the post-increment
        // idx_5sec as the write position for the per-second RMS result,
        // sharing it with the per-100ms peak writes.
        self.max_rms_slots[self.idx_5sec] = rms_percent;

        let max_rms = self.max_rms_slots.iter().copied().fold(0.0f32, f32::max);
        let max_peak = self.peak_slots.iter().copied().fold(0.0f32, f32::max);
        Some(WindowPublication {
            rms_percent: max_rms,
            quasi_peak: max_peak,
        })
    }

    /// Zeroes every array and index. Used at `init` (§3 invariants).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_publication_before_ten_blocks() {
        let mut ring = WindowRing::default();
        for _ in 0..9 {
            assert!(ring.end_of_100ms_block(1.0, 10, 0.1).is_none());
        }
    }

    #[test]
    fn publishes_on_the_tenth_block() {
        let mut ring = WindowRing::default();
        let mut last = None;
        for _ in 0..10 {
            last = ring.end_of_100ms_block(0.01, 100, 0.1);
        }
        assert!(last.is_some());
    }

    #[test]
    fn zero_valid_count_does_not_produce_nan() {
        let mut ring = WindowRing::default();
        let mut publication = None;
        for _ in 0..10 {
            publication = ring.end_of_100ms_block(0.0, 0, 0.0);
        }
        let publication = publication.unwrap();
        assert_eq!(publication.rms_percent, 0.0);
        assert!(!publication.rms_percent.is_nan());
    }

    #[test]
    fn peak_history_survives_across_one_second_boundaries() {
        let mut ring = WindowRing::default();
        for i in 0..10 {
            let peak = if i == 3 { 5.0 } else { 0.0 };
            ring.end_of_100ms_block(0.0, 1, peak);
        }
        // A second second of quiet blocks: the peak from the first second
        // should still show up in the rolling 5-second maximum.
        let mut publication = None;
        for _ in 0..10 {
            publication = ring.end_of_100ms_block(0.0, 1, 0.0);
        }
        assert_eq!(publication.unwrap().quasi_peak, 5.0);
    }
}
