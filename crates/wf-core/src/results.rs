//! Published measurement snapshot (§3 `Results`).

/// The three measurements the core publishes, snapshot-updated at every
/// 1-second boundary (§4.6). Zero before the first boundary is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Results {
    /// Rolling 5-second maximum of the per-second RMS flutter, in percent.
    pub rms_percent: f32,
    /// Rolling 5-second maximum of the quasi-peak envelope.
    pub quasi_peak: f32,
    /// Whole-call average measured tone frequency, in Hz.
    pub frequency_hz: f32,
}
