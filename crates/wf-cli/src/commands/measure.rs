//! Run a wow-and-flutter measurement over a WAV file.

use clap::Args;
use wf_core::Session;
use wf_io::read_mono_pcm16;

/// Measure wow-and-flutter on a WAV recording of a test tone.
#[derive(Args)]
pub struct MeasureArgs {
    /// Path to the WAV file (mono, or stereo using the first channel)
    pub file: std::path::PathBuf,

    /// Test tone frequency, in Hz
    #[arg(short = 'f', long, default_value_t = 3150.0)]
    pub test_frequency_hz: f32,

    /// Weighting filter: unweighted, din, wow, flutter
    #[arg(short = 'w', long, default_value = "unweighted")]
    pub weighting: String,

    /// Print every 10-second window's snapshot rather than only the final one
    #[arg(long)]
    pub verbose: bool,
}

fn filter_type_from_name(name: &str) -> i32 {
    match name.to_ascii_lowercase().as_str() {
        "din" => 1,
        "wow" => 2,
        "flutter" => 3,
        _ => 0,
    }
}

/// Run the measure command.
pub fn run(args: MeasureArgs) -> anyhow::Result<()> {
    let (samples, sample_rate) = read_mono_pcm16(&args.file)?;
    let mut session = Session::init(sample_rate, args.test_frequency_hz);
    let filter_type = filter_type_from_name(&args.weighting);
    let block_len = wf_core::Config::new(sample_rate, args.test_frequency_hz).samples_per_process_call();

    tracing::info!(
        file = %args.file.display(),
        sample_rate,
        test_frequency_hz = args.test_frequency_hz,
        weighting = %args.weighting,
        "starting measurement"
    );

    if samples.len() < block_len {
        anyhow::bail!(
            "recording is too short: got {} samples, need at least {} (10 s at {} Hz)",
            samples.len(),
            block_len,
            sample_rate
        );
    }

    let mut results = wf_core::Results::default();
    for block in samples.chunks_exact(block_len) {
        session.process(block, filter_type)?;
        results = session.get_results();
        if args.verbose {
            println!(
                "rms={:.4}%  quasi_peak={:.4}  frequency={:.2} Hz",
                results.rms_percent, results.quasi_peak, results.frequency_hz
            );
        }
    }

    println!("--- final measurement ---");
    println!("RMS flutter:   {:.4}%", results.rms_percent);
    println!("Quasi-peak:    {:.4}", results.quasi_peak);
    println!("Frequency:     {:.2} Hz", results.frequency_hz);

    Ok(())
}
