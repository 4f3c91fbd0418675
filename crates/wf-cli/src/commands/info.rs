//! Display WAV file metadata.

use clap::Args;
use wf_io::read_wav_info;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let duration_secs = info.num_frames as f64 / f64::from(info.sample_rate);

    println!("File:        {}", args.file.display());
    println!("Channels:    {}", info.channels);
    println!("Bit depth:   {}-bit", info.bits_per_sample);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!("Duration:    {duration_secs:.3}s ({} frames)", info.num_frames);

    Ok(())
}
