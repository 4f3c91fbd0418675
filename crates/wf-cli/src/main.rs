//! wf-cli - command-line front end for the wow-and-flutter measurement core.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wf")]
#[command(author, version, about = "Wow-and-flutter measurement CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure wow-and-flutter on a WAV recording of a test tone
    Measure(commands::measure::MeasureArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    tracing::debug!(command = ?std::mem::discriminant(&cli.command), "dispatching command");

    match cli.command {
        Commands::Measure(args) => commands::measure::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
