mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nimbus", about = "Sky image feature extraction tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the feature vector of one sky image
    Analyze(commands::analyze::AnalyzeArgs),
    /// Extract features of many images in parallel
    Batch(commands::batch::BatchArgs),
    /// Build the observation logging request for one image
    Record(commands::record::RecordArgs),
    /// Print or save the default pipeline config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Record(args) => commands::record::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
