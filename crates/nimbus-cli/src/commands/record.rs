use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use nimbus_core::pipeline::extract_features_from_path;
use nimbus_core::record::{ObservationRecord, SensorReadings};

use super::load_config;

#[derive(Args)]
pub struct RecordArgs {
    /// Captured sky image
    pub image: PathBuf,

    /// Observation label sent as ID (defaults to the file name)
    #[arg(long)]
    pub label: Option<String>,

    /// Air temperature in degrees Celsius
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Relative humidity in percent
    #[arg(long)]
    pub humidity: Option<f64>,

    /// Raw rain sensor reading
    #[arg(long)]
    pub rain: Option<u16>,

    /// Logging endpoint; without it only the query string is printed
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &RecordArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let features = extract_features_from_path(&args.image, &config)
        .with_context(|| format!("Failed to analyze {}", args.image.display()))?;

    let label = match args.label {
        Some(ref label) => label.clone(),
        None => args
            .image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("No file name in {}", args.image.display()))?,
    };
    let readings = SensorReadings::new(args.temperature, args.humidity, args.rain);
    let record = ObservationRecord::new(label, readings, features);

    match args.endpoint {
        Some(ref endpoint) => println!("{}", record.request_url(endpoint)),
        None => println!("{}", record.query_string()),
    }
    Ok(())
}
