use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use nimbus_core::consts::STATION_CAPTURE_SIZE;
use nimbus_core::features::FeatureVector;
use nimbus_core::io::image_io::{load_raster, save_edge_png, save_gray_png, save_lbp_png};
use nimbus_core::pipeline::config::{DegeneratePolicy, PipelineConfig};
use nimbus_core::pipeline::{analyze_raster, extract_features_from_path_reported, PipelineStage, ProgressReporter};

use crate::summary::{print_config_summary, print_features};

use super::load_config;

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Toml,
    Json,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input image (JPEG, PNG, ...)
    pub image: PathBuf,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Downsample ratio applied before analysis
    #[arg(long)]
    pub ratio: Option<f64>,

    /// Resize before downsampling; `--normalize` alone uses the station
    /// capture size, `--normalize=WIDTHxHEIGHT` a custom one
    #[arg(long, value_parser = parse_size, num_args = 0..=1, require_equals = true)]
    pub normalize: Option<Option<[u32; 2]>>,

    /// Report zero texture for frames too small for LBP instead of failing
    #[arg(long)]
    pub allow_degenerate: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the gray, edge and LBP maps as PNG into this directory
    #[arg(long)]
    pub dump_dir: Option<PathBuf>,
}

fn parse_size(s: &str) -> std::result::Result<[u32; 2], String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    Ok([w, h])
}

/// Drives a spinner from pipeline stage changes.
struct SpinnerReporter {
    pb: ProgressBar,
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.pb.set_message(stage.to_string());
        self.pb.tick();
    }
}

fn build_config(args: &AnalyzeArgs) -> Result<PipelineConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ratio) = args.ratio {
        config.preprocess.downsample_ratio = ratio;
    }
    if let Some(size) = args.normalize {
        config.preprocess.normalize_size = Some(size.unwrap_or(STATION_CAPTURE_SIZE));
    }
    if args.allow_degenerate {
        config.texture.degenerate = DegeneratePolicy::ZeroTexture;
    }
    config.validate()?;
    Ok(config)
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = build_config(args)?;

    let features = if let Some(ref dir) = args.dump_dir {
        let raster = load_raster(&args.image)
            .with_context(|| format!("Failed to load {}", args.image.display()))?;
        let analysis = analyze_raster(&raster, &config)?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        save_gray_png(&analysis.prepared.gray, &dir.join("gray.png"))?;
        save_edge_png(&analysis.edges, &dir.join("edges.png"))?;
        save_lbp_png(&analysis.lbp, &dir.join("lbp.png"))?;
        eprintln!("Intermediate maps saved to {}", dir.display());

        analysis.features
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        let reporter = Arc::new(SpinnerReporter { pb: pb.clone() });
        let result = extract_features_from_path_reported(&args.image, &config, reporter);
        pb.finish_and_clear();
        result.with_context(|| format!("Failed to analyze {}", args.image.display()))?
    };

    emit(args, &config, &features)
}

fn emit(args: &AnalyzeArgs, config: &PipelineConfig, features: &FeatureVector) -> Result<()> {
    match args.format {
        OutputFormat::Text => {
            print_config_summary(config);
            print_features(&args.image, features);
        }
        OutputFormat::Toml => print!("{}", toml::to_string_pretty(features)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(features)?),
    }
    Ok(())
}
