use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use nimbus_core::pipeline::extract_batch_with_progress;

use super::load_config;

#[derive(Args)]
pub struct BatchArgs {
    /// Input images
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;

    let total = args.images.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Analyzing images");

    let items = extract_batch_with_progress(&args.images, &config, |done| pb.set_position(done as u64));
    pb.finish_with_message("Done");

    println!(
        "\n{:<32} {:>7} {:>8} {:>8} {:>10} {:>6} {:>6} {:>6} {:>7}",
        "Image", "Edges", "LBP mu", "LBP sd", "LBP ent", "Hue", "Sat", "Val", "Cloud%"
    );
    println!("{}", "-".repeat(100));

    let mut failed = 0;
    for item in &items {
        let name = item
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| item.path.display().to_string());
        match &item.result {
            Ok(f) => println!(
                "{:<32} {:>7} {:>8.2} {:>8.2} {:>10.2} {:>6.1} {:>6.1} {:>6.1} {:>7.2}",
                name,
                f.edge_count,
                f.lbp_mean,
                f.lbp_stddev,
                f.lbp_entropy,
                f.hue_mean,
                f.saturation_mean,
                f.value_mean,
                f.cloud_percentage
            ),
            Err(e) => {
                failed += 1;
                println!("{:<32} error: {}", name, e);
            }
        }
    }

    println!("\n{} of {} images analyzed", total - failed, total);
    if failed == total {
        bail!("No image could be analyzed");
    }
    Ok(())
}
