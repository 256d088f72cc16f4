use std::path::Path;

use console::Style;
use nimbus_core::features::FeatureVector;
use nimbus_core::pipeline::config::PipelineConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_config_summary(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Nimbus Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!("  {}", s.header.apply_to("Preprocessing"));
    match config.preprocess.normalize_size {
        Some([w, h]) => println!(
            "    {:<12}{}",
            s.label.apply_to("Normalize"),
            s.value.apply_to(format!("{w}x{h}"))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Normalize"),
            s.disabled.apply_to("off")
        ),
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Downsample"),
        s.value.apply_to(config.preprocess.downsample_ratio)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Filter"),
        s.method.apply_to(config.preprocess.filter)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Hue"),
        s.method.apply_to(config.preprocess.hue_scale)
    );
    println!();

    println!("  {}", s.header.apply_to("Analysis"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Canny"),
        s.value.apply_to(format!(
            "{} / {}",
            config.edges.low_threshold, config.edges.high_threshold
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Small frame"),
        s.method.apply_to(config.texture.degenerate)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Cloud above"),
        s.value.apply_to(config.coverage.brightness_threshold)
    );
    println!();
}

pub fn print_features(image: &Path, features: &FeatureVector) {
    let s = Styles::new();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(image.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Edges"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Count"),
        s.value.apply_to(features.edge_count)
    );
    println!();

    println!("  {}", s.header.apply_to("LBP Texture"));
    for (label, value) in [
        ("Mean", features.lbp_mean),
        ("Std dev", features.lbp_stddev),
        ("Entropy", features.lbp_entropy),
    ] {
        println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.value.apply_to(format!("{value:.4}"))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Color (HSV)"));
    for (label, value) in [
        ("Hue", features.hue_mean),
        ("Saturation", features.saturation_mean),
        ("Value", features.value_mean),
    ] {
        println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.value.apply_to(format!("{value:.2}"))
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.header.apply_to("Cloud cover"),
        s.value.apply_to(format!("{:.2}%", features.cloud_percentage))
    );
    println!();
}
