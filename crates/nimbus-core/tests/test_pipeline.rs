mod common;

use std::sync::{Arc, Mutex};

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use nimbus_core::error::NimbusError;
use nimbus_core::frame::{ChannelLayout, GrayFrame, HsvFrame, RasterImage};
use nimbus_core::pipeline::config::{DegeneratePolicy, PipelineConfig};
use nimbus_core::pipeline::{
    analyze_frames, analyze_raster, extract_batch, extract_batch_with_progress, extract_features,
    extract_features_from_bytes, extract_features_from_path, extract_features_reported, PipelineStage,
    ProgressReporter,
};
use nimbus_core::preprocess::preprocess;

use common::{
    checkerboard_raster, encode_png, native_size_config, noisy_sky, noisy_sky_rgb, uniform_gray, uniform_rgb,
};

#[test]
fn test_repeated_runs_are_bit_identical() {
    let raster = noisy_sky(120, 90, 42);
    let config = PipelineConfig::default();
    let a = extract_features(&raster, &config).unwrap();
    let b = extract_features(&raster, &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.lbp_entropy.to_bits(), b.lbp_entropy.to_bits());
}

#[test]
fn test_descriptors_stay_in_range() {
    let raster = noisy_sky(150, 100, 1);
    let config = PipelineConfig::default();
    let analysis = analyze_raster(&raster, &config).unwrap();
    let f = analysis.features;

    // 150 x 100 at 0.4 -> 60 x 40.
    assert_eq!(analysis.prepared.gray.data.dim(), (40, 60));
    assert_eq!(analysis.prepared.hsv.width(), 60);
    assert_eq!(analysis.lbp.data.dim(), (40, 60));

    assert!(f.edge_count <= 60 * 40);
    assert!((0.0..=100.0).contains(&f.cloud_percentage));
    assert!((0.0..=255.0).contains(&f.hue_mean));
    assert!((0.0..=255.0).contains(&f.saturation_mean));
    assert!((0.0..=255.0).contains(&f.value_mean));
    assert!(f.lbp_stddev >= 0.0);
    assert!(f.lbp_entropy >= 0.0);
    assert!(f.lbp_mean >= 0.0 && f.lbp_mean <= 255.0);
}

#[test]
fn test_lbp_border_is_zero_after_full_pipeline() {
    let analysis = analyze_raster(&noisy_sky(80, 55, 9), &PipelineConfig::default()).unwrap();
    let lbp = &analysis.lbp.data;
    let (h, w) = lbp.dim();
    assert!(lbp.row(0).iter().all(|&v| v == 0));
    assert!(lbp.row(h - 1).iter().all(|&v| v == 0));
    assert!(lbp.column(0).iter().all(|&v| v == 0));
    assert!(lbp.column(w - 1).iter().all(|&v| v == 0));
}

#[test]
fn test_uniform_gray_scene_below_threshold() {
    let f = extract_features(&uniform_rgb(30, 20, [128, 128, 128]), &PipelineConfig::default()).unwrap();
    assert_eq!(f.edge_count, 0);
    assert_eq!(f.lbp_mean, 0.0);
    assert_eq!(f.lbp_stddev, 0.0);
    assert_eq!(f.lbp_entropy, 0.0);
    assert_eq!(f.cloud_percentage, 0.0);
    assert_abs_diff_eq!(f.hue_mean, 0.0);
    assert_abs_diff_eq!(f.saturation_mean, 0.0);
    assert_abs_diff_eq!(f.value_mean, 128.0);
}

#[test]
fn test_uniform_bright_scene_is_fully_cloudy() {
    let f = extract_features(&uniform_gray(25, 25, 230), &native_size_config()).unwrap();
    assert_eq!(f.edge_count, 0);
    assert_eq!(f.lbp_mean, 0.0);
    assert_eq!(f.lbp_entropy, 0.0);
    assert_eq!(f.cloud_percentage, 100.0);
    assert_abs_diff_eq!(f.value_mean, 230.0);
}

#[test]
fn test_checkerboard_at_native_size() {
    let f = extract_features(&checkerboard_raster(6, 6), &native_size_config()).unwrap();
    assert_abs_diff_eq!(f.lbp_mean, 20.0, epsilon = 1e-12);
    assert_abs_diff_eq!(f.lbp_stddev, 1400f64.sqrt(), epsilon = 1e-9);
    assert_abs_diff_eq!(f.cloud_percentage, 50.0, epsilon = 1e-12);
    assert_abs_diff_eq!(f.value_mean, 127.5, epsilon = 1e-12);
    assert!(f.edge_count <= 36);
}

#[test]
fn test_rgb_and_bgr_buffers_describe_the_same_frame() {
    let (w, h) = (64, 48);
    let rgb = noisy_sky_rgb(w, h, 17);
    let bgr: Vec<u8> = rgb.chunks_exact(3).flat_map(|p| [p[2], p[1], p[0]]).collect();

    let a = RasterImage::from_interleaved(w, h, ChannelLayout::Rgb, &rgb).unwrap();
    let b = RasterImage::from_interleaved(w, h, ChannelLayout::Bgr, &bgr).unwrap();
    let config = PipelineConfig::default();
    assert_eq!(extract_features(&a, &config).unwrap(), extract_features(&b, &config).unwrap());
}

#[test]
fn test_gray_descriptors_ignore_color_representation() {
    // A gray raster and an r = g = b color raster share their grayscale.
    let (w, h) = (40, 30);
    let levels: Vec<u8> = noisy_sky_rgb(w, h, 23).chunks_exact(3).map(|p| p[1]).collect();
    let color: Vec<u8> = levels.iter().flat_map(|&v| [v, v, v]).collect();

    let gray = RasterImage::from_interleaved(w, h, ChannelLayout::Gray, &levels).unwrap();
    let rgb = RasterImage::from_interleaved(w, h, ChannelLayout::Rgb, &color).unwrap();
    let config = native_size_config();
    let a = extract_features(&gray, &config).unwrap();
    let b = extract_features(&rgb, &config).unwrap();

    assert_eq!(a.edge_count, b.edge_count);
    assert_eq!(a.lbp_mean, b.lbp_mean);
    assert_eq!(a.lbp_stddev, b.lbp_stddev);
    assert_eq!(a.lbp_entropy, b.lbp_entropy);
    assert_eq!(a.cloud_percentage, b.cloud_percentage);
}

#[test]
fn test_analyze_frames_matches_full_run() {
    let raster = noisy_sky(70, 50, 31);
    let config = PipelineConfig::default();
    let prepared = preprocess(&raster, &config.preprocess).unwrap();
    let from_frames = analyze_frames(&prepared.gray, &prepared.hsv, &config).unwrap();
    assert_eq!(from_frames, extract_features(&raster, &config).unwrap());
}

#[test]
fn test_degenerate_frame_rejected_by_default() {
    // 5 x 5 at 0.4 -> 2 x 2.
    let err = extract_features(&uniform_gray(5, 5, 90), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, NimbusError::DegenerateInput { width: 2, height: 2 }));
    assert!(!err.is_load_error());
}

#[test]
fn test_degenerate_frame_zero_texture() {
    let mut config = PipelineConfig::default();
    config.texture.degenerate = DegeneratePolicy::ZeroTexture;
    let f = extract_features(&uniform_gray(5, 5, 240), &config).unwrap();
    assert_eq!(f.lbp_mean, 0.0);
    assert_eq!(f.lbp_stddev, 0.0);
    assert_eq!(f.lbp_entropy, 0.0);
    assert_eq!(f.edge_count, 0);
    assert_eq!(f.cloud_percentage, 100.0);
}

#[test]
fn test_single_pixel_fails_to_downsample() {
    let err = extract_features(&uniform_gray(1, 1, 10), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, NimbusError::InvalidDimensions { .. }));
    assert!(err.is_load_error());
}

#[test]
fn test_undecodable_bytes_are_a_load_error() {
    let err = extract_features_from_bytes(b"definitely not an image", &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, NimbusError::ImageLoad(_)));
    assert!(err.is_load_error());
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_features_from_path(&dir.path().join("missing.jpg"), &PipelineConfig::default()).unwrap_err();
    assert!(err.is_load_error());
}

#[test]
fn test_bytes_and_path_agree() {
    let (w, h) = (90, 60);
    let png = encode_png(w, h, noisy_sky_rgb(w, h, 77));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sky.png");
    std::fs::write(&path, &png).unwrap();

    let config = PipelineConfig::default();
    let from_bytes = extract_features_from_bytes(&png, &config).unwrap();
    let from_path = extract_features_from_path(&path, &config).unwrap();
    let from_raster = extract_features(&noisy_sky(w, h, 77), &config).unwrap();
    assert_eq!(from_bytes, from_path);
    assert_eq!(from_bytes, from_raster);
}

#[test]
fn test_invalid_config_is_rejected_before_work() {
    let mut config = PipelineConfig::default();
    config.edges.low_threshold = 250.0;
    let err = extract_features(&noisy_sky(20, 20, 2), &config).unwrap_err();
    assert!(matches!(err, NimbusError::InvalidConfig(_)));
}

#[test]
fn test_frames_of_different_shape_are_rejected() {
    let gray = GrayFrame::new(Array2::from_elem((10, 10), 10));
    let hsv = HsvFrame {
        hue: Array2::from_elem((3, 7), 10),
        saturation: Array2::from_elem((3, 7), 10),
        value: Array2::from_elem((5, 2), 10),
    };
    let err = analyze_frames(&gray, &hsv, &PipelineConfig::default()).unwrap_err();
    assert!(
        matches!(
            err,
            NimbusError::FrameShapeMismatch {
                gray: (10, 10),
                hue: (3, 7),
                value: (5, 2),
                ..
            }
        ),
        "got: {err}"
    );
    assert!(!err.is_load_error());
}

#[test]
fn test_single_hsv_plane_off_by_one_is_rejected() {
    let gray = GrayFrame::new(Array2::from_elem((8, 8), 50));
    let hsv = HsvFrame {
        hue: Array2::zeros((8, 8)),
        saturation: Array2::zeros((8, 9)),
        value: Array2::from_elem((8, 8), 50),
    };
    let err = analyze_frames(&gray, &hsv, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, NimbusError::FrameShapeMismatch { .. }), "got: {err}");
}

#[test]
fn test_normalized_capture_size() {
    let mut config = PipelineConfig::default();
    config.preprocess.normalize_size = Some([256, 256]);
    let analysis = analyze_raster(&noisy_sky(400, 300, 4), &config).unwrap();
    assert_eq!(analysis.prepared.gray.data.dim(), (102, 102));
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.stages.lock().unwrap().push(stage);
    }
}

#[test]
fn test_reporter_sees_every_stage_in_order() {
    let reporter = Arc::new(RecordingReporter::default());
    extract_features_reported(&noisy_sky(40, 40, 6), &PipelineConfig::default(), reporter.clone()).unwrap();
    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            PipelineStage::Preprocessing,
            PipelineStage::EdgeDetection,
            PipelineStage::Texture,
            PipelineStage::ColorStatistics,
            PipelineStage::CloudCoverage,
            PipelineStage::Aggregating,
        ]
    );
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = dir.path().join("a.png");
    let good_b = dir.path().join("b.png");
    std::fs::write(&good_a, encode_png(50, 40, noisy_sky_rgb(50, 40, 1))).unwrap();
    std::fs::write(&good_b, encode_png(50, 40, noisy_sky_rgb(50, 40, 2))).unwrap();
    let missing = dir.path().join("missing.png");

    let paths = vec![good_a.clone(), missing.clone(), good_b.clone()];
    let items = extract_batch(&paths, &PipelineConfig::default());

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].path, good_a);
    assert_eq!(items[1].path, missing);
    assert_eq!(items[2].path, good_b);
    assert!(items[0].result.is_ok());
    assert!(items[1].result.is_err());
    assert!(items[2].result.is_ok());

    let single = extract_features_from_path(&good_b, &PipelineConfig::default()).unwrap();
    assert_eq!(items[2].result.as_ref().unwrap(), &single);
}

#[test]
fn test_batch_progress_counts_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<_> = (0..4)
        .map(|i| {
            let p = dir.path().join(format!("f{i}.png"));
            std::fs::write(&p, encode_png(30, 30, noisy_sky_rgb(30, 30, i))).unwrap();
            p
        })
        .collect();

    let max_seen = std::sync::atomic::AtomicUsize::new(0);
    let items = extract_batch_with_progress(&paths, &PipelineConfig::default(), |done| {
        max_seen.fetch_max(done, std::sync::atomic::Ordering::Relaxed);
    });
    assert_eq!(items.len(), 4);
    assert_eq!(max_seen.into_inner(), 4);
}
