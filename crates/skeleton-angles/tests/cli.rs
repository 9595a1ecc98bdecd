#![cfg(feature = "cli")]

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use skeleton_angles::io::{write_segments_json, SegmentAngleReport};
use skeleton_angles::{Outputs, Segment};

#[test]
fn cli_writes_image_results_and_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("segmented.png");
    let segments_path = dir.path().join("segments.json");
    let output_path = dir.path().join("labeled.png");
    let results_path = dir.path().join("results.json");
    let debug_dir = dir.path().join("debug");

    RgbImage::from_pixel(40, 40, Rgb([10, 10, 10]))
        .save(&image_path)
        .expect("save input");
    write_segments_json(
        &segments_path,
        &[
            Segment::from_xy(&[(0, 5), (5, 5), (10, 5)]),
            Segment::from_xy(&[(20, 20), (21, 21), (22, 22)]),
        ],
    )
    .expect("write segments");

    Command::cargo_bin("skeleton-angles")
        .expect("binary")
        .arg("--image")
        .arg(&image_path)
        .arg("--segments")
        .arg(&segments_path)
        .arg("--output")
        .arg(&output_path)
        .arg("--results")
        .arg(&results_path)
        .arg("--debug")
        .arg("print")
        .arg("--debug-outdir")
        .arg(&debug_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("HEADER_ANGLE,ID0,ID1"))
        .stdout(predicate::str::contains("ANGLE_DATA,0,"));

    let labeled = image::open(&output_path).expect("labeled").to_rgb8();
    assert_eq!(labeled.dimensions(), (40, 40));
    assert!(debug_dir.join("1_segmented_angles.png").exists());

    let results = Outputs::load_json(&results_path).expect("results");
    let json = serde_json::to_value(&results).expect("json");
    assert_eq!(json["morphology_data"]["segment_angles"][0], serde_json::json!(0.0));
}

#[test]
fn cli_fails_on_empty_segment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("segmented.png");
    let segments_path = dir.path().join("segments.json");
    RgbImage::new(8, 8).save(&image_path).expect("save input");
    std::fs::write(&segments_path, "[[[1, 1]], []]").expect("write segments");

    Command::cargo_bin("skeleton-angles")
        .expect("binary")
        .current_dir(dir.path())
        .arg("--image")
        .arg(&image_path)
        .arg("--segments")
        .arg(&segments_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("EmptySegment { index: 1 }"));
    assert!(!dir.path().join("segmented_angles.png").exists());
}

#[test]
fn cli_writes_failure_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("segmented.png");
    let segments_path = dir.path().join("segments.json");
    let report_path = dir.path().join("report.json");
    RgbImage::new(8, 8).save(&image_path).expect("save input");
    std::fs::write(&segments_path, "[[[1, 1]], []]").expect("write segments");

    Command::cargo_bin("skeleton-angles")
        .expect("binary")
        .current_dir(dir.path())
        .arg("--image")
        .arg(&image_path)
        .arg("--segments")
        .arg(&segments_path)
        .arg("--report")
        .arg(&report_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrote failure report JSON"));

    let report = SegmentAngleReport::load_json(&report_path).expect("report");
    assert_eq!(report.num_segments, 2);
    assert_eq!(report.error.as_deref(), Some("segment 1 has no points"));
    assert!(report.table.is_none());
    assert!(report.results.is_none());
}

#[test]
fn cli_report_carries_table_on_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("segmented.png");
    let segments_path = dir.path().join("segments.json");
    let report_path = dir.path().join("report.json");
    RgbImage::new(16, 16).save(&image_path).expect("save input");
    write_segments_json(&segments_path, &[Segment::from_xy(&[(0, 0), (1, 1), (2, 2)])])
        .expect("write segments");

    Command::cargo_bin("skeleton-angles")
        .expect("binary")
        .current_dir(dir.path())
        .arg("--image")
        .arg(&image_path)
        .arg("--segments")
        .arg(&segments_path)
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success();

    let report = SegmentAngleReport::load_json(&report_path).expect("report");
    assert!(report.error.is_none());
    let table = report.table.expect("table");
    assert_eq!(table.header(), ["HEADER_ANGLE", "ID0"]);
    assert_eq!(report.results.expect("results").measurements.len(), 1);
}

#[cfg(not(feature = "tracing"))]
#[test]
fn cli_verbose_logs_segment_details() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("segmented.png");
    let segments_path = dir.path().join("segments.json");
    RgbImage::new(16, 16).save(&image_path).expect("save input");
    write_segments_json(&segments_path, &[Segment::from_xy(&[(0, 5), (5, 5), (10, 5)])])
        .expect("write segments");

    let run = |verbose: bool| {
        let mut cmd = Command::cargo_bin("skeleton-angles").expect("binary");
        cmd.current_dir(dir.path())
            .arg("--image")
            .arg(&image_path)
            .arg("--segments")
            .arg(&segments_path);
        if verbose {
            cmd.arg("--verbose");
        }
        cmd.assert().success()
    };

    run(true).stderr(predicate::str::contains("segment 0:"));
    run(false).stderr(predicate::str::contains("segment 0:").not());
}
