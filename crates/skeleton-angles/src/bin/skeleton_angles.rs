use std::path::PathBuf;

use clap::Parser;

use skeleton_angles::io::{load_rgb_image, load_segments_json, SegmentAngleConfig, SegmentAngleReport};
use skeleton_angles::{
    segment_angle_with_palette, Colormap, DebugContext, DebugMode, DebugParams, Outputs,
    PaletteParams,
};

/// Measure plant-skeleton segment angles and annotate the image.
#[derive(Parser, Debug)]
#[command(name = "skeleton-angles", version)]
struct Cli {
    /// JSON run configuration; other flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Segmented image to annotate.
    #[arg(long, required_unless_present = "config")]
    image: Option<String>,
    /// Segments as `[[[x, y], ...], ...]`.
    #[arg(long, required_unless_present = "config")]
    segments: Option<String>,
    /// Annotated image path.
    #[arg(long)]
    output: Option<String>,
    /// Measurement results JSON path.
    #[arg(long)]
    results: Option<String>,
    /// Optional run report JSON path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Debug mode: off, print or plot.
    #[arg(long)]
    debug: Option<DebugMode>,
    #[arg(long)]
    debug_outdir: Option<PathBuf>,
    /// Use the `jet` colormap instead of `rainbow`.
    #[arg(long)]
    jet: bool,
    /// Log per-segment details.
    #[arg(short, long)]
    verbose: bool,
    /// Emit tracing spans as JSON.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<SegmentAngleConfig, Box<dyn std::error::Error>> {
        let mut cfg = match &self.config {
            Some(path) => SegmentAngleConfig::load_json(path)?,
            None => SegmentAngleConfig {
                image_path: String::new(),
                segments_path: String::new(),
                output_path: None,
                results_path: None,
                debug: DebugParams::default(),
                palette: PaletteParams::default(),
            },
        };
        if let Some(image) = &self.image {
            cfg.image_path = image.clone();
        }
        if let Some(segments) = &self.segments {
            cfg.segments_path = segments.clone();
        }
        if self.output.is_some() {
            cfg.output_path = self.output.clone();
        }
        if self.results.is_some() {
            cfg.results_path = self.results.clone();
        }
        if let Some(mode) = self.debug {
            cfg.debug.debug = mode;
        }
        if let Some(dir) = &self.debug_outdir {
            cfg.debug.debug_outdir = dir.clone();
        }
        if self.jet {
            cfg.palette.colormap = Colormap::Jet;
        }
        Ok(cfg)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    skeleton_angles::core::init_tracing(cli.json_logs, cli.verbose);
    #[cfg(not(feature = "tracing"))]
    {
        use log::LevelFilter;
        let level = if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        skeleton_angles::core::init_with_level(level)?;
    }

    let cfg = cli.resolve_config()?;
    let img = load_rgb_image(&cfg.image_path)?;
    let segments = load_segments_json(&cfg.segments_path)?;
    log::info!(
        "loaded {}x{} image and {} segments",
        img.width(),
        img.height(),
        segments.len()
    );

    let mut store = Outputs::new();
    let mut debug = DebugContext::from_params(&cfg.debug);
    let mut report = SegmentAngleReport::new(&cfg, segments.len());
    let res = match segment_angle_with_palette(
        &img,
        &segments,
        &mut store,
        &mut debug,
        cfg.palette,
    ) {
        Ok(res) => {
            report.set_measurement(&res, &store);
            res
        }
        Err(err) => {
            report.set_error(&err);
            if let Some(path) = &cli.report {
                report.write_json(path)?;
                eprintln!("wrote failure report JSON to {}", path.display());
            }
            return Err(err.into());
        }
    };

    let output_path = cfg.output_path();
    res.labeled_img.save(&output_path)?;
    println!("wrote annotated image to {}", output_path.display());

    let results_path = cfg.results_path();
    store.save_json(&results_path)?;
    println!("wrote results JSON to {}", results_path.display());

    if let Some(path) = &cli.report {
        report.write_json(path)?;
        println!("wrote report JSON to {}", path.display());
    }

    for line in res.table.to_csv_lines() {
        println!("{line}");
    }
    Ok(())
}
