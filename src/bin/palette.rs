use clap::Parser;
use std::fs;
use std::path::PathBuf;
use cluster_palette::image_input::DEFAULT_WORKING_SIDE;
use cluster_palette::render::{encode_png, render_swatches};
use cluster_palette::{PaletteConfig, extract_from_bytes};
use anyhow::Context;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Extract hue-grouped color palettes from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Rows in the palette grid
    #[arg(short, long, default_value_t = 7)]
    rows: usize,

    /// Columns in the palette grid
    #[arg(short, long, default_value_t = 14)]
    cols: usize,

    /// Maximum clustering passes
    #[arg(short = 'i', long, default_value_t = 10)]
    max_iterations: usize,

    /// RGB distance under which pixels count as explained by a centroid
    #[arg(long, default_value_t = 30.0)]
    radius: f32,

    /// Channel value above which a color is treated as near-white filler
    #[arg(long, default_value_t = 240)]
    white_threshold: u8,

    /// Working size (square side) images are resized to; 0 keeps the original
    #[arg(long, default_value_t = DEFAULT_WORKING_SIDE)]
    resize: u32,

    /// Seed for the backfill colors (omit for a fresh palette each run)
    #[arg(long)]
    seed: Option<u64>,

    /// Write a swatch PNG per input into this directory
    #[arg(short = 'd', long)]
    swatch_dir: Option<PathBuf>,

    /// Swatch cell size in pixels
    #[arg(long, default_value_t = 64)]
    cell: u32,

    /// Print JSON instead of a hex table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = PaletteConfig {
        n_colors: args.rows * args.cols,
        grid_rows: args.rows,
        grid_cols: args.cols,
        max_iterations: args.max_iterations,
        similarity_radius: args.radius,
        near_white_threshold: args.white_threshold,
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let grid = extract_from_bytes(&bytes, config.clone(), args.resize, args.seed)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if args.json {
            let out = serde_json::json!({
                "input": input.display().to_string(),
                "config": &config,
                "grid": grid.to_hex_rows(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{}:", input.display());
            for row in grid.to_hex_rows() {
                println!("  {}", row.join(" "));
            }
        }

        if let Some(dir) = &args.swatch_dir {
            fs::create_dir_all(dir)?;
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let out_path = dir.join(format!("{stem}_palette.png"));
            let png = encode_png(&render_swatches(&grid, args.cell)?)?;
            fs::write(&out_path, png)?;
            tracing::info!(path = %out_path.display(), "swatches written");
        }
    }

    Ok(())
}
