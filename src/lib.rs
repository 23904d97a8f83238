use wasm_bindgen::prelude::*;
use js_sys::{Array, Object, Reflect};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod assemble;
pub mod cluster;
pub mod color;
pub mod config;
pub mod error;
pub mod image_input;
pub mod layout;
pub mod pipeline;
pub mod render;

pub use cluster::{KMeansPartitioner, Partitioner, extract_centroids};
pub use color::{Pixel, to_hsv, to_rgb};
pub use config::PaletteConfig;
pub use error::{PaletteError, PartitionError};
pub use layout::{Grid, layout};
pub use pipeline::PaletteExtractor;

/// Decode `input`, squash it to the working size and extract a palette grid.
///
/// `seed` fixes the random source used to backfill purged entries; without it
/// every call may return a different palette.
pub fn extract_from_bytes(
    input: &[u8],
    config: PaletteConfig,
    working_side: u32,
    seed: Option<u64>,
) -> Result<Grid, PaletteError> {
    // Validate before touching the pixels.
    let extractor = PaletteExtractor::new(config)?;
    let pixels = image_input::load_pixels(input, working_side)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    extractor.extract(&pixels, &mut rng)
}

// ------------------------------------------------------------
// WASM surface
// ------------------------------------------------------------

/// Extract a `grid_rows x grid_cols` palette from an encoded image.
///
/// Returns `{ rows, cols, grid }` where `grid` is an array of rows, each an
/// array of `RRGGBB` hex strings. Pass a `seed` for a reproducible palette.
#[wasm_bindgen]
pub fn extract_palette(
    input: Vec<u8>,
    grid_rows: usize,
    grid_cols: usize,
    max_iterations: Option<usize>,
    seed: Option<u64>,
) -> Result<Object, JsValue> {
    let mut config = PaletteConfig::with_grid(grid_rows, grid_cols);
    if let Some(max_iterations) = max_iterations {
        config.max_iterations = max_iterations;
    }

    let grid = extract_from_bytes(&input, config, image_input::DEFAULT_WORKING_SIDE, seed)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let rows_js = Array::new();
    for row in grid.to_hex_rows() {
        let row_js = Array::new();
        for hex in row {
            row_js.push(&JsValue::from_str(&hex));
        }
        rows_js.push(&row_js);
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("rows"), &JsValue::from(grid.rows() as u32))?;
    Reflect::set(&result, &JsValue::from_str("cols"), &JsValue::from(grid.cols() as u32))?;
    Reflect::set(&result, &JsValue::from_str("grid"), &rows_js)?;

    Ok(result)
}
