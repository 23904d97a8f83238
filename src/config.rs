use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Parameters of one palette extraction.
///
/// Defaults reproduce the classic 7 x 14 swatch board: 98 colors, ten
/// clustering passes, a 30-unit exclusion radius and a 240 near-white cutoff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Exact number of colors in the finished palette.
    pub n_colors: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Hard ceiling on clustering passes.
    pub max_iterations: usize,
    /// Pixels within this RGB distance of an accepted centroid are considered explained.
    pub similarity_radius: f32,
    /// Colors with every channel above this value are purged as filler.
    pub near_white_threshold: u8,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            n_colors: 98,
            grid_rows: 7,
            grid_cols: 14,
            max_iterations: 10,
            similarity_radius: 30.0,
            near_white_threshold: 240,
        }
    }
}

impl PaletteConfig {
    /// Config for an `rows x cols` grid with every other field at its default.
    pub fn with_grid(grid_rows: usize, grid_cols: usize) -> Self {
        Self {
            n_colors: grid_rows * grid_cols,
            grid_rows,
            grid_cols,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.n_colors == 0 {
            return Err(PaletteError::InvalidConfig("n_colors must be positive".into()));
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(PaletteError::InvalidConfig(
                "grid dimensions must be positive".into(),
            ));
        }
        if self.grid_rows.checked_mul(self.grid_cols) != Some(self.n_colors) {
            return Err(PaletteError::InvalidConfig(format!(
                "grid {}x{} does not hold {} colors",
                self.grid_rows, self.grid_cols, self.n_colors
            )));
        }
        if self.max_iterations == 0 {
            return Err(PaletteError::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }
        if !self.similarity_radius.is_finite() || self.similarity_radius < 0.0 {
            return Err(PaletteError::InvalidConfig(format!(
                "similarity_radius must be a non-negative number, got {}",
                self.similarity_radius
            )));
        }
        Ok(())
    }
}
