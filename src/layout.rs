//! Hue-banded grid layout.
//!
//! Colors are sorted by `(hue, saturation)` and poured into the grid column by
//! column, so each column holds a run of neighbouring hues.

use std::cmp::Ordering;

use crate::color::{Pixel, to_hex, to_hsv};
use crate::error::PaletteError;

/// Row-major `rows x cols` arrangement of a palette.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Pixel>,
}

impl Grid {
    /// Build a grid from colors that are already in display order, filling
    /// columns first.
    pub fn from_column_major(
        colors: &[Pixel],
        rows: usize,
        cols: usize,
    ) -> Result<Self, PaletteError> {
        if rows.checked_mul(cols) != Some(colors.len()) {
            return Err(PaletteError::InvalidConfig(format!(
                "{} colors cannot fill a {rows}x{cols} grid",
                colors.len()
            )));
        }
        let mut cells = Vec::with_capacity(colors.len());
        for row in 0..rows {
            for col in 0..cols {
                cells.push(colors[col * rows + row]);
            }
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Iterate the grid one row at a time.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Flatten column by column; this is the hue-sorted order.
    pub fn column_major(&self) -> Vec<Pixel> {
        let mut out = Vec::with_capacity(self.cells.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                out.push(self.cells[row * self.cols + col]);
            }
        }
        out
    }

    /// Hex strings, one inner `Vec` per row.
    pub fn to_hex_rows(&self) -> Vec<Vec<String>> {
        self.iter_rows()
            .map(|row| row.iter().map(|&c| to_hex(c)).collect())
            .collect()
    }
}

fn compare_hue_saturation(a: &(f32, f32, f32), b: &(f32, f32, f32)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1))
}

/// Stable sort by hue, then saturation. Value is ignored, so colors equal on
/// both keys keep their incoming order.
pub fn sort_by_hue_saturation(colors: &mut Vec<Pixel>) {
    let mut keyed: Vec<((f32, f32, f32), Pixel)> =
        colors.drain(..).map(|c| (to_hsv(c), c)).collect();
    keyed.sort_by(|a, b| compare_hue_saturation(&a.0, &b.0));
    colors.extend(keyed.into_iter().map(|(_, c)| c));
}

/// Sort `colors` and arrange them into a `grid_rows x grid_cols` grid with
/// similar hues stacked in the same column.
pub fn layout(
    mut colors: Vec<Pixel>,
    grid_rows: usize,
    grid_cols: usize,
) -> Result<Grid, PaletteError> {
    if grid_rows.checked_mul(grid_cols) != Some(colors.len()) {
        return Err(PaletteError::InvalidConfig(format!(
            "{} colors cannot fill a {grid_rows}x{grid_cols} grid",
            colors.len()
        )));
    }
    sort_by_hue_saturation(&mut colors);
    Grid::from_column_major(&colors, grid_rows, grid_cols)
}
