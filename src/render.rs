use image::{ImageFormat, Rgb, RgbImage};

use crate::error::PaletteError;
use crate::layout::Grid;

/// Paint the grid as `cell x cell` squares, one per palette entry.
pub fn render_swatches(grid: &Grid, cell: u32) -> Result<RgbImage, PaletteError> {
    let cell = cell.max(1);
    let width = u32::try_from(grid.cols())
        .ok()
        .and_then(|c| c.checked_mul(cell))
        .ok_or_else(|| PaletteError::Render("swatch image too wide".into()))?;
    let height = u32::try_from(grid.rows())
        .ok()
        .and_then(|r| r.checked_mul(cell))
        .ok_or_else(|| PaletteError::Render("swatch image too tall".into()))?;

    let mut img = RgbImage::new(width, height);
    for (row, colors) in grid.iter_rows().enumerate() {
        for (col, color) in colors.iter().enumerate() {
            let x0 = col as u32 * cell;
            let y0 = row as u32 * cell;
            for y in y0..y0 + cell {
                for x in x0..x0 + cell {
                    img.put_pixel(x, y, Rgb([color.red, color.green, color.blue]));
                }
            }
        }
    }
    Ok(img)
}

/// PNG-encode a rendered swatch board.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, PaletteError> {
    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| PaletteError::Render(format!("PNG encode error: {e}")))?;
    }
    Ok(buf)
}
