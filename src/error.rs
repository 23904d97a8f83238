use thiserror::Error;

/// Errors that abort a palette extraction call.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Configuration rejected before any pixel was read.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The pixel buffer handed to the extractor had no pixels.
    #[error("image contains no pixels")]
    EmptyImage,
    /// Image bytes could not be decoded.
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// Swatch image could not be assembled from the grid.
    #[error("unable to render swatches: {0}")]
    Render(String),
}

/// Failure of a single partitioning pass.
///
/// The cluster engine treats these as recoverable: it stops clustering and
/// leaves the remaining slots to the assembler.
#[derive(Debug, Error, PartialEq)]
pub enum PartitionError {
    /// Asked for zero clusters, or more clusters than there are points.
    #[error("cannot split {points} points into {k} clusters")]
    InvalidClusterCount { k: usize, points: usize },
    /// The backend returned no usable centroids.
    #[error("partitioning produced no usable centroids")]
    Degenerate,
}
