use palette::Srgb;
use rand::Rng;
use tracing::debug;

use crate::color::{FILLER, Pixel, is_near_white};

/// A uniformly random color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Pixel {
    Srgb::new(rng.random(), rng.random(), rng.random())
}

/// Turn the raw centroid list into exactly `n_colors` entries.
///
/// Short lists are first padded with [`FILLER`] and long ones truncated in
/// discovery order. Near-white entries (padding included) are then purged and
/// the gaps backfilled with random colors drawn from `rng`. Backfilled colors
/// are not checked again, so an unlucky draw may itself be near-white.
pub fn assemble<R: Rng + ?Sized>(
    mut centroids: Vec<Pixel>,
    n_colors: usize,
    near_white_threshold: u8,
    rng: &mut R,
) -> Vec<Pixel> {
    let padded = n_colors.saturating_sub(centroids.len());
    centroids.resize(n_colors, FILLER);

    centroids.retain(|&c| !is_near_white(c, near_white_threshold));
    let backfilled = n_colors - centroids.len();
    while centroids.len() < n_colors {
        centroids.push(random_color(rng));
    }

    debug!(n_colors, padded, backfilled, "palette assembled");
    centroids
}
