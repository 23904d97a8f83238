use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::assemble::assemble;
use crate::cluster::{KMeansPartitioner, Partitioner, extract_centroids};
use crate::color::Pixel;
use crate::config::PaletteConfig;
use crate::error::PaletteError;
use crate::layout::{Grid, layout};

/// Full extraction: cluster discovery, assembly and grid layout.
pub struct PaletteExtractor<P = KMeansPartitioner> {
    config: PaletteConfig,
    partitioner: P,
}

impl PaletteExtractor<KMeansPartitioner> {
    /// Extractor using the default k-means backend. Fails on invalid config.
    pub fn new(config: PaletteConfig) -> Result<Self, PaletteError> {
        Self::with_partitioner(config, KMeansPartitioner::default())
    }
}

impl<P: Partitioner> PaletteExtractor<P> {
    pub fn with_partitioner(config: PaletteConfig, partitioner: P) -> Result<Self, PaletteError> {
        config.validate()?;
        Ok(Self {
            config,
            partitioner,
        })
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Extract a palette grid from `pixels`. Backfilled colors come from `rng`,
    /// so the result is only reproducible with a seeded source.
    pub fn extract<R: Rng + ?Sized>(
        &self,
        pixels: &[Pixel],
        rng: &mut R,
    ) -> Result<Grid, PaletteError> {
        if pixels.is_empty() {
            return Err(PaletteError::EmptyImage);
        }
        let config = &self.config;

        let centroids = extract_centroids(
            &self.partitioner,
            pixels.to_vec(),
            config.n_colors,
            config.max_iterations,
            config.similarity_radius,
        );
        debug!(found = centroids.len(), wanted = config.n_colors, "centroids collected");

        let colors = assemble(centroids, config.n_colors, config.near_white_threshold, rng);
        let grid = layout(colors, config.grid_rows, config.grid_cols)?;

        info!(
            pixels = pixels.len(),
            rows = grid.rows(),
            cols = grid.cols(),
            "palette extracted"
        );
        Ok(grid)
    }

    /// [`extract`](Self::extract) with a fixed seed for the backfill source.
    pub fn extract_seeded(&self, pixels: &[Pixel], seed: u64) -> Result<Grid, PaletteError> {
        self.extract(pixels, &mut StdRng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    #[test]
    fn test_new_validates_before_extraction() {
        let config = PaletteConfig {
            n_colors: 4,
            grid_rows: 3,
            grid_cols: 2,
            ..PaletteConfig::default()
        };
        assert!(matches!(
            PaletteExtractor::new(config),
            Err(PaletteError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let extractor = PaletteExtractor::new(PaletteConfig::with_grid(2, 2)).unwrap();
        assert!(matches!(
            extractor.extract_seeded(&[], 1),
            Err(PaletteError::EmptyImage)
        ));
    }

    #[test]
    fn test_seeded_extraction_is_reproducible() {
        let extractor = PaletteExtractor::new(PaletteConfig::with_grid(2, 3)).unwrap();
        let mut pixels = vec![Srgb::new(200, 30, 30); 40];
        pixels.extend(vec![Srgb::new(30, 30, 200); 40]);

        let a = extractor.extract_seeded(&pixels, 5).unwrap();
        let b = extractor.extract_seeded(&pixels, 5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }
}
