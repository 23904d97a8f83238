//! Iterative cluster discovery.
//!
//! Each pass partitions whatever pixels are still unexplained, accepts the
//! resulting centroids and then drops every pixel that sits within the
//! similarity radius of one of them. Dominant colors are therefore found once
//! and the following passes are free to pick up the smaller hue families.

use std::collections::HashSet;

use kmeans_colors::get_kmeans;
use palette::Srgb;
use tracing::{debug, warn};

use crate::color::{Pixel, distance_sq};
use crate::error::PartitionError;

/// `kmeans_colors` indexes clusters with a `u8`.
const MAX_CLUSTERS: usize = u8::MAX as usize + 1;

/// Anything that can split a point set into `k` centroids.
pub trait Partitioner {
    /// Return at most `k` centroids for `points`. Callers guarantee
    /// `0 < k <= points.len()`; implementations reject anything else.
    fn partition(&self, points: &[Pixel], k: usize) -> Result<Vec<Pixel>, PartitionError>;
}

/// k-means in RGB space backed by `kmeans_colors`.
#[derive(Clone, Debug)]
pub struct KMeansPartitioner {
    pub max_iter: usize,
    pub converge: f32,
    /// Independent restarts; the lowest-score run wins.
    pub runs: u64,
    pub seed: u64,
}

impl Default for KMeansPartitioner {
    fn default() -> Self {
        Self {
            max_iter: 20,
            converge: 1e-4,
            runs: 3,
            seed: 42,
        }
    }
}

impl Partitioner for KMeansPartitioner {
    fn partition(&self, points: &[Pixel], k: usize) -> Result<Vec<Pixel>, PartitionError> {
        if k == 0 || k > points.len() {
            return Err(PartitionError::InvalidClusterCount {
                k,
                points: points.len(),
            });
        }
        // k-means++ seeding needs a non-zero distance for every extra centroid,
        // so never ask for more clusters than there are distinct colors. Larger
        // requests are capped at what the backend can index; later passes pick
        // up the rest.
        let distinct = points
            .iter()
            .map(|p| p.into_components())
            .collect::<HashSet<_>>()
            .len();
        let k = k.min(distinct).min(MAX_CLUSTERS);

        let buf: Vec<Srgb> = points.iter().map(|p| p.into_format::<f32>()).collect();
        let best = (0..self.runs.max(1))
            .map(|run| get_kmeans(k, self.max_iter, self.converge, false, &buf, self.seed.wrapping_add(run)))
            .min_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(PartitionError::Degenerate)?;

        let centroids: Vec<Pixel> = best
            .centroids
            .iter()
            .filter(|c| c.red.is_finite() && c.green.is_finite() && c.blue.is_finite())
            .map(|c| c.into_format::<u8>())
            .collect();

        if centroids.is_empty() {
            return Err(PartitionError::Degenerate);
        }
        Ok(centroids)
    }
}

/// Remove every pixel whose nearest centroid is within `radius`.
///
/// Returns the number of pixels removed. Survivors keep their relative order.
/// A negative radius is treated as zero, so only exact matches are removed.
pub fn exclude_explained(pixel_set: &mut Vec<Pixel>, centroids: &[Pixel], radius: f32) -> usize {
    if centroids.is_empty() {
        return 0;
    }
    let radius = radius.max(0.0);
    let radius_sq = radius * radius;
    let before = pixel_set.len();
    pixel_set.retain(|&p| {
        let nearest = centroids
            .iter()
            .map(|&c| distance_sq(p, c))
            .min()
            .unwrap_or(u32::MAX);
        nearest as f32 > radius_sq
    });
    before - pixel_set.len()
}

/// Discover up to `target` centroids from `pixel_set`.
///
/// The pixel set is consumed: it shrinks with every pass and is dropped when
/// the call returns. Fewer than `target` centroids is a normal outcome (small
/// or flat images, exhausted iteration budget, a failed partition pass); the
/// assembler pads the rest.
pub fn extract_centroids<P: Partitioner + ?Sized>(
    partitioner: &P,
    mut pixel_set: Vec<Pixel>,
    target: usize,
    max_iterations: usize,
    similarity_radius: f32,
) -> Vec<Pixel> {
    let mut collected: Vec<Pixel> = Vec::with_capacity(target);

    for iteration in 0..max_iterations {
        if collected.len() >= target || pixel_set.is_empty() {
            break;
        }
        let k = (target - collected.len()).min(pixel_set.len());

        let centroids = match partitioner.partition(&pixel_set, k) {
            Ok(centroids) => centroids,
            Err(err) => {
                warn!(iteration, k, error = %err, "partition pass failed, leaving remaining slots to padding");
                break;
            }
        };

        let before = collected.len();
        for &centroid in centroids.iter().take(k) {
            if !collected.contains(&centroid) {
                collected.push(centroid);
            }
        }
        let accepted = collected.len() - before;
        let removed = exclude_explained(&mut pixel_set, &centroids, similarity_radius);

        debug!(
            iteration,
            k,
            accepted,
            removed,
            remaining = pixel_set.len(),
            "clustering pass"
        );

        if accepted == 0 && removed == 0 {
            // Same input next pass would give the same answer.
            break;
        }
    }

    collected
}
