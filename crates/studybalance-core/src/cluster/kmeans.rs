//! Plain Lloyd k-means over fixed 6-dimensional feature vectors.
//!
//! The model is only ever fit on the six seed vectors, so this stays
//! deliberately small: random-restart Lloyd iteration with a seeded
//! PCG generator for reproducible builds.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::log::WeekFeatures;

/// A feature vector in `FEATURE_NAMES` order.
pub type FeatureVec = [f64; 6];

/// Result of a k-means fit: centroids plus within-cluster sum of squares.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub centroids: Vec<FeatureVec>,
    pub inertia: f64,
}

/// Squared Euclidean distance.
fn dist2(a: &FeatureVec, b: &FeatureVec) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the nearest centroid and the squared distance to it.
pub fn nearest(point: &FeatureVec, centroids: &[FeatureVec]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = dist2(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Fit k-means with `n_init` random restarts, keeping the lowest-inertia run.
///
/// Deterministic for a given `seed`. `data` must contain at least `k`
/// points.
pub fn fit(data: &[FeatureVec], k: usize, n_init: usize, seed: u64) -> KMeansFit {
    debug_assert!(data.len() >= k);
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);

    let mut best: Option<KMeansFit> = None;
    for _ in 0..n_init {
        let run = lloyd(data, k, &mut rng);
        if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }
    best.unwrap_or(KMeansFit {
        centroids: Vec::new(),
        inertia: 0.0,
    })
}

fn lloyd(data: &[FeatureVec], k: usize, rng: &mut Mcg128Xsl64) -> KMeansFit {
    let indices: Vec<usize> = (0..data.len()).collect();
    let mut centroids: Vec<FeatureVec> = indices
        .choose_multiple(rng, k)
        .map(|&i| data[i])
        .collect();

    let mut assignment = vec![usize::MAX; data.len()];
    for _ in 0..100 {
        let mut changed = false;
        let mut point_dist = vec![0.0; data.len()];
        for (i, point) in data.iter().enumerate() {
            let (c, d) = nearest(point, &centroids);
            point_dist[i] = d;
            if assignment[i] != c {
                assignment[i] = c;
                changed = true;
            }
        }

        for c in 0..k {
            let members: Vec<FeatureVec> = data
                .iter()
                .enumerate()
                .filter(|(i, _)| assignment[*i] == c)
                .map(|(_, p)| *p)
                .collect();
            if members.is_empty() {
                // Re-seed an empty cluster with the point farthest
                // from its assigned centroid.
                let far = point_dist
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                centroids[c] = data[far];
                continue;
            }
            for d in 0..6 {
                centroids[c][d] =
                    members.iter().map(|p| p[d]).sum::<f64>() / members.len() as f64;
            }
        }

        if !changed {
            break;
        }
    }

    let inertia = data.iter().map(|p| nearest(p, &centroids).1).sum();
    KMeansFit { centroids, inertia }
}

/// Standardization fit on a fixed sample, reused (never refit) afterwards.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: FeatureVec,
    std: FeatureVec,
}

impl StandardScaler {
    /// Fit per-feature mean and (population) standard deviation.
    /// Zero-variance features scale by 1.0.
    pub fn fit(data: &[FeatureVec]) -> Self {
        let n = data.len().max(1) as f64;
        let mut mean = [0.0; 6];
        let mut std = [0.0; 6];
        for d in 0..6 {
            mean[d] = data.iter().map(|p| p[d]).sum::<f64>() / n;
            let var = data.iter().map(|p| (p[d] - mean[d]).powi(2)).sum::<f64>() / n;
            std[d] = if var > 0.0 { var.sqrt() } else { 1.0 };
        }
        Self { mean, std }
    }

    pub fn transform(&self, v: &FeatureVec) -> FeatureVec {
        let mut out = [0.0; 6];
        for d in 0..6 {
            out[d] = (v[d] - self.mean[d]) / self.std[d];
        }
        out
    }

    pub fn inverse_transform(&self, v: &FeatureVec) -> FeatureVec {
        let mut out = [0.0; 6];
        for d in 0..6 {
            out[d] = v[d] * self.std[d] + self.mean[d];
        }
        out
    }

    pub fn transform_features(&self, f: &WeekFeatures) -> FeatureVec {
        self.transform(&f.as_array())
    }
}
