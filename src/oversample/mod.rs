//! Synthetic minority oversampling (SMOTE).
//!
//! Implements SMOTE (Chawla et al., 2002): synthetic minority-class samples
//! are created by interpolating between a real minority sample and one of
//! its k nearest minority neighbors, until every class matches the majority
//! class count.
//!
//! # References
//!
//! Chawla, N. V., Bowyer, K. W., Hall, L. O., & Kegelmeyer, W. P. (2002).
//! SMOTE: Synthetic Minority Over-sampling Technique. JAIR 16.

use crate::error::{IctusError, Result};
use crate::primitives::Matrix;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// SMOTE oversampler.
///
/// Balances a labeled dataset by synthesizing minority-class rows. Only the
/// training split should ever be resampled; evaluation data must stay as
/// drawn.
///
/// # Example
///
/// ```
/// use ictus::oversample::Smote;
/// use ictus::primitives::Matrix;
///
/// let x = Matrix::from_vec(6, 1, vec![0.0, 0.1, 0.2, 0.3, 10.0, 10.5]).expect("valid matrix dimensions");
/// let y = vec![0, 0, 0, 0, 1, 1];
///
/// let smote = Smote::new().with_random_state(42);
/// let (x_res, y_res) = smote.fit_resample(&x, &y).expect("resample should succeed");
/// assert_eq!(y_res.iter().filter(|&&l| l == 1).count(), 4);
/// assert_eq!(x_res.n_rows(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Smote {
    k_neighbors: usize,
    random_state: Option<u64>,
}

impl Default for Smote {
    fn default() -> Self {
        Self::new()
    }
}

impl Smote {
    /// Creates a SMOTE oversampler with k = 5 neighbors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            k_neighbors: 5,
            random_state: None,
        }
    }

    /// Sets the number of nearest neighbors considered per synthesis.
    ///
    /// The effective k is capped at minority_count - 1 during resampling.
    #[must_use]
    pub fn with_k_neighbors(mut self, k_neighbors: usize) -> Self {
        self.k_neighbors = k_neighbors;
        self
    }

    /// Sets the random seed for reproducible synthesis.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Resamples the dataset so every class matches the majority count.
    ///
    /// The original rows are returned unchanged (same order) with the
    /// synthetic rows appended after them.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions disagree, the dataset is empty,
    /// `k_neighbors` is zero, or a minority class has fewer than two
    /// members (interpolation needs a neighbor).
    pub fn fit_resample(&self, x: &Matrix<f32>, y: &[usize]) -> Result<(Matrix<f32>, Vec<usize>)> {
        let (n_samples, n_features) = x.shape();
        if n_samples != y.len() {
            return Err(IctusError::dimension_mismatch(
                "rows",
                n_samples,
                y.len(),
            ));
        }
        if n_samples == 0 {
            return Err(IctusError::empty_input("fit_resample"));
        }
        if self.k_neighbors == 0 {
            return Err(IctusError::InvalidHyperparameter {
                param: "k_neighbors".to_string(),
                value: "0".to_string(),
                constraint: ">0".to_string(),
            });
        }

        let mut pools: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (idx, &label) in y.iter().enumerate() {
            pools.entry(label).or_default().push(idx);
        }
        let majority = pools.values().map(Vec::len).max().unwrap_or(0);

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut synthetic_data: Vec<f32> = Vec::new();
        let mut synthetic_labels: Vec<usize> = Vec::new();

        for (&label, pool) in &pools {
            let deficit = majority - pool.len();
            if deficit == 0 {
                continue;
            }
            if pool.len() < 2 {
                return Err(IctusError::data(format!(
                    "class {label} has {} sample(s), need at least 2 to synthesize neighbors",
                    pool.len()
                )));
            }

            let k = self.k_neighbors.min(pool.len() - 1);
            let neighbors = nearest_neighbors(x, pool, k);
            let base_dist = Uniform::from(0..pool.len());
            let neighbor_dist = Uniform::from(0..k);

            for _ in 0..deficit {
                let base_pos = base_dist.sample(&mut rng);
                let neighbor_pos = neighbors[base_pos][neighbor_dist.sample(&mut rng)];
                let gap: f32 = rng.gen();

                let base = x.row_slice(pool[base_pos]);
                let neighbor = x.row_slice(neighbor_pos);
                for j in 0..n_features {
                    synthetic_data.push(base[j] + gap * (neighbor[j] - base[j]));
                }
                synthetic_labels.push(label);
            }
        }

        if synthetic_labels.is_empty() {
            return Ok((x.clone(), y.to_vec()));
        }

        let synthetic = Matrix::from_vec(synthetic_labels.len(), n_features, synthetic_data)
            .map_err(IctusError::from)?;
        let x_resampled = Matrix::vstack(&[x, &synthetic]).map_err(IctusError::from)?;
        let mut y_resampled = y.to_vec();
        y_resampled.extend_from_slice(&synthetic_labels);

        Ok((x_resampled, y_resampled))
    }
}

/// For each pool member, the sample indices of its k nearest pool neighbors
/// (Euclidean, self excluded), nearest first.
fn nearest_neighbors(x: &Matrix<f32>, pool: &[usize], k: usize) -> Vec<Vec<usize>> {
    pool.iter()
        .map(|&i| {
            let mut others: Vec<(f32, usize)> = pool
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| (squared_distance(x.row_slice(i), x.row_slice(j)), j))
                .collect();
            others.sort_by(|a, b| a.0.total_cmp(&b.0));
            others.truncate(k);
            others.into_iter().map(|(_, j)| j).collect()
        })
        .collect()
}

/// Squared Euclidean distance between two rows.
fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| (ai - bi) * (ai - bi))
        .sum()
}

#[cfg(test)]
#[path = "smote_tests.rs"]
mod tests;
