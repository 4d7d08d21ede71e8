//! Isolation Forest anomaly model.
//!
//! Random trees split random features at random thresholds; anomalies are isolated in
//! fewer splits. Every call to [`AnomalyDetector::fit_decision`] grows a fresh forest from
//! the configured seed, so identical batches score identically and nothing leaks between
//! requests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::ModelSettings;
use crate::ports::AnomalyDetector;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Clone)]
pub struct IsolationForest {
    settings: ModelSettings,
}

impl IsolationForest {
    pub fn new(settings: ModelSettings) -> Self {
        Self { settings }
    }

    /// Raw anomaly scores in [-1, 0); lower is more anomalous.
    fn score_samples(&self, samples: &[Vec<f64>]) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        let sample_size = self.settings.max_samples.clamp(1, samples.len());
        let height_limit = (sample_size.max(2) as f64).log2().ceil() as usize;

        let trees = (0..self.settings.estimators.max(1))
            .map(|_| {
                let indices =
                    rand::seq::index::sample(&mut rng, samples.len(), sample_size).into_vec();
                IsolationTree::grow(samples, indices, height_limit, &mut rng)
            })
            .collect::<Vec<_>>();

        let normalizer = average_path_length(sample_size);
        samples
            .iter()
            .map(|sample| {
                if normalizer <= 0.0 {
                    return -0.5;
                }
                let mean_depth = trees
                    .iter()
                    .map(|tree| tree.path_length(sample))
                    .sum::<f64>()
                    / trees.len() as f64;
                -(2f64).powf(-mean_depth / normalizer)
            })
            .collect()
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new(ModelSettings::default())
    }
}

impl AnomalyDetector for IsolationForest {
    fn fit_decision(&self, samples: &[Vec<f64>]) -> Vec<f64> {
        if samples.is_empty() {
            return Vec::new();
        }
        let scores = self.score_samples(samples);
        let offset = percentile(&scores, self.settings.contamination * 100.0);
        scores.into_iter().map(|score| score - offset).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug)]
struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    fn grow<R: Rng>(
        samples: &[Vec<f64>],
        indices: Vec<usize>,
        height_limit: usize,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(samples, indices, 0, height_limit, rng);
        tree
    }

    fn build<R: Rng>(
        &mut self,
        samples: &[Vec<f64>],
        indices: Vec<usize>,
        depth: usize,
        height_limit: usize,
        rng: &mut R,
    ) -> usize {
        let slot = self.nodes.len();
        self.nodes.push(Node::Leaf {
            size: indices.len(),
        });
        if depth >= height_limit || indices.len() <= 1 {
            return slot;
        }

        let dimensions = samples[indices[0]].len();
        let splittable = (0..dimensions)
            .filter_map(|feature| {
                let (min, max) = indices.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(min, max), &index| {
                        let value = samples[index][feature];
                        (min.min(value), max.max(value))
                    },
                );
                (max > min).then_some((feature, min, max))
            })
            .collect::<Vec<_>>();
        if splittable.is_empty() {
            return slot;
        }

        let (feature, min, max) = splittable[rng.gen_range(0..splittable.len())];
        let threshold = rng.gen_range(min..max);
        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&index| samples[index][feature] < threshold);
        let left = self.build(samples, left, depth + 1, height_limit, rng);
        let right = self.build(samples, right, depth + 1, height_limit, rng);
        self.nodes[slot] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        slot
    }

    fn path_length(&self, sample: &[f64]) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;
        loop {
            match self.nodes[node] {
                Node::Leaf { size } => return depth + average_path_length(size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[feature] < threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Expected path length of an unsuccessful search in a binary tree of `n` points.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile, `p` in [0, 100].
fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clustered_with_outlier() -> Vec<Vec<f64>> {
        let mut samples = (0..60)
            .map(|i| vec![(i % 10) as f64 * 0.05, (i / 10) as f64 * 0.05])
            .collect::<Vec<_>>();
        samples.push(vec![12.0, -9.0]);
        samples
    }

    #[test]
    fn outlier_gets_the_lowest_score() {
        let samples = clustered_with_outlier();
        let scores = IsolationForest::default().fit_decision(&samples);
        assert_eq!(scores.len(), samples.len());
        let outlier = scores[samples.len() - 1];
        assert!(scores[..samples.len() - 1].iter().all(|&score| score > outlier));
        assert!(outlier < 0.0);
    }

    #[test]
    fn same_seed_same_scores() {
        let samples = clustered_with_outlier();
        let forest = IsolationForest::default();
        assert_eq!(forest.fit_decision(&samples), forest.fit_decision(&samples));
    }

    #[test]
    fn identical_rows_score_identically() {
        let samples = vec![vec![0.0, 0.0]; 12];
        let scores = IsolationForest::default().fit_decision(&samples);
        assert!(scores.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn handles_tiny_batches() {
        let forest = IsolationForest::default();
        assert!(forest.fit_decision(&[]).is_empty());
        assert_eq!(forest.fit_decision(&[vec![1.0]]).len(), 1);
    }

    #[test]
    fn percentile_interpolates() {
        assert_eq!(percentile(&[4.0, 1.0, 3.0, 2.0], 0.0), 1.0);
        assert_eq!(percentile(&[4.0, 1.0, 3.0, 2.0], 100.0), 4.0);
        assert!((percentile(&[1.0, 2.0, 3.0, 4.0], 50.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn path_length_normalizer() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        assert!(average_path_length(256) > average_path_length(16));
    }
}
