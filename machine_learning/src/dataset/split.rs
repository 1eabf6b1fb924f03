use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::Dataset;
use crate::{MlErr, Result};

/// Parameters of a train/test split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    train_ratio: f64,
    shuffle: bool,
    seed: u64,
}

impl SplitConfig {
    /// Creates a new split configuration.
    ///
    /// # Args
    /// * `train_ratio` - Fraction of the samples that go to the training set, in `[0, 1]`.
    /// * `shuffle` - Whether to permute the samples before splitting.
    /// * `seed` - Seed of the permutation, ignored when `shuffle` is false.
    ///
    /// # Returns
    /// A `SplitConfig` or an error if the ratio is out of range.
    pub fn new(train_ratio: f64, shuffle: bool, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&train_ratio) {
            return Err(MlErr::InvalidConfig {
                field: "train_ratio",
                reason: "must be between 0 and 1",
            });
        }

        Ok(Self {
            train_ratio,
            shuffle,
            seed,
        })
    }

    pub fn train_ratio(&self) -> f64 {
        self.train_ratio
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            shuffle: true,
            seed: 42,
        }
    }
}

/// Partitions the indices `0..len` into train and test indices.
///
/// The first `floor(len * train_ratio)` indices of the (optionally shuffled) sequence go to the
/// training set, the rest to the test set.
///
/// # Returns
/// A tuple of (train indices, test indices).
pub fn split_indices(len: usize, config: &SplitConfig) -> (Vec<usize>, Vec<usize>) {
    let num_train = (len as f64 * config.train_ratio) as usize;
    let mut indices: Vec<usize> = (0..len).collect();

    if config.shuffle {
        let mut rng = StdRng::seed_from_u64(config.seed);
        indices.shuffle(&mut rng);
    }

    let test = indices.split_off(num_train);
    (indices, test)
}

/// Splits a dataset into a training and a test dataset.
///
/// # Returns
/// A tuple of (train, test).
pub fn split(dataset: &Dataset, config: &SplitConfig) -> (Dataset, Dataset) {
    let (train, test) = split_indices(dataset.len(), config);
    (dataset.select(&train), dataset.select(&test))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn numbered(len: usize) -> Dataset {
        let rows: Vec<_> = (0..len).map(|i| vec![i as f64]).collect();
        let y = (0..len).map(|i| (i % 2) as f64).collect();
        Dataset::from_rows(&rows, y).unwrap()
    }

    #[test]
    fn sizes_follow_ratio() {
        let (train, test) = split_indices(10, &SplitConfig::new(0.75, true, 1).unwrap());
        assert_eq!(train.len(), 7);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn without_shuffle_keeps_order() {
        let config = SplitConfig::new(0.6, false, 0).unwrap();
        let (train, test) = split_indices(5, &config);

        assert_eq!(train, [0, 1, 2]);
        assert_eq!(test, [3, 4]);
    }

    #[test]
    fn shuffled_split_is_a_seeded_partition() {
        let config = SplitConfig::default();
        let (train, test) = split_indices(100, &config);

        let all: HashSet<_> = train.iter().chain(&test).copied().collect();
        assert_eq!(all.len(), 100);
        assert_eq!(train.len(), 80);
        assert_ne!(train, (0..80).collect::<Vec<_>>());
        assert_eq!(split_indices(100, &config), (train, test));
    }

    #[test]
    fn split_dataset_keeps_samples_paired() {
        let dataset = numbered(20);
        let (train, test) = split(&dataset, &SplitConfig::new(0.5, true, 9).unwrap());

        assert_eq!(train.len() + test.len(), 20);
        for part in [&train, &test] {
            for (x, y) in part.features().rows().into_iter().zip(part.labels()) {
                assert_eq!((x[0] as usize % 2) as f64, *y);
            }
        }
    }

    #[test]
    fn extreme_ratios() {
        let dataset = numbered(4);

        let (train, test) = split(&dataset, &SplitConfig::new(0.0, true, 0).unwrap());
        assert!(train.is_empty());
        assert_eq!(test.len(), 4);

        let (train, test) = split(&dataset, &SplitConfig::new(1.0, false, 0).unwrap());
        assert_eq!(train, dataset);
        assert!(test.is_empty());
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        assert!(SplitConfig::new(1.5, true, 0).is_err());
        assert!(SplitConfig::new(-0.1, true, 0).is_err());
        assert!(SplitConfig::new(f64::NAN, true, 0).is_err());
    }
}
