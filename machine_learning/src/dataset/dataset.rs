use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// A labeled binary classification dataset: one row of features per sample and a label in
/// `{0, 1}` for each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Vec<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The features, one sample per row.
    /// * `y` - The labels, one per row of `x`.
    ///
    /// # Returns
    /// The dataset, or an error if the amount of labels doesn't match the amount of rows or a
    /// label is neither 0 nor 1.
    pub fn new(x: Array2<f64>, y: Vec<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if let Some((index, &value)) = y
            .iter()
            .enumerate()
            .find(|(_, y)| **y != 0.0 && **y != 1.0)
        {
            return Err(MlErr::InvalidLabel { index, value });
        }

        Ok(Self { x, y })
    }

    /// Creates a new `Dataset` from a list of feature vectors.
    ///
    /// # Arguments
    /// * `rows` - The feature vectors, all of the same length.
    /// * `y` - The labels, one per row.
    ///
    /// # Returns
    /// The dataset, or an error if the rows differ in length or the labels are invalid.
    pub fn from_rows(rows: &[Vec<f64>], y: Vec<f64>) -> Result<Self> {
        let num_features = rows.first().map_or(0, Vec::len);

        if let Some(row) = rows.iter().find(|row| row.len() != num_features) {
            return Err(MlErr::SizeMismatch {
                what: "feature vector",
                got: row.len(),
                expected: num_features,
            });
        }

        let x = Array2::from_shape_fn((rows.len(), num_features), |(i, j)| rows[i][j]);
        Self::new(x, y)
    }

    /// Builds a dataset whose labels are already known to be 0 or 1.
    pub(super) fn from_parts(x: Array2<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.nrows(), y.len());
        Self { x, y }
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns the amount of features per sample.
    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn labels(&self) -> &[f64] {
        &self.y
    }

    /// Fetches a sample by index.
    ///
    /// # Returns
    /// The sample's features and label, or `None` if `index` is out of bounds.
    pub fn get(&self, index: usize) -> Option<(ArrayView1<'_, f64>, f64)> {
        let y = *self.y.get(index)?;
        Some((self.x.row(index), y))
    }

    /// Copies the samples at `indices`, in that order, into a new dataset.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn from_rows_keeps_layout() {
        let dataset =
            Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]], vec![0.0, 1.0]).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.num_features(), 2);
        assert_eq!(dataset.features(), array![[1.0, 2.0], [3.0, 4.0]]);

        let (x, y) = dataset.get(1).unwrap();
        assert_eq!(x, array![3.0, 4.0]);
        assert_eq!(y, 1.0);
        assert!(dataset.get(2).is_none());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0]], vec![0.0, 1.0]).unwrap_err();

        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "feature vector",
                got: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let err = Dataset::new(array![[1.0], [2.0]], vec![1.0]).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { what: "labels", .. }));
    }

    #[test]
    fn rejects_non_binary_labels() {
        let err = Dataset::new(array![[1.0], [2.0]], vec![1.0, 0.5]).unwrap_err();
        assert_eq!(
            err,
            MlErr::InvalidLabel {
                index: 1,
                value: 0.5
            }
        );
    }

    #[test]
    fn select_reorders_samples() {
        let dataset =
            Dataset::from_rows(&[vec![0.0], vec![1.0], vec![2.0]], vec![0.0, 1.0, 0.0]).unwrap();
        let selected = dataset.select(&[2, 0]);

        assert_eq!(selected.features(), array![[2.0], [0.0]]);
        assert_eq!(selected.labels(), [0.0, 0.0]);
    }
}
