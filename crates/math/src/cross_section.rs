//! Cross-sectional bucketing and weighting.

use ndarray::Array1;
use polars::prelude::*;

use crate::MathError;

/// Value weight of each row within its partition.
///
/// `target / sum(target)` over the rows sharing the values of `over_cols`.
/// Nulls in `target` produce null weights and are left out of the sum.
///
/// # Arguments
/// * `target_col` - Size column (e.g. amount outstanding)
/// * `over_cols` - Columns defining each portfolio (e.g. date and decile)
///
/// # Returns
/// Polars expression for the weights.
pub fn value_weight_xsection(target_col: &str, over_cols: &[&str]) -> Expr {
    let partition: Vec<Expr> = over_cols.iter().map(|&c| col(c)).collect();
    col(target_col) / col(target_col).sum().over(partition)
}

/// Linearly interpolated quantile `k / n` of sorted data.
///
/// `sorted` must be non-empty and ascending, and `k <= n`. The position is
/// formed in integer arithmetic so exact order statistics stay exact.
fn interpolated_quantile(sorted: &[f64], k: usize, n: usize) -> f64 {
    let numerator = (sorted.len() - 1) * k;
    let lower = numerator / n;
    let position = numerator as f64 / n as f64;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Equal-population quantile bucketing of one cross-section.
///
/// Bucket edges are the linearly interpolated quantiles at `k / n_buckets`.
/// A value lands in the right-closed interval `(edge_k, edge_k+1]`, with the
/// lowest edge included in bucket 0, so the lowest value is always in
/// bucket 0 and equal values always share a bucket.
#[derive(Debug, Clone, Copy)]
pub struct QuantileBinner {
    n_buckets: usize,
}

impl QuantileBinner {
    /// Create a binner with `n_buckets` buckets.
    ///
    /// # Errors
    /// Returns `MathError::InvalidBucketCount` if fewer than two buckets are requested.
    pub const fn new(n_buckets: usize) -> Result<Self, MathError> {
        if n_buckets < 2 {
            return Err(MathError::InvalidBucketCount(n_buckets));
        }
        Ok(Self { n_buckets })
    }

    /// Number of buckets.
    #[must_use]
    pub const fn n_buckets(&self) -> usize {
        self.n_buckets
    }

    /// Bucket edges of a cross-section, `n_buckets + 1` values ascending.
    ///
    /// Returns `None` for empty input or input containing non-finite values.
    #[must_use]
    pub fn edges(&self, data: &Array1<f64>) -> Option<Vec<f64>> {
        if data.is_empty() || data.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(
            (0..=self.n_buckets)
                .map(|k| interpolated_quantile(&sorted, k, self.n_buckets))
                .collect(),
        )
    }

    /// Assign each value its zero-based bucket.
    ///
    /// Returns `None` when the cross-section cannot be split: empty input,
    /// non-finite values, or repeated bucket edges (too few distinct values).
    #[must_use]
    pub fn assign(&self, data: &Array1<f64>) -> Option<Vec<usize>> {
        let edges = self.edges(data)?;
        if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
            return None;
        }

        let interior = &edges[1..self.n_buckets];
        Some(data.iter().map(|&x| interior.iter().filter(|&&edge| edge < x).count()).collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    fn bucket_sizes(buckets: &[usize], n_buckets: usize) -> Vec<usize> {
        let mut sizes = vec![0; n_buckets];
        for &b in buckets {
            sizes[b] += 1;
        }
        sizes
    }

    #[test]
    fn twenty_values_two_per_decile() {
        let data: Array1<f64> = (0..20).map(f64::from).collect();
        let buckets = QuantileBinner::new(10).unwrap().assign(&data).unwrap();
        assert_eq!(bucket_sizes(&buckets, 10), vec![2; 10]);
        assert_eq!(buckets[0], 0);
        assert_eq!(buckets[19], 9);
    }

    #[rstest]
    #[case(10)]
    #[case(11)]
    #[case(25)]
    #[case(37)]
    #[case(100)]
    #[case(1013)]
    fn bucket_sizes_differ_by_at_most_one(#[case] n: usize) {
        // Distinct values in scrambled order
        let data: Array1<f64> = (0..n).map(|i| ((i * 7919) % n) as f64 * 0.001 - 0.2).collect();
        let buckets = QuantileBinner::new(10).unwrap().assign(&data).unwrap();
        let sizes = bucket_sizes(&buckets, 10);

        let max = *sizes.iter().max().unwrap();
        let min = *sizes.iter().min().unwrap();
        assert!(max - min <= 1, "sizes {sizes:?}");
        assert_eq!(sizes.iter().sum::<usize>(), n);
    }

    #[test]
    fn order_is_preserved_across_buckets() {
        let data = array![0.05, -0.01, 0.30, 0.12, 0.07, 0.02, 0.50, 0.09, 0.01, 0.20];
        let buckets = QuantileBinner::new(10).unwrap().assign(&data).unwrap();
        for i in 0..data.len() {
            for j in 0..data.len() {
                if data[i] < data[j] {
                    assert!(buckets[i] <= buckets[j]);
                }
            }
        }
        // Ten distinct values: one per bucket
        assert_eq!(bucket_sizes(&buckets, 10), vec![1; 10]);
    }

    #[test]
    fn too_few_distinct_values() {
        let binner = QuantileBinner::new(10).unwrap();
        assert!(binner.assign(&array![0.01, 0.01, 0.01, 0.02]).is_none());
        assert!(binner.assign(&Array1::from_elem(40, 0.01)).is_none());
        assert!(binner.assign(&array![]).is_none());
    }

    #[test]
    fn two_distinct_values_fill_the_extreme_buckets() {
        let buckets = QuantileBinner::new(10).unwrap().assign(&array![0.03, 0.01]).unwrap();
        assert_eq!(buckets, vec![9, 0]);
    }

    #[test]
    fn ties_share_a_bucket() {
        // Twelve distinct values plus a duplicated value
        let mut values: Vec<f64> = (0..12).map(f64::from).collect();
        values.push(5.0);
        let data = Array1::from_vec(values);

        let buckets = QuantileBinner::new(10).unwrap().assign(&data).unwrap();
        assert_eq!(buckets[5], buckets[12]);
    }

    #[test]
    fn non_finite_values_fail() {
        let binner = QuantileBinner::new(10).unwrap();
        let mut data: Array1<f64> = (0..20).map(f64::from).collect();
        data[3] = f64::NAN;
        assert!(binner.assign(&data).is_none());
    }

    #[test]
    fn edges_interpolate_linearly() {
        let data = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let edges = QuantileBinner::new(4).unwrap().edges(&data).unwrap();
        assert_eq!(edges.len(), 5);
        assert_relative_eq!(edges[1], 1.0, epsilon = 1e-12);

        let edges = QuantileBinner::new(10).unwrap().edges(&data).unwrap();
        assert_relative_eq!(edges[1], 0.4, epsilon = 1e-12);
        assert_relative_eq!(edges[10], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_bucket_count() {
        assert!(matches!(QuantileBinner::new(1), Err(MathError::InvalidBucketCount(1))));
    }

    #[test]
    fn value_weights_sum_to_one_per_group() {
        let df = df! {
            "date" => &[1, 1, 1, 2, 2],
            "decile" => &[11, 11, 12, 11, 11],
            "amount" => &[100.0, 300.0, 50.0, 1.0, 3.0],
        }
        .unwrap();

        let result = df
            .lazy()
            .with_column(value_weight_xsection("amount", &["date", "decile"]).alias("weight"))
            .collect()
            .unwrap();

        let weights: Vec<f64> =
            result.column("weight").unwrap().f64().unwrap().into_no_null_iter().collect();
        assert_relative_eq!(weights[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(weights[1], 0.75, epsilon = 1e-12);
        assert_relative_eq!(weights[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(weights[3] + weights[4], 1.0, epsilon = 1e-12);
    }
}
