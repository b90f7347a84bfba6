//! Integration tests for borderline-linalg.

#[cfg(test)]
mod integration_tests {
    use crate::dense_matrix::DenseMatrix;
    use crate::diagonalize::{simultaneously_diagonalize, DiagonalizationConfig};
    use crate::sparse_matrix::CsrMatrix;
    use crate::srref::{lt_normalize, srref, Tolerance};
    use proptest::prelude::*;

    fn small_matrix() -> impl Strategy<Value = CsrMatrix> {
        (1usize..5, 1usize..6).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(-4i32..5, cols), rows).prop_map(|rows| {
                let dense: Vec<Vec<f64>> = rows
                    .into_iter()
                    .map(|r| r.into_iter().map(f64::from).collect())
                    .collect();
                CsrMatrix::from_dense(&dense)
            })
        })
    }

    fn stack(a: &CsrMatrix, b: &CsrMatrix) -> CsrMatrix {
        let mut rows = a.to_dense();
        rows.extend(b.to_dense());
        CsrMatrix::from_dense(&rows)
    }

    proptest! {
        #[test]
        fn srref_is_reduced(m in small_matrix()) {
            let red = srref(&m, &Tolerance::default()).unwrap();

            prop_assert!(red.pivots.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(red.matrix.num_rows(), red.rank());
            let dense = red.matrix.to_dense();
            for (i, &p) in red.pivots.iter().enumerate() {
                prop_assert_eq!(red.matrix.leading_col(i), Some(p));
                prop_assert_eq!(dense[i][p], 1.0);
                for (j, row) in dense.iter().enumerate().filter(|&(j, _)| j != i) {
                    prop_assert_eq!(row[p], 0.0, "row {} has an entry in pivot column {}", j, p);
                }
            }
        }

        #[test]
        fn srref_preserves_row_space(m in small_matrix()) {
            let tol = Tolerance::default();
            let red = srref(&m, &tol).unwrap();

            // Adding the original rows must not increase the rank.
            let joint = srref(&stack(&red.matrix, &m), &tol).unwrap();
            prop_assert_eq!(joint.rank(), red.rank());
        }

        #[test]
        fn srref_is_idempotent(m in small_matrix()) {
            let tol = Tolerance::default();
            let once = srref(&m, &tol).unwrap();
            let twice = srref(&once.matrix, &tol).unwrap();

            prop_assert_eq!(&once.pivots, &twice.pivots);
            for (a, b) in once.matrix.to_dense().iter().flatten().zip(twice.matrix.to_dense().iter().flatten()) {
                prop_assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_lt_normalize_after_srref_is_identity() {
        let m = CsrMatrix::from_dense(&[vec![3.0, 6.0, 0.0], vec![0.0, 2.0, 4.0]]);
        let red = srref(&m, &Tolerance::default()).unwrap();

        assert_eq!(lt_normalize(&red.matrix).unwrap(), red.matrix);
    }

    #[test]
    fn test_srref_handles_wide_sparse_rows() {
        // Shifted copies of x - 1 over 2000 columns: a bidiagonal system of
        // full rank whose reduced form is dense only in the last column.
        let n = 2000;
        let mut triplets = Vec::new();
        for r in 0..n - 1 {
            triplets.push((r, r, 1.0));
            triplets.push((r, r + 1, -1.0));
        }
        let m = CsrMatrix::from_triplets(n - 1, n, &triplets);
        let red = srref(&m, &Tolerance::default()).unwrap();

        assert_eq!(red.rank(), n - 1);
        assert_eq!(red.matrix.nnz(), 2 * (n - 1));
        for r in 0..n - 1 {
            assert_eq!(red.matrix.row_iter(r).collect::<Vec<_>>(), vec![(r, 1.0), (n - 1, -1.0)]);
        }
    }

    #[test]
    fn test_diagonalize_similar_diagonal() {
        // P diag(1, 2, 3) P^-1 with P unit upper triangular.
        let m = DenseMatrix::from_rows(vec![
            vec![1.0, 1.0, 1.0],
            vec![0.0, 2.0, 1.0],
            vec![0.0, 0.0, 3.0],
        ]);
        let spec = simultaneously_diagonalize(&[m], &DiagonalizationConfig::default()).unwrap();

        let values: Vec<f64> = spec.points.iter().map(|p| p[0].re).collect();
        assert_eq!(values.len(), 3);
        for (got, want) in values.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-8);
        }
        assert!(spec.diagonalization_error < 1e-8);
    }
}
