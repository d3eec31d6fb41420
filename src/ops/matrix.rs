//! # Matrix Operators
//!
//! Row-range variants of the map and reduce engines. A span indexes rows, and
//! because the `Matrix` storage is row-major a span maps to one contiguous
//! block of the backing buffer, so leaves write disjoint row blocks of the
//! output.

use crate::config::ParallelContext;
use crate::data::Matrix;
use crate::engine::combine::{Add, And, Or};
use crate::engine::{self, Span};
use crate::error::{ParvecError, Result};
use crate::ops::vector::{dot_kernel, sum_kernel};

/// Matrix product `a × b`.
///
/// Fails with `DimensionMismatch` when the inner dimensions disagree. The
/// right operand is transposed once up front; each leaf then computes a block
/// of output rows as full dot products of contiguous rows against contiguous
/// transposed rows.
pub fn multiply(ctx: &ParallelContext, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(ParvecError::dimension_mismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }

    let m = a.rows();
    let n = b.cols();
    let mut out = Matrix::zeros(m, n);
    if m == 0 || n == 0 {
        return Ok(out);
    }

    let bt = b.transposed();
    let leaf = |span: Span, block: &mut [f64]| {
        for (r_off, r) in span.iter().enumerate() {
            let row = a.row(r);
            for c in 0..n {
                block[r_off * n + c] = dot_kernel(row, bt.row(c));
            }
        }
    };
    engine::map(ctx, out.as_mut_slice(), n, &leaf);
    Ok(out)
}

/// Elementwise map into a fresh matrix of the same shape.
pub fn map_unary<F>(ctx: &ParallelContext, m: &Matrix, f: F) -> Matrix
where
    F: Fn(f64) -> f64 + Sync,
{
    let cols = m.cols();
    let mut out = Matrix::zeros(m.rows(), cols);
    if m.is_empty() {
        return out;
    }
    let leaf = |span: Span, block: &mut [f64]| {
        for (r_off, r) in span.iter().enumerate() {
            let row = m.row(r);
            for c in 0..cols {
                block[r_off * cols + c] = f(row[c]);
            }
        }
    };
    engine::map(ctx, out.as_mut_slice(), cols, &leaf);
    out
}

/// Elementwise binary map over two same-shape matrices.
pub fn map_binary<F>(ctx: &ParallelContext, a: &Matrix, b: &Matrix, f: F) -> Result<Matrix>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    check_same_shape(a, b, "binary map")?;
    let cols = a.cols();
    let mut out = Matrix::zeros(a.rows(), cols);
    if a.is_empty() {
        return Ok(out);
    }
    let leaf = |span: Span, block: &mut [f64]| {
        for (r_off, r) in span.iter().enumerate() {
            let (ra, rb) = (a.row(r), b.row(r));
            for c in 0..cols {
                block[r_off * cols + c] = f(ra[c], rb[c]);
            }
        }
    };
    engine::map(ctx, out.as_mut_slice(), cols, &leaf);
    Ok(out)
}

/// Elementwise matrix addition.
pub fn add(ctx: &ParallelContext, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    map_binary(ctx, a, b, |x, y| x + y)
}

/// Elementwise matrix subtraction.
pub fn subtract(ctx: &ParallelContext, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    map_binary(ctx, a, b, |x, y| x - y)
}

/// Sum of all entries; 0.0 for an empty matrix.
pub fn sum(ctx: &ParallelContext, m: &Matrix) -> f64 {
    let leaf = |span: Span| {
        let mut total = 0.0;
        for r in span.iter() {
            total += sum_kernel(m.row(r));
        }
        total
    };
    engine::reduce(ctx, Span::of(m.rows()), &leaf, &Add)
}

/// Exact count of NaN entries; 0 for an empty matrix.
pub fn nan_count(ctx: &ParallelContext, m: &Matrix) -> usize {
    let leaf = |span: Span| {
        span.iter()
            .map(|r| m.row(r).iter().filter(|x| x.is_nan()).count())
            .sum::<usize>()
    };
    engine::reduce(ctx, Span::of(m.rows()), &leaf, &Add)
}

/// True iff any entry is NaN.
pub fn contains_nan(ctx: &ParallelContext, m: &Matrix) -> bool {
    let leaf = |span: Span| span.iter().any(|r| m.row(r).iter().any(|x| x.is_nan()));
    engine::reduce(ctx, Span::of(m.rows()), &leaf, &Or)
}

/// True iff every corresponding pair of entries differs by at most
/// `tolerance`. Requires identical shapes and a non-negative tolerance.
pub fn equals_within(ctx: &ParallelContext, a: &Matrix, b: &Matrix, tolerance: f64) -> Result<bool> {
    check_same_shape(a, b, "tolerance comparison")?;
    if !(tolerance >= 0.0) {
        return Err(ParvecError::invalid_argument(format!(
            "tolerance must be non-negative, got {}",
            tolerance
        )));
    }
    let leaf = |span: Span| {
        span.iter().all(|r| {
            a.row(r)
                .iter()
                .zip(b.row(r))
                .all(|(x, y)| (x - y).abs() <= tolerance)
        })
    };
    Ok(engine::reduce(ctx, Span::of(a.rows()), &leaf, &And))
}

fn check_same_shape(a: &Matrix, b: &Matrix, what: &str) -> Result<()> {
    if !a.same_shape(b) {
        return Err(ParvecError::dimension_mismatch(format!(
            "{} requires identical shapes, got {}x{} and {}x{}",
            what,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParallelContext;
    use crate::error::ParvecError;

    fn ctx() -> ParallelContext {
        // threshold 2 rows, so even 2x2 fixtures stay on the leaf path while
        // anything larger splits
        ParallelContext::with_settings(4, 8).unwrap()
    }

    #[test]
    fn multiply_concrete_2x2_case() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        let c = multiply(&ctx(), &a, &b).unwrap();
        let expected = Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 50.0]]).unwrap();
        assert_eq!(c, expected);
    }

    #[test]
    fn multiply_rejects_inner_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 2);
        let err = multiply(&ctx(), &a, &b).unwrap_err();
        assert!(matches!(err, ParvecError::DimensionMismatch { .. }));
    }

    #[test]
    fn multiply_by_identity_is_identity_op() {
        let a = Matrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        let eye = Matrix::from_rows(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert_eq!(multiply(&ctx(), &a, &eye).unwrap(), a);
    }

    #[test]
    fn multiply_with_zero_inner_dimension_yields_zeros() {
        let a = Matrix::zeros(2, 0);
        let b = Matrix::zeros(0, 3);
        let c = multiply(&ctx(), &a, &b).unwrap();
        assert_eq!(c, Matrix::zeros(2, 3));
    }

    #[test]
    fn elementwise_add_and_subtract_round_trip() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
        let s = add(&ctx(), &a, &b).unwrap();
        assert_eq!(s.get(1, 1), 4.5);
        let back = subtract(&ctx(), &s, &b).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn map_binary_rejects_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);
        assert!(map_binary(&ctx(), &a, &b, |x, y| x + y).is_err());
    }

    #[test]
    fn sum_and_nan_count_walk_every_row() {
        let mut rows = vec![vec![1.0; 4]; 10];
        rows[7][2] = f64::NAN;
        let m = Matrix::from_rows(rows).unwrap();
        assert_eq!(nan_count(&ctx(), &m), 1);
        assert!(contains_nan(&ctx(), &m));
        assert!(sum(&ctx(), &m).is_nan());

        let clean = Matrix::from_rows(vec![vec![2.0; 4]; 10]).unwrap();
        assert_eq!(sum(&ctx(), &clean), 80.0);
        assert_eq!(nan_count(&ctx(), &clean), 0);
    }

    #[test]
    fn map_unary_does_not_mutate_input() {
        let m = Matrix::from_rows(vec![vec![-1.0, 2.0], vec![3.0, -4.0]]).unwrap();
        let out = map_unary(&ctx(), &m, f64::abs);
        assert_eq!(out.row(0), &[1.0, 2.0]);
        assert_eq!(out.row(1), &[3.0, 4.0]);
        assert_eq!(m.row(0), &[-1.0, 2.0]);
    }

    #[test]
    fn equals_within_on_matrices() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = map_unary(&ctx(), &a, |x| x + 1e-10);
        assert!(equals_within(&ctx(), &a, &b, 1e-9).unwrap());
        assert!(!equals_within(&ctx(), &a, &b, 1e-12).unwrap());
    }
}
