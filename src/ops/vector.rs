//! # Vector Operators
//!
//! Validating entry points over `&[f64]` slices. Each operator checks shapes
//! on the calling thread (fail fast, no task scheduled on violation), returns
//! the identity directly for empty-input cases, and otherwise delegates to
//! the map or reduce engine with the appropriate leaf kernel.
//!
//! Because split points depend on length and chunk threshold rather than a
//! fixed left-to-right order, floating-point sum/product results may differ
//! from a naive sequential loop in the last bits. Callers comparing against
//! a serial reference should use a tolerance.

use wide::f64x4;

use crate::config::ParallelContext;
use crate::engine::combine::{Add, And, Max, Min, Mul, Or};
use crate::engine::{self, Span};
use crate::error::{ParvecError, Result};

// ---------------------------------------------------------------------------
// Leaf kernels
// ---------------------------------------------------------------------------

/// Sequential SIMD sum of a contiguous slice.
#[inline]
pub(crate) fn sum_kernel(v: &[f64]) -> f64 {
    let mut acc = f64x4::splat(0.0);
    let mut k = 0;
    while k + 4 <= v.len() {
        let mut chunk = [0.0f64; 4];
        chunk.copy_from_slice(&v[k..k + 4]);
        acc += f64x4::from(chunk);
        k += 4;
    }
    let mut total = acc.reduce_add();
    for &x in &v[k..] {
        total += x;
    }
    total
}

/// Sequential SIMD dot product of two equal-length slices.
#[inline]
pub(crate) fn dot_kernel(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut acc = f64x4::splat(0.0);
    let mut k = 0;
    while k + 4 <= a.len() {
        let mut lhs = [0.0f64; 4];
        let mut rhs = [0.0f64; 4];
        lhs.copy_from_slice(&a[k..k + 4]);
        rhs.copy_from_slice(&b[k..k + 4]);
        acc += f64x4::from(lhs) * f64x4::from(rhs);
        k += 4;
    }
    let mut total = acc.reduce_add();
    for i in k..a.len() {
        total += a[i] * b[i];
    }
    total
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

/// Sum of all elements; 0.0 for an empty vector.
pub fn sum(ctx: &ParallelContext, v: &[f64]) -> f64 {
    engine::reduce(ctx, Span::of(v.len()), &|span: Span| sum_kernel(&v[span.iter()]), &Add)
}

/// Product of all elements; 1.0 for an empty vector.
pub fn product(ctx: &ParallelContext, v: &[f64]) -> f64 {
    let leaf = |span: Span| v[span.iter()].iter().product::<f64>();
    engine::reduce(ctx, Span::of(v.len()), &leaf, &Mul)
}

/// Dot product of two equal-length vectors.
///
/// Fails with `DimensionMismatch` before any task is scheduled when the
/// lengths differ.
pub fn inner_product(ctx: &ParallelContext, a: &[f64], b: &[f64]) -> Result<f64> {
    check_equal_lengths(a, b, "inner product")?;
    let leaf = |span: Span| dot_kernel(&a[span.iter()], &b[span.iter()]);
    Ok(engine::reduce(ctx, Span::of(a.len()), &leaf, &Add))
}

/// Exact count of IEEE-754 NaN values; 0 for an empty vector.
pub fn nan_count(ctx: &ParallelContext, v: &[f64]) -> usize {
    let leaf = |span: Span| v[span.iter()].iter().filter(|x| x.is_nan()).count();
    engine::reduce(ctx, Span::of(v.len()), &leaf, &Add)
}

/// True iff any element is NaN; false for an empty vector.
pub fn contains_nan(ctx: &ParallelContext, v: &[f64]) -> bool {
    let leaf = |span: Span| v[span.iter()].iter().any(|x| x.is_nan());
    engine::reduce(ctx, Span::of(v.len()), &leaf, &Or)
}

/// True iff every corresponding pair differs by at most `tolerance`.
///
/// Vacuously true for two empty vectors. Fails on mismatched lengths or a
/// negative/NaN tolerance.
pub fn equals_within(ctx: &ParallelContext, a: &[f64], b: &[f64], tolerance: f64) -> Result<bool> {
    check_equal_lengths(a, b, "tolerance comparison")?;
    if !(tolerance >= 0.0) {
        return Err(ParvecError::invalid_argument(format!(
            "tolerance must be non-negative, got {}",
            tolerance
        )));
    }
    let leaf = |span: Span| {
        span.iter().all(|i| (a[i] - b[i]).abs() <= tolerance)
    };
    Ok(engine::reduce(ctx, Span::of(a.len()), &leaf, &And))
}

/// Smallest element. Fails with `InvalidArgument` on an empty vector, which
/// has no defined minimum.
pub fn min(ctx: &ParallelContext, v: &[f64]) -> Result<f64> {
    if v.is_empty() {
        return Err(ParvecError::invalid_argument("min of an empty vector"));
    }
    let leaf = |span: Span| v[span.iter()].iter().copied().fold(f64::INFINITY, f64::min);
    Ok(engine::reduce(ctx, Span::of(v.len()), &leaf, &Min))
}

/// Largest element. Fails with `InvalidArgument` on an empty vector.
pub fn max(ctx: &ParallelContext, v: &[f64]) -> Result<f64> {
    if v.is_empty() {
        return Err(ParvecError::invalid_argument("max of an empty vector"));
    }
    let leaf = |span: Span| {
        v[span.iter()].iter().copied().fold(f64::NEG_INFINITY, f64::max)
    };
    Ok(engine::reduce(ctx, Span::of(v.len()), &leaf, &Max))
}

// ---------------------------------------------------------------------------
// Elementwise maps
// ---------------------------------------------------------------------------

/// `out[i] = f(v[i])` into a fresh vector; never mutates the input.
pub fn map_unary<F>(ctx: &ParallelContext, v: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync,
{
    let mut out = vec![0.0; v.len()];
    let leaf = |span: Span, block: &mut [f64]| {
        for (offset, i) in span.iter().enumerate() {
            block[offset] = f(v[i]);
        }
    };
    engine::map(ctx, &mut out, 1, &leaf);
    out
}

/// `out[i] = f(a[i], b[i])` into a fresh vector.
///
/// Requires equal lengths; two empty inputs are a match and yield an empty
/// output.
pub fn map_binary<F>(ctx: &ParallelContext, a: &[f64], b: &[f64], f: F) -> Result<Vec<f64>>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    check_equal_lengths(a, b, "binary map")?;
    let mut out = vec![0.0; a.len()];
    let leaf = |span: Span, block: &mut [f64]| {
        for (offset, i) in span.iter().enumerate() {
            block[offset] = f(a[i], b[i]);
        }
    };
    engine::map(ctx, &mut out, 1, &leaf);
    Ok(out)
}

/// Elementwise absolute value.
pub fn abs(ctx: &ParallelContext, v: &[f64]) -> Vec<f64> {
    map_unary(ctx, v, f64::abs)
}

/// Elementwise natural logarithm.
pub fn ln(ctx: &ParallelContext, v: &[f64]) -> Vec<f64> {
    map_unary(ctx, v, f64::ln)
}

/// Elementwise addition.
pub fn add(ctx: &ParallelContext, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    map_binary(ctx, a, b, |x, y| x + y)
}

/// Elementwise subtraction.
pub fn subtract(ctx: &ParallelContext, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    map_binary(ctx, a, b, |x, y| x - y)
}

/// Elementwise multiplication.
pub fn multiply(ctx: &ParallelContext, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    map_binary(ctx, a, b, |x, y| x * y)
}

fn check_equal_lengths(a: &[f64], b: &[f64], what: &str) -> Result<()> {
    if a.len() != b.len() {
        return Err(ParvecError::dimension_mismatch(format!(
            "{} requires equal lengths, got {} and {}",
            what,
            a.len(),
            b.len()
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
        // threshold 16 so modest test vectors exercise the split path
        ParallelContext::with_settings(4, 64).unwrap()
    }

    #[test]
    fn sum_of_small_vector_is_exact() {
        assert_eq!(sum(&ctx(), &[1.0, 2.0, 3.0, 4.0, 5.0]), 15.0);
    }

    #[test]
    fn sum_of_empty_vector_is_zero() {
        assert_eq!(sum(&ctx(), &[]), 0.0);
    }

    #[test]
    fn product_identity_on_empty_input() {
        assert_eq!(product(&ctx(), &[]), 1.0);
        assert_eq!(product(&ctx(), &[2.0, 3.0, 4.0]), 24.0);
    }

    #[test]
    fn inner_product_concrete_case() {
        let a = [1.0, 1.0, 1.0, 1.0];
        let b = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(inner_product(&ctx(), &a, &b).unwrap(), 10.0);
    }

    #[test]
    fn inner_product_rejects_mismatched_lengths() {
        let err = inner_product(&ctx(), &[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, ParvecError::DimensionMismatch { .. }));
    }

    #[test]
    fn nan_count_is_exact() {
        let mut v = vec![1.0; 100];
        v[3] = f64::NAN;
        v[97] = f64::NAN;
        assert_eq!(nan_count(&ctx(), &v), 2);
        assert!(contains_nan(&ctx(), &v));
        assert!(!contains_nan(&ctx(), &[1.0, 2.0]));
        assert_eq!(nan_count(&ctx(), &[]), 0);
    }

    #[test]
    fn equals_within_checks_every_pair() {
        let a = vec![1.0; 50];
        let mut b = vec![1.0005; 50];
        assert!(equals_within(&ctx(), &a, &b, 1e-3).unwrap());
        b[49] = 1.01;
        assert!(!equals_within(&ctx(), &a, &b, 1e-3).unwrap());
    }

    #[test]
    fn equals_within_rejects_negative_tolerance() {
        let err = equals_within(&ctx(), &[1.0], &[1.0], -1e-3).unwrap_err();
        assert!(matches!(err, ParvecError::InvalidArgument { .. }));
    }

    #[test]
    fn min_max_fail_on_empty_input() {
        assert!(matches!(
            min(&ctx(), &[]).unwrap_err(),
            ParvecError::InvalidArgument { .. }
        ));
        assert!(matches!(
            max(&ctx(), &[]).unwrap_err(),
            ParvecError::InvalidArgument { .. }
        ));
        assert_eq!(min(&ctx(), &[3.0, -1.0, 2.0]).unwrap(), -1.0);
        assert_eq!(max(&ctx(), &[3.0, -1.0, 2.0]).unwrap(), 3.0);
    }

    #[test]
    fn map_unary_allocates_fresh_output() {
        let v = vec![1.0, -2.0, 3.0];
        let out = map_unary(&ctx(), &v, |x| x);
        assert_eq!(out, v);
        let mut out = out;
        out[0] = 99.0;
        assert_eq!(v[0], 1.0);
    }

    #[test]
    fn elementwise_operators_match_scalar_loop() {
        let a: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..100).map(|i| (i * 2) as f64).collect();
        let sum_v = add(&ctx(), &a, &b).unwrap();
        let diff_v = subtract(&ctx(), &a, &b).unwrap();
        let prod_v = multiply(&ctx(), &a, &b).unwrap();
        for i in 0..100 {
            assert_eq!(sum_v[i], a[i] + b[i]);
            assert_eq!(diff_v[i], a[i] - b[i]);
            assert_eq!(prod_v[i], a[i] * b[i]);
        }
        assert_eq!(abs(&ctx(), &[-1.5, 2.0]), vec![1.5, 2.0]);
    }

    #[test]
    fn map_binary_allows_two_empty_inputs() {
        let out = map_binary(&ctx(), &[], &[], |x, y| x + y).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn sum_kernel_handles_remainder_lengths() {
        for len in 0..9 {
            let v: Vec<f64> = (0..len).map(|i| (i + 1) as f64).collect();
            let expected: f64 = v.iter().sum();
            assert_eq!(sum_kernel(&v), expected);
        }
    }

    #[test]
    fn dot_kernel_matches_scalar_loop() {
        let a: Vec<f64> = (0..13).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..13).map(|i| (i as f64) * 0.5).collect();
        let expected: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!((dot_kernel(&a, &b) - expected).abs() < 1e-12);
    }
}
