//! # Map Engine
//!
//! Applies a per-range computation across a freshly allocated output buffer.
//! The recursion splits the span at the midpoint and splits the output slice
//! at the matching offset with `split_at_mut`, so every leaf task owns a
//! disjoint region of the output. No two leaves can ever write the same
//! index; the borrow checker enforces the single-writer discipline.
//!
//! `stride` is the number of output elements per span index: 1 for vector
//! maps, the column count for matrix row-block maps.

use tracing::trace;

use crate::config::ParallelContext;
use crate::engine::span::Span;

/// Populate `out` by running `leaf` over sub-spans of `[0, out.len() / stride)`.
///
/// The leaf receives the absolute span and the output sub-slice covering
/// exactly `span.len() * stride` elements starting at `span.lo() * stride`.
/// `out.len()` must be a multiple of `stride`.
pub fn map<T, F>(ctx: &ParallelContext, out: &mut [T], stride: usize, leaf: &F)
where
    T: Send,
    F: Fn(Span, &mut [T]) + Sync,
{
    debug_assert!(stride > 0, "map stride must be non-zero");
    debug_assert_eq!(out.len() % stride, 0, "output length must be a multiple of stride");

    let span = Span::of(out.len() / stride);
    if span.is_empty() {
        return;
    }

    let threshold = ctx.chunk_threshold();
    if !ctx.is_parallelism_allowed() || span.len() <= threshold {
        trace!(len = span.len(), threshold, "map: leaf path");
        leaf(span, out);
        return;
    }

    let pool = match ctx.pool() {
        Some(pool) => pool,
        None => {
            leaf(span, out);
            return;
        }
    };

    trace!(len = span.len(), threshold, "map: parallel path");
    pool.install(|| map_split(threshold, stride, span, out, leaf));
}

/// Recursive split over disjoint halves of the output slice.
fn map_split<T, F>(threshold: usize, stride: usize, span: Span, out: &mut [T], leaf: &F)
where
    T: Send,
    F: Fn(Span, &mut [T]) + Sync,
{
    if span.len() <= threshold {
        leaf(span, out);
        return;
    }

    let (left, right) = span.split();
    let (out_left, out_right) = out.split_at_mut(left.len() * stride);
    rayon::join(
        || map_split(threshold, stride, left, out_left, leaf),
        || map_split(threshold, stride, right, out_right, leaf),
    );
}
