//! # Reduce Engine
//!
//! Aggregates a span to a single value: a leaf function computes the partial
//! result for a small contiguous range sequentially, and an associative
//! combiner merges partials as the recursion unwinds.
//!
//! Spans longer than the chunk threshold split at the midpoint; one half is
//! made available to the work-stealing pool while the current thread computes
//! the other, then the two partials are joined and combined. Leaves never
//! touch the pool.

use tracing::trace;

use crate::config::ParallelContext;
use crate::engine::combine::Associative;
use crate::engine::span::Span;

/// Reduce `span` to a single value.
///
/// `leaf` must compute the partial result for any sub-span by sequential
/// iteration; `op` merges two partials. Because `op` is restricted to the
/// sealed associative combiners, the final value does not depend on where
/// the range was split (floating-point results may still differ from a
/// strictly left-to-right loop in the last bits).
///
/// An empty span returns `op.identity()` without scheduling any work.
pub fn reduce<T, C, F>(ctx: &ParallelContext, span: Span, leaf: &F, op: &C) -> T
where
    T: Send,
    C: Associative<T>,
    F: Fn(Span) -> T + Sync,
{
    if span.is_empty() {
        return op.identity();
    }

    let threshold = ctx.chunk_threshold();
    if !ctx.is_parallelism_allowed() || span.len() <= threshold {
        trace!(len = span.len(), threshold, "reduce: leaf path");
        return leaf(span);
    }

    // is_parallelism_allowed() implies the pool exists
    let pool = match ctx.pool() {
        Some(pool) => pool,
        None => return leaf(span),
    };

    trace!(len = span.len(), threshold, "reduce: parallel path");
    pool.install(|| reduce_split(threshold, span, leaf, op))
}

/// Recursive split-fork-compute-join over the pool.
fn reduce_split<T, C, F>(threshold: usize, span: Span, leaf: &F, op: &C) -> T
where
    T: Send,
    C: Associative<T>,
    F: Fn(Span) -> T + Sync,
{
    if span.len() <= threshold {
        return leaf(span);
    }

    let (left, right) = span.split();
    let (a, b) = rayon::join(
        || reduce_split(threshold, left, leaf, op),
        || reduce_split(threshold, right, leaf, op),
    );
    op.combine(a, b)
}
