//! # Index Spans
//!
//! A half-open range `[lo, hi)` over the first dimension of a buffer: element
//! indices for vectors, row indices for matrices. The engine recursively
//! splits spans at the midpoint until they fit under the chunk threshold.

use std::ops::Range;

/// Half-open index range `[lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    lo: usize,
    hi: usize,
}

impl Span {
    /// Create a span over `[lo, hi)`.
    #[inline]
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo <= hi, "span lower bound {} exceeds upper bound {}", lo, hi);
        Self { lo, hi }
    }

    /// Span covering `[0, len)`.
    #[inline]
    pub fn of(len: usize) -> Self {
        Self { lo: 0, hi: len }
    }

    /// Lower bound (inclusive)
    #[inline]
    pub fn lo(&self) -> usize {
        self.lo
    }

    /// Upper bound (exclusive)
    #[inline]
    pub fn hi(&self) -> usize {
        self.hi
    }

    /// Number of indices covered
    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    /// True when the span covers no indices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// Split at the midpoint into `[lo, mid)` and `[mid, hi)`.
    #[inline]
    pub fn split(self) -> (Span, Span) {
        let mid = self.lo + self.len() / 2;
        (Span::new(self.lo, mid), Span::new(mid, self.hi))
    }

    /// Iterate the covered indices
    #[inline]
    pub fn iter(&self) -> Range<usize> {
        self.lo..self.hi
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.lo..span.hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_halves_even_spans() {
        let (l, r) = Span::new(0, 8).split();
        assert_eq!((l.lo(), l.hi()), (0, 4));
        assert_eq!((r.lo(), r.hi()), (4, 8));
    }

    #[test]
    fn split_puts_extra_element_on_the_right() {
        let (l, r) = Span::new(2, 7).split();
        assert_eq!(l.len(), 2);
        assert_eq!(r.len(), 3);
        assert_eq!(l.hi(), r.lo());
    }

    #[test]
    fn split_of_singleton_leaves_empty_left_half() {
        let (l, r) = Span::new(3, 4).split();
        assert!(l.is_empty());
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn iter_covers_exactly_the_range() {
        let indices: Vec<usize> = Span::new(5, 8).iter().collect();
        assert_eq!(indices, vec![5, 6, 7]);
    }
}
