//! # Associative Combiners
//!
//! A reduce combine function must be associative: the final value may not
//! depend on where the engine split the range, only on the multiset of
//! elements. Rather than trusting arbitrary caller closures, the reduce
//! engine accepts only the combiners defined here, behind a sealed trait.

mod sealed {
    pub trait Sealed {}
}

/// A binary merge whose result is independent of range partitioning.
///
/// The trait is sealed: only the verified combiners in this module (addition,
/// multiplication, logical AND/OR, min, max) implement it.
pub trait Associative<T>: sealed::Sealed + Sync {
    /// Value returned for an empty range; must satisfy
    /// `combine(identity, x) == x`.
    fn identity(&self) -> T;

    /// Merge two partial results.
    fn combine(&self, a: T, b: T) -> T;
}

/// Addition (sums, dot products, counters)
#[derive(Clone, Copy, Debug, Default)]
pub struct Add;

/// Multiplication
#[derive(Clone, Copy, Debug, Default)]
pub struct Mul;

/// Logical AND (all-elements predicates)
#[derive(Clone, Copy, Debug, Default)]
pub struct And;

/// Logical OR (any-element predicates)
#[derive(Clone, Copy, Debug, Default)]
pub struct Or;

/// Minimum (identity +inf)
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

/// Maximum (identity -inf)
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl sealed::Sealed for Add {}
impl sealed::Sealed for Mul {}
impl sealed::Sealed for And {}
impl sealed::Sealed for Or {}
impl sealed::Sealed for Min {}
impl sealed::Sealed for Max {}

impl Associative<f64> for Add {
    fn identity(&self) -> f64 {
        0.0
    }

    fn combine(&self, a: f64, b: f64) -> f64 {
        a + b
    }
}

impl Associative<usize> for Add {
    fn identity(&self) -> usize {
        0
    }

    fn combine(&self, a: usize, b: usize) -> usize {
        a + b
    }
}

impl Associative<f64> for Mul {
    fn identity(&self) -> f64 {
        1.0
    }

    fn combine(&self, a: f64, b: f64) -> f64 {
        a * b
    }
}

impl Associative<bool> for And {
    fn identity(&self) -> bool {
        true
    }

    fn combine(&self, a: bool, b: bool) -> bool {
        a && b
    }
}

impl Associative<bool> for Or {
    fn identity(&self) -> bool {
        false
    }

    fn combine(&self, a: bool, b: bool) -> bool {
        a || b
    }
}

impl Associative<f64> for Min {
    fn identity(&self) -> f64 {
        f64::INFINITY
    }

    fn combine(&self, a: f64, b: f64) -> f64 {
        a.min(b)
    }
}

impl Associative<f64> for Max {
    fn identity(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn combine(&self, a: f64, b: f64) -> f64 {
        a.max(b)
    }
}
