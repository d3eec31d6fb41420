//! # Divide-and-Conquer Engine
//!
//! ## Role
//! The recursive split/fork/join core shared by every operator. A span over
//! an input buffer splits at the midpoint until it fits under the context's
//! chunk threshold; halves run as stealable tasks on the shared pool and
//! leaves compute by plain sequential iteration.
//!
//! ## Sub-modules
//! - `span`: half-open index ranges and midpoint splitting
//! - `combine`: the sealed set of associative reduce combiners
//! - `map`: elementwise engine writing disjoint regions of a fresh output
//! - `reduce`: aggregation engine merging leaf partials

pub mod combine;
pub mod map;
pub mod reduce;
pub mod span;

pub use combine::{Add, And, Associative, Max, Min, Mul, Or};
pub use map::map;
pub use reduce::reduce;
pub use span::Span;
