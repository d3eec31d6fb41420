//! # Operator Library
//!
//! ## Role
//! Concrete named operators wiring the engines to specific leaf kernels and
//! combiners, with pre-flight shape validation. Higher-level vector/matrix
//! façades call these when an input is large enough to be worth splitting.
//!
//! ## Sub-modules
//! - `vector`: reductions and elementwise maps over `&[f64]`
//! - `matrix`: row-range variants plus matrix multiplication

pub mod matrix;
pub mod vector;
