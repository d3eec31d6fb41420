//! # Parvec Library
//!
//! Parallel divide-and-conquer engine for elementwise and aggregate
//! operations over large numeric vectors and matrices.
//!
//! A public operator validates its inputs, then submits one root task to the
//! engine; the engine recursively splits index ranges larger than the chunk
//! threshold, hands one half to a work-stealing pool, computes the other half
//! on the current thread, and joins. Leaves compute sequentially. Every call
//! is synchronous from the caller's point of view: whether it ran in parallel
//! is invisible except for performance.
//!
//! ## Modules
//! - `config`: execution context (worker pool, chunk threshold)
//! - `data`: numeric buffers (row-major `Matrix`)
//! - `engine`: the generic split/fork/join map and reduce primitives
//! - `error`: error types and result alias
//! - `ops`: concrete operators (sum, product, inner product, NaN scans,
//!   tolerance comparison, elementwise transforms, matrix multiply)
//!
//! ## Example
//! ```
//! use parvec::{config, ops};
//!
//! let ctx = config::global();
//! let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(ops::vector::sum(ctx, &v), 15.0);
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod ops;

// Re-export commonly used types
pub use config::{ParallelContext, MAX_SERIAL_LENGTH, MIN_PARALLEL_CORES};
pub use data::Matrix;
pub use engine::Span;
pub use error::{ParvecError, Result};
