//! # Data Module
//!
//! ## Role
//! In-memory numeric buffers the engine operates on. Vectors are plain
//! `&[f64]` slices; matrices get a dedicated row-major type.

pub mod matrix;

pub use matrix::Matrix;
