//! # Parallel Execution Context
//!
//! ## Role
//! Owns the worker pool and split thresholds used by the engine. Built once
//! per process for normal use (`global()`), or constructed with explicit
//! settings for tests and embedders that need per-call control.

use std::sync::{Arc, OnceLock};
use std::thread;

use tracing::debug;

use crate::error::{ParvecError, Result};

/// Maximum range length processed by a single sequential leaf across the
/// whole default pool. The per-leaf chunk threshold is this divided by the
/// worker count.
pub const MAX_SERIAL_LENGTH: usize = 32_768;

/// Minimum logical cores required before parallel execution is considered
/// worthwhile at all.
pub const MIN_PARALLEL_CORES: usize = 2;

/// Execution context for the divide-and-conquer engine.
///
/// Holds a work-stealing worker pool, the worker count, and the chunk
/// threshold (the largest range a leaf computes sequentially). Contexts are
/// cheap to clone: the pool is shared behind an `Arc`.
#[derive(Clone)]
pub struct ParallelContext {
    /// Shared work-stealing pool. `None` means the pool could not be built
    /// and every operation runs sequentially on the calling thread.
    pool: Option<Arc<rayon::ThreadPool>>,

    /// Number of worker threads in the pool
    workers: usize,

    /// Largest range a leaf task computes by direct sequential iteration
    chunk_threshold: usize,
}

impl ParallelContext {
    /// Build a context from the runtime-reported logical core count and the
    /// default serial-length constant.
    pub fn new() -> Result<Self> {
        let workers = available_cores();
        Self::with_settings(workers, MAX_SERIAL_LENGTH)
    }

    /// Build a context with an explicit worker count and maximum serial
    /// length. The chunk threshold is `max_serial_length / workers`, never
    /// less than 1.
    pub fn with_settings(workers: usize, max_serial_length: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ParvecError::invalid_argument("worker count must be non-zero"));
        }
        if max_serial_length == 0 {
            return Err(ParvecError::invalid_argument(
                "maximum serial length must be non-zero",
            ));
        }

        let chunk_threshold = (max_serial_length / workers).max(1);
        let pool = if workers >= MIN_PARALLEL_CORES {
            Some(Arc::new(build_worker_pool(workers)?))
        } else {
            None
        };

        debug!(workers, chunk_threshold, pooled = pool.is_some(), "parallel context ready");

        Ok(Self {
            pool,
            workers,
            chunk_threshold,
        })
    }

    /// True iff operations routed through this context may fork onto the
    /// worker pool.
    pub fn is_parallelism_allowed(&self) -> bool {
        self.pool.is_some() && self.workers >= MIN_PARALLEL_CORES
    }

    /// Largest range a leaf task computes sequentially before the engine
    /// prefers to split further.
    pub fn chunk_threshold(&self) -> usize {
        self.chunk_threshold
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Handle to the shared worker pool, if one was built
    pub fn pool(&self) -> Option<&rayon::ThreadPool> {
        self.pool.as_deref()
    }

    /// Sequential context: never forks, regardless of input size
    fn sequential(workers: usize, max_serial_length: usize) -> Self {
        Self {
            pool: None,
            workers,
            chunk_threshold: (max_serial_length / workers.max(1)).max(1),
        }
    }
}

/// Create a configured worker pool with named threads.
fn build_worker_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("parvec-worker-{}", i))
        .build()
        .map_err(|e| ParvecError::config(format!("failed to create worker pool: {}", e)))
}

fn available_cores() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

static GLOBAL_CONTEXT: OnceLock<ParallelContext> = OnceLock::new();

/// Process-wide default context, built once from the reported core count.
///
/// If the pool cannot be built the context degrades to sequential execution
/// instead of failing; callers that need the error should construct a
/// context explicitly.
pub fn global() -> &'static ParallelContext {
    GLOBAL_CONTEXT.get_or_init(|| {
        ParallelContext::new().unwrap_or_else(|e| {
            debug!("falling back to sequential context: {}", e);
            ParallelContext::sequential(available_cores(), MAX_SERIAL_LENGTH)
        })
    })
}
