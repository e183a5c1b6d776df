//! Optional synthesis worker pool.
//!
//! This worker pool distinguishes an `Inline` kind (runs
//! on the calling thread) from a `Threaded` kind (a background `rayon`
//! pool), behind one handle type. `clatter`'s dispatcher has a much
//! simpler contract than a long-lived streaming task pool: each
//! `update()` has a fixed, known batch of per-pair synthesis jobs and must
//! block until all of them (and their callbacks) are done before
//! returning. That's exactly what `rayon::ThreadPool::install` plus
//! `into_par_iter` already gives us, so the threaded variant is a thin
//! wrapper rather than a hand-rolled scheduler.
use std::num::NonZeroUsize;

enum Kind {
    Inline,
    Threaded(rayon::ThreadPool),
}

pub struct WorkerPool {
    kind: Kind,
}

impl WorkerPool {
    pub fn new_inline() -> Self {
        WorkerPool { kind: Kind::Inline }
    }

    pub fn new_threaded(threads: NonZeroUsize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .build()
            .expect("failed to build rayon thread pool");
        WorkerPool { kind: Kind::Threaded(pool) }
    }

    pub fn is_threaded(&self) -> bool {
        matches!(self.kind, Kind::Threaded(_))
    }

    /// Run `jobs` to completion, in whatever order the pool chooses, and
    /// return their results in the same order as `jobs`. This is a
    /// barrier: it does not return until every job has finished, matching
    /// the dispatcher's requirement that `update()` only return once all
    /// dispatched synthesis and callbacks have completed.
    pub fn run_batch<T, F>(&self, jobs: Vec<F>) -> Vec<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match &self.kind {
            Kind::Inline => jobs.into_iter().map(|job| job()).collect(),
            Kind::Threaded(pool) => {
                use rayon::prelude::*;
                pool.install(|| jobs.into_par_iter().map(|job| job()).collect())
            }
        }
    }
}
