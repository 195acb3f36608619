//! Background solver thread with last-request-wins semantics.
//!
//! An interactive caller submits a solve per input change and keeps its own
//! thread free. Each submission bumps a shared generation counter; the worker
//! drops queued stale jobs and the relaxation of an in-flight stale job stops
//! at its next sweep with `CoordError::Cancelled`. Outcomes arrive on a
//! channel tagged with their generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use super::solve::solve_with_cancel;
use super::types::{HarmonicCfg, HarmonicField};
use crate::error::{CoordError, Result};
use crate::geom2::Polygon;

pub(crate) const THREAD_NAME: &str = "harmonic-solve";

struct Job {
    generation: u64,
    polygon: Polygon,
    cfg: HarmonicCfg,
}

/// Result of one submitted solve.
#[derive(Debug)]
pub struct SolveOutcome {
    pub generation: u64,
    pub result: Result<HarmonicField>,
}

/// Owns the solver thread; dropping it shuts the thread down.
pub struct SolveWorker {
    jobs: Option<Sender<Job>>,
    outcomes: Receiver<SolveOutcome>,
    latest: Arc<AtomicU64>,
    pub(super) handle: Option<JoinHandle<()>>,
}

impl SolveWorker {
    /// Start the solver thread. Fails only if the OS refuses a new thread.
    pub fn spawn() -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (out_tx, out_rx) = mpsc::channel::<SolveOutcome>();
        let latest = Arc::new(AtomicU64::new(0));
        let shared = Arc::clone(&latest);
        let handle = std::thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || run(job_rx, out_tx, shared))
            .inspect_err(|e| warn!(error = %e, "could not start the solver thread"))?;
        Ok(Self {
            jobs: Some(job_tx),
            outcomes: out_rx,
            latest,
            handle: Some(handle),
        })
    }

    /// Queue a solve; returns its generation. Supersedes every earlier job.
    ///
    /// The polygon is moved in, so later edits by the caller never race the solve.
    pub fn submit(&self, polygon: Polygon, cfg: HarmonicCfg) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        let job = Job {
            generation,
            polygon,
            cfg,
        };
        let sent = self.jobs.as_ref().map(|tx| tx.send(job).is_ok());
        if sent != Some(true) {
            warn!(generation, "solver thread has exited; job dropped");
        }
        generation
    }

    /// Generation of the most recent submission (0 before any).
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Non-blocking poll for the next outcome (stale ones included).
    pub fn try_recv(&self) -> Option<SolveOutcome> {
        match self.outcomes.try_recv() {
            Ok(o) => Some(o),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block for the next outcome (stale ones included).
    pub fn recv(&self) -> Option<SolveOutcome> {
        self.outcomes.recv().ok()
    }

    /// Block until the outcome of the latest submission arrives, discarding
    /// stale ones. `None` if nothing was submitted or the thread is gone.
    pub fn recv_latest(&self) -> Option<SolveOutcome> {
        if self.latest_generation() == 0 {
            return None;
        }
        loop {
            let outcome = self.outcomes.recv().ok()?;
            if outcome.generation == self.latest_generation() {
                return Some(outcome);
            }
        }
    }
}

impl Drop for SolveWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop; bumping the
        // generation aborts a solve still in progress.
        self.jobs.take();
        self.latest.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(jobs: Receiver<Job>, outcomes: Sender<SolveOutcome>, latest: Arc<AtomicU64>) {
    while let Ok(mut job) = jobs.recv() {
        // Skip to the newest queued job; report the skipped ones as cancelled.
        while let Ok(newer) = jobs.try_recv() {
            let skipped = std::mem::replace(&mut job, newer);
            let _ = outcomes.send(SolveOutcome {
                generation: skipped.generation,
                result: Err(CoordError::Cancelled),
            });
        }
        let generation = job.generation;
        let is_stale = || latest.load(Ordering::Acquire) != generation;
        let result = if is_stale() {
            Err(CoordError::Cancelled)
        } else {
            solve_with_cancel(&job.polygon, &job.cfg, &is_stale)
        };
        debug!(generation, ok = result.is_ok(), "solve finished");
        if outcomes.send(SolveOutcome { generation, result }).is_err() {
            break;
        }
    }
}
