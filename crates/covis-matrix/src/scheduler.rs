//! Background recompute of folded matrices
//!
//! Aggregating a large matrix is the one operation worth moving off the
//! caller's thread. Each [`AggregationRequest`] owns an immutable snapshot of
//! the table and its groupings, so the worker shares no mutable state with the
//! caller. A newer request supersedes every older one: queued stale requests
//! are skipped, and stale results are dropped when collected, never merged.

use crate::aggregate::{aggregate, AggregatedMatrix, AggregationConfig};
use crate::grouping::AxisGrouping;
use crate::mode::MatrixMode;
use crate::table::FrequencyTable;
use covis_core::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// One unit of background work: recompute the aggregate for a fold state
#[derive(Debug, Clone)]
pub struct AggregationRequest {
    pub table: Arc<FrequencyTable>,
    pub groupings: Vec<AxisGrouping>,
    pub mode: MatrixMode,
    pub config: AggregationConfig,
}

/// Handle identifying a submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub trace_id: Uuid,
}

/// Outcome of one background recompute
#[derive(Debug)]
pub struct AggregationResult {
    pub generation: u64,
    pub trace_id: Uuid,
    pub mode: MatrixMode,
    pub matrix: Result<AggregatedMatrix>,
}

struct Job {
    ticket: Ticket,
    request: AggregationRequest,
}

/// Runs aggregations on a dedicated worker thread, latest request wins
pub struct RecomputeScheduler {
    latest: Arc<AtomicU64>,
    jobs: Option<Sender<Job>>,
    results: Receiver<AggregationResult>,
    worker: Option<JoinHandle<()>>,
}

impl RecomputeScheduler {
    /// Start the worker thread
    pub fn new() -> Result<Self> {
        let latest = Arc::new(AtomicU64::new(0));
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel();

        let worker_latest = Arc::clone(&latest);
        let worker = std::thread::Builder::new()
            .name("covis-recompute".to_string())
            .spawn(move || run_worker(job_rx, result_tx, worker_latest))
            .map_err(|e| Error::Other(anyhow::anyhow!("failed to start recompute worker: {e}")))?;

        Ok(Self {
            latest,
            jobs: Some(job_tx),
            results: result_rx,
            worker: Some(worker),
        })
    }

    /// Queue a recompute, superseding every earlier request
    pub fn submit(&self, request: AggregationRequest) -> Result<Ticket> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = Ticket {
            generation,
            trace_id: Uuid::new_v4(),
        };
        debug!(generation, trace_id = %ticket.trace_id, mode = %request.mode, "submitting recompute");
        self.jobs
            .as_ref()
            .ok_or_else(worker_stopped)?
            .send(Job { ticket, request })
            .map_err(|_| worker_stopped())?;
        Ok(ticket)
    }

    /// Generation of the most recent request
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// The result of the latest request if it has finished, without blocking
    pub fn try_collect(&self) -> Result<Option<AggregationResult>> {
        loop {
            match self.results.try_recv() {
                Ok(result) => {
                    if let Some(result) = self.keep_current(result) {
                        return Ok(Some(result));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(worker_stopped()),
            }
        }
    }

    /// Block until the latest request has finished
    pub fn wait(&self) -> Result<AggregationResult> {
        loop {
            let result = self.results.recv().map_err(|_| worker_stopped())?;
            if let Some(result) = self.keep_current(result) {
                return Ok(result);
            }
        }
    }

    fn keep_current(&self, result: AggregationResult) -> Option<AggregationResult> {
        let latest = self.latest_generation();
        if result.generation == latest {
            Some(result)
        } else {
            debug!(
                generation = result.generation,
                latest,
                trace_id = %result.trace_id,
                "discarding stale recompute result"
            );
            None
        }
    }
}

impl Drop for RecomputeScheduler {
    fn drop(&mut self) {
        // Closing the job channel stops the worker loop
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("recompute worker panicked");
            }
        }
    }
}

fn worker_stopped() -> Error {
    Error::Other(anyhow::anyhow!("recompute worker stopped"))
}

fn run_worker(jobs: Receiver<Job>, results: Sender<AggregationResult>, latest: Arc<AtomicU64>) {
    while let Ok(mut job) = jobs.recv() {
        // Skip straight to the newest queued request
        while let Ok(newer) = jobs.try_recv() {
            trace!(skipped = job.ticket.generation, "superseded before start");
            job = newer;
        }
        if job.ticket.generation != latest.load(Ordering::SeqCst) {
            trace!(skipped = job.ticket.generation, "superseded before start");
            continue;
        }

        let Job { ticket, request } = job;
        let matrix = aggregate(&request.table, &request.groupings, &request.config);
        let result = AggregationResult {
            generation: ticket.generation,
            trace_id: ticket.trace_id,
            mode: request.mode,
            matrix,
        };
        if results.send(result).is_err() {
            break;
        }
    }
}
