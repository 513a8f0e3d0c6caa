use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::ResolverSettings;

use super::thread::spawn_resolver_threads;
use super::types::{ResolveJob, Resolution};

/// Handle to the duration worker pool.
///
/// Requests never block. A path that is already being probed is not queued
/// again until its result has been taken off the completion channel. Dropping
/// the handle lets each worker finish its current probe and exit.
pub struct LengthResolver {
    jobs: Sender<ResolveJob>,
    results: Receiver<Resolution>,
    in_flight: HashSet<PathBuf>,
}

impl LengthResolver {
    pub fn new(settings: &ResolverSettings) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<ResolveJob>();
        let (result_tx, result_rx) = mpsc::channel::<Resolution>();

        let workers = spawn_resolver_threads(settings.workers.max(1), job_rx, result_tx);
        debug!(workers, "resolver pool started");

        Self {
            jobs: job_tx,
            results: result_rx,
            in_flight: HashSet::new(),
        }
    }

    /// Queue `job` unless the same path is already in flight. Returns whether
    /// the job was queued.
    pub fn request(&mut self, job: ResolveJob) -> bool {
        if self.in_flight.contains(&job.path) {
            return false;
        }
        let path = job.path.clone();
        match self.jobs.send(job) {
            Ok(()) => {
                self.in_flight.insert(path);
                true
            }
            Err(_) => {
                warn!(path = %path.display(), "resolver pool is gone");
                false
            }
        }
    }

    /// Number of requests whose result has not been taken yet.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Take one finished result without blocking.
    pub fn try_next(&mut self) -> Option<Resolution> {
        let resolution = self.results.try_recv().ok()?;
        self.in_flight.remove(&resolution.path);
        Some(resolution)
    }

    /// Wait until `deadline` for one finished result.
    pub fn next_before(&mut self, deadline: Instant) -> Option<Resolution> {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.results.recv_timeout(timeout) {
            Ok(resolution) => {
                self.in_flight.remove(&resolution.path);
                Some(resolution)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
