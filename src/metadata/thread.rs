use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{error, trace, warn};

use super::probe::probe_duration;
use super::types::{Length, ResolveJob, Resolution};

/// Spawn `count` detached workers sharing one job queue and return how many
/// started. A worker exits when the job sender is dropped or nobody listens
/// for results any more.
pub(super) fn spawn_resolver_threads(
    count: usize,
    jobs: Receiver<ResolveJob>,
    results: Sender<Resolution>,
) -> usize {
    let jobs = Arc::new(Mutex::new(jobs));

    (0..count)
        .filter_map(|i| {
            let jobs = Arc::clone(&jobs);
            let results = results.clone();
            thread::Builder::new()
                .name(format!("length-resolver-{i}"))
                .spawn(move || worker_loop(&jobs, &results))
                .map_err(|e| error!(error = %e, "failed to spawn resolver thread"))
                .ok()
        })
        .count()
}

fn worker_loop(jobs: &Mutex<Receiver<ResolveJob>>, results: &Sender<Resolution>) {
    loop {
        // Only the queue read happens under the lock; probing runs unlocked.
        let job = match jobs.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => return,
        };
        let Ok(job) = job else {
            return;
        };

        let length = match probe_duration(&job.path, job.kind) {
            Ok(d) => Length::Known(d),
            Err(e) => {
                warn!(error = %e, "duration probe failed");
                Length::Unknown
            }
        };
        trace!(path = %job.path.display(), %length, "resolved");

        if results
            .send(Resolution {
                path: job.path,
                length,
            })
            .is_err()
        {
            return;
        }
    }
}
