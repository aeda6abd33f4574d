// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory FIFO job queue for network printers.
//
// `submit` never blocks: it appends the job and, if no drain is running,
// spawns one.  The drain task prints one job at a time with a fixed
// simulated delay and exits when the queue is empty.  The `in_flight` flag,
// only ever read or written under the queue mutex, guarantees a single drain
// per queue.
//
// The queue is unbounded.  There is no backpressure: a burst of submissions
// is held in memory until the drain catches up.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, instrument};

use spoolwerk_core::error::{Result, SpoolError};
use spoolwerk_core::types::{DeviceEvent, DeviceKind, Job, JobId, JobReceipt};

use crate::events::EventBus;

/// A queued job together with the channel its receipt is delivered on.
struct PendingJob {
    job: Job,
    done: oneshot::Sender<JobReceipt>,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<PendingJob>,
    in_flight: bool,
}

/// Lock the queue state.  A panic while holding the lock cannot leave the
/// deque half-modified, so a poisoned lock is recovered.
fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Completion handle returned by [`JobQueue::submit`].
#[derive(Debug)]
pub struct JobHandle {
    job_id: JobId,
    completion: oneshot::Receiver<JobReceipt>,
}

impl JobHandle {
    /// Id carried by this job's `Queued`, `PrintStarted` and `PrintFinished`
    /// events.
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Wait until the job has finished printing.
    ///
    /// Fails only if the drain task was dropped before reaching this job,
    /// which happens when the runtime shuts down.
    pub async fn wait(self) -> Result<JobReceipt> {
        self.completion.await.map_err(|_| {
            SpoolError::Runtime(format!("print job {} abandoned before completion", self.job_id))
        })
    }
}

/// Serialized job queue owned by one network printer.
///
/// All mutation goes through [`submit`] and the drain task it spawns.
///
/// [`submit`]: JobQueue::submit
pub struct JobQueue {
    state: Arc<Mutex<QueueState>>,
    events: EventBus,
    print_delay: Duration,
    runtime: Handle,
}

impl JobQueue {
    /// Create an empty queue bound to the current tokio runtime.
    ///
    /// Must be called from within a runtime; the drain task is spawned on it.
    pub fn new(print_delay: Duration, events: EventBus) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| SpoolError::Runtime(e.to_string()))?;
        Ok(Self::with_runtime(print_delay, events, runtime))
    }

    /// Create an empty queue whose drain task runs on `runtime`.
    pub fn with_runtime(print_delay: Duration, events: EventBus, runtime: Handle) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            events,
            print_delay,
            runtime,
        }
    }

    /// Append a document to the tail of the queue and start draining if idle.
    #[instrument(skip(self, document))]
    pub fn submit(&self, document: impl Into<String>) -> JobHandle {
        let job = Job::new(document);
        let (done, completion) = oneshot::channel();
        let handle = JobHandle {
            job_id: job.id,
            completion,
        };

        let start_drain = {
            let mut state = lock(&self.state);
            // Emitted under the lock so it can never trail the job's start.
            self.events.emit(DeviceEvent::Queued {
                device: DeviceKind::Network,
                job_id: job.id,
                document: job.document.clone(),
                document_hash: job.document_hash.clone(),
                depth: state.pending.len() + 1,
            });
            state.pending.push_back(PendingJob { job, done });

            if state.in_flight {
                false
            } else {
                state.in_flight = true;
                true
            }
        };

        if start_drain {
            debug!("queue idle, starting drain");
            self.runtime.spawn(drain(
                Arc::clone(&self.state),
                self.events.clone(),
                self.print_delay,
            ));
        }

        handle
    }

    /// Number of jobs waiting behind the one currently printing.
    pub fn pending(&self) -> usize {
        lock(&self.state).pending.len()
    }

    /// Whether a drain is active.
    pub fn is_printing(&self) -> bool {
        lock(&self.state).in_flight
    }

    /// Fixed simulated time spent on each job.
    pub fn print_delay(&self) -> Duration {
        self.print_delay
    }
}

/// Print jobs from the head of the queue until it is empty.
async fn drain(state: Arc<Mutex<QueueState>>, events: EventBus, print_delay: Duration) {
    loop {
        let next = {
            let mut guard = lock(&state);
            match guard.pending.pop_front() {
                Some(next) => next,
                None => {
                    guard.in_flight = false;
                    debug!("queue empty, drain finished");
                    return;
                }
            }
        };

        let PendingJob { job, done } = next;
        let started_at = Utc::now();
        events.emit(DeviceEvent::PrintStarted {
            device: DeviceKind::Network,
            job_id: job.id,
            document: job.document.clone(),
            document_hash: job.document_hash.clone(),
            client: None,
        });

        tokio::time::sleep(print_delay).await;

        events.emit(DeviceEvent::PrintFinished {
            device: DeviceKind::Network,
            job_id: job.id,
            document: job.document.clone(),
            document_hash: job.document_hash.clone(),
            client: None,
        });

        let job_id = job.id;
        let receipt = job.into_receipt(DeviceKind::Network, None, started_at);
        if done.send(receipt).is_err() {
            debug!(job_id = %job_id, "job handle dropped before completion");
        }
    }
}
