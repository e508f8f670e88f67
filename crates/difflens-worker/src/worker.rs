//! Latest-wins background diff computation.
//!
//! A [`DiffWorker`] owns a tokio task that receives commands over a bounded
//! channel and runs one computation at a time on the blocking thread pool.
//! Responses flow back over a second channel.
//!
//! Scheduling rules:
//!
//! - A newer request supersedes every older one and starts at once. The
//!   superseded computation is detached: it keeps its blocking thread until
//!   its next stage boundary, and its outcome is never awaited.
//! - [`DiffWorker::cancel`] detaches the in-flight computation without
//!   starting anything new. Cancelled requests produce no further messages.
//! - A panic inside the computation becomes `Failed { Internal }`.
//! - Shutting down stops accepting commands, then waits for the latest
//!   request to finish and deliver its response.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use difflens_engine::{DiffEngine, StageObserver};
use difflens_protocol::{DiffRequest, DiffResponse, FailureKind, RequestId};
use difflens_types::{DiffResult, EngineResult, Stage};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

type ComputeFn = dyn Fn(&DiffRequest, &mut dyn StageObserver) -> EngineResult<DiffResult>
    + Send
    + Sync;

#[derive(Debug)]
enum Command {
    Submit(DiffRequest),
    Cancel,
}

/// Handle to a running background worker.
pub struct DiffWorker {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl DiffWorker {
    /// Start a worker computing with `engine`. Must be called from within a
    /// tokio runtime.
    pub fn spawn(
        engine: DiffEngine,
        config: &WorkerConfig,
    ) -> (Self, mpsc::Receiver<DiffResponse>) {
        Self::spawn_with(config, move |request, observer| {
            engine.compute_observed(&request.left, &request.right, &request.options, observer)
        })
    }

    /// Start a worker around an arbitrary computation.
    pub fn spawn_with<F>(config: &WorkerConfig, compute: F) -> (Self, mpsc::Receiver<DiffResponse>)
    where
        F: Fn(&DiffRequest, &mut dyn StageObserver) -> EngineResult<DiffResult>
            + Send
            + Sync
            + 'static,
    {
        let capacity = config.channel_capacity.max(1);
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let (response_tx, response_rx) = mpsc::channel(capacity);

        let scheduler = Scheduler {
            compute: Arc::new(compute),
            emit_progress: config.emit_progress,
            responses: response_tx,
            generation: Arc::new(AtomicU64::new(0)),
            running: None,
        };
        let task = tokio::spawn(scheduler.run(command_rx));
        info!(capacity, emit_progress = config.emit_progress, "diff worker started");

        (
            Self {
                commands: command_tx,
                task,
            },
            response_rx,
        )
    }

    /// Queue `request`, superseding anything older.
    pub async fn submit(&self, request: DiffRequest) -> WorkerResult<()> {
        self.send(Command::Submit(request)).await
    }

    /// Abandon the in-flight and queued requests.
    pub async fn cancel(&self) -> WorkerResult<()> {
        self.send(Command::Cancel).await
    }

    /// Stop accepting commands and wait for the latest request to finish.
    pub async fn shutdown(self) -> WorkerResult<()> {
        drop(self.commands);
        self.task
            .await
            .map_err(|e| WorkerError::Internal(e.to_string()))
    }

    async fn send(&self, command: Command) -> WorkerResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| WorkerError::Closed)
    }
}

struct Running {
    request_id: RequestId,
    generation: u64,
    handle: JoinHandle<EngineResult<DiffResult>>,
}

struct Scheduler {
    compute: Arc<ComputeFn>,
    emit_progress: bool,
    responses: mpsc::Sender<DiffResponse>,
    /// Bumped by every submit and cancel; a computation is current only
    /// while this still equals the value it started with.
    generation: Arc<AtomicU64>,
    running: Option<Running>,
}

impl Scheduler {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut closing = false;
        loop {
            tokio::select! {
                biased;
                command = commands.recv(), if !closing => match command {
                    Some(Command::Submit(request)) => self.submit(request),
                    Some(Command::Cancel) => self.cancel(),
                    None => {
                        debug!("command channel closed, draining");
                        closing = true;
                    }
                },
                joined = join(&mut self.running), if self.running.is_some() => {
                    self.finish(joined).await;
                }
                else => break,
            }
            if self.responses.is_closed() {
                warn!("response receiver dropped, stopping worker");
                break;
            }
        }
        info!("diff worker stopped");
    }

    fn submit(&mut self, request: DiffRequest) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(request_id = %request.request_id, generation, "request received");

        self.detach("superseded");
        self.start(request, generation);
    }

    fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.detach("cancelled");
    }

    /// Stop tracking the in-flight computation. Its generation is already
    /// stale, so it stops at its next stage boundary and stays silent.
    fn detach(&mut self, reason: &'static str) {
        if let Some(running) = self.running.take() {
            debug!(request_id = %running.request_id, reason, "in-flight request detached");
            drop(running.handle);
        }
    }

    fn start(&mut self, request: DiffRequest, generation: u64) {
        let request_id = request.request_id.clone();
        debug!(%request_id, bytes = request.input_bytes(), "computation started");

        let mut reporter = ProgressReporter {
            request_id: request_id.clone(),
            generation,
            current: Arc::clone(&self.generation),
            responses: self.emit_progress.then(|| self.responses.clone()),
        };
        let compute = Arc::clone(&self.compute);
        let handle = tokio::task::spawn_blocking(move || compute(&request, &mut reporter));

        self.running = Some(Running {
            request_id,
            generation,
            handle,
        });
    }

    async fn finish(&mut self, joined: Result<EngineResult<DiffResult>, JoinError>) {
        let Some(running) = self.running.take() else {
            return;
        };
        let request_id = running.request_id;

        if running.generation != self.generation.load(Ordering::Acquire) {
            debug!(%request_id, "discarding outcome of superseded request");
        } else {
            let response = match joined {
                Ok(Ok(result)) => {
                    debug!(
                        %request_id,
                        added = result.stats.added,
                        removed = result.stats.removed,
                        "computation completed"
                    );
                    DiffResponse::Completed { request_id, result }
                }
                Ok(Err(err)) => {
                    debug!(%request_id, error = %err, "computation failed");
                    DiffResponse::failed(request_id, &err)
                }
                Err(err) => {
                    let description = panic_message(err);
                    warn!(%request_id, %description, "computation panicked");
                    DiffResponse::Failed {
                        request_id,
                        failure: FailureKind::Internal,
                        description: format!("diff computation panicked: {description}"),
                    }
                }
            };
            let _ = self.responses.send(response).await;
        }
    }
}

/// Resolves when the running computation ends; never resolves when idle.
async fn join(running: &mut Option<Running>) -> Result<EngineResult<DiffResult>, JoinError> {
    match running {
        Some(running) => (&mut running.handle).await,
        None => std::future::pending().await,
    }
}

fn panic_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload: Box<dyn Any + Send> = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// Forwards stage notifications from the blocking thread and tells the
/// engine to stop once its request has been superseded.
struct ProgressReporter {
    request_id: RequestId,
    generation: u64,
    current: Arc<AtomicU64>,
    responses: Option<mpsc::Sender<DiffResponse>>,
}

impl StageObserver for ProgressReporter {
    fn on_stage(&mut self, stage: Stage) {
        if self.is_cancelled() {
            return;
        }
        if let Some(responses) = &self.responses {
            let _ = responses.blocking_send(DiffResponse::Progress {
                request_id: self.request_id.clone(),
                stage,
            });
        }
    }

    fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }
}
