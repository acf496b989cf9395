use chrono::Utc;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::error::SessionError;
use super::session::{RunMode, RunSession, RunStatus};
use crate::metrics::{GeoSample, MetricsOptions, RunSummary};

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Owns a [`RunSession`] and advances its duration from a background task
/// while recording.
pub struct Recorder {
    tick: Duration,
    options: MetricsOptions,
    shared: Arc<StdMutex<RunSession>>,
    worker: Option<WorkerHandle>,
}

impl Recorder {
    /// Every `tick` of wall time counts as one second of run duration.
    pub fn new(tick: Duration, options: MetricsOptions) -> Self {
        Self {
            tick: tick.max(MIN_TICK),
            options,
            shared: Arc::new(StdMutex::new(RunSession::new())),
            worker: None,
        }
    }

    pub fn options(&self) -> &MetricsOptions {
        &self.options
    }

    pub fn status(&self) -> Result<RunStatus, SessionError> {
        lock(&self.shared).status(&self.options)
    }

    pub fn record(&self, sample: GeoSample) -> Result<RunSummary, SessionError> {
        let mut session = lock(&self.shared);
        session.record(sample)?;
        session.summary(&self.options)
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<RunMode, SessionError> {
        if self.worker.is_some() {
            return Err(SessionError::AlreadyRecording);
        }

        let mode = lock(&self.shared).start(Utc::now())?;

        let shared = self.shared.clone();
        let tick = self.tick;
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_ticker(shared, tick, stop_rx));

        self.worker = Some(WorkerHandle { stop_tx, join });
        Ok(mode)
    }

    pub async fn stop(&mut self) -> Result<RunSummary, SessionError> {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            if let Err(e) = worker.join.await {
                log::warn!("ticker task ended abnormally: {}", e);
            }
        }
        lock(&self.shared).stop(&self.options)
    }
}

async fn run_ticker(
    shared: Arc<StdMutex<RunSession>>,
    tick: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = interval_at(Instant::now() + tick, tick);
    log::debug!("ticker started with period {:?}", tick);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                lock(&shared).tick();
            }
            _ = &mut stop_rx => break,
        }
    }

    log::debug!("ticker stopped");
}

fn lock(shared: &StdMutex<RunSession>) -> MutexGuard<'_, RunSession> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
