use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::error::SessionError;
use crate::metrics::{summarize_with, GeoSample, MetricsOptions, RunSummary};

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub enum RunMode {
    Idle,
    Recording { id: Uuid, started_at: DateTime<Utc> },
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RunStatus {
    pub mode: RunMode,
    pub last_sample: Option<GeoSample>,
    pub samples: Vec<GeoSample>,
    pub duration_seconds: u64,
    pub summary: RunSummary,
}

/// One recording session, owned by the caller.
///
/// Samples are append-only while recording and stay readable after
/// [`RunSession::stop`] until the next [`RunSession::start`].
#[derive(Debug, Clone)]
pub struct RunSession {
    mode: RunMode,
    samples: Vec<GeoSample>,
    duration_seconds: u64,
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSession {
    pub fn new() -> Self {
        Self {
            mode: RunMode::Idle,
            samples: Vec::new(),
            duration_seconds: 0,
        }
    }

    pub fn mode(&self) -> &RunMode {
        &self.mode
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.mode, RunMode::Recording { .. })
    }

    pub fn samples(&self) -> &[GeoSample] {
        &self.samples
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<RunMode, SessionError> {
        if self.is_recording() {
            return Err(SessionError::AlreadyRecording);
        }

        self.samples.clear();
        self.duration_seconds = 0;
        self.mode = RunMode::Recording {
            id: Uuid::new_v4(),
            started_at: now,
        };
        log::info!("run started: {:?}", self.mode);

        Ok(self.mode.clone())
    }

    pub fn record(&mut self, sample: GeoSample) -> Result<(), SessionError> {
        if !self.is_recording() {
            return Err(SessionError::NotRecording);
        }
        if !sample.is_valid() {
            return Err(SessionError::InvalidSample(format!(
                "coordinates out of range: ({}, {})",
                sample.latitude, sample.longitude
            )));
        }
        if let Some(last) = self.samples.last() {
            if sample.timestamp < last.timestamp {
                return Err(SessionError::OutOfOrder {
                    last: last.timestamp,
                    got: sample.timestamp,
                });
            }
        }

        self.samples.push(sample);
        Ok(())
    }

    /// One second of elapsed time. Ticks outside a recording are dropped.
    pub fn tick(&mut self) {
        if self.is_recording() {
            self.duration_seconds += 1;
        }
    }

    pub fn stop(&mut self, options: &MetricsOptions) -> Result<RunSummary, SessionError> {
        if !self.is_recording() {
            return Err(SessionError::NotRecording);
        }
        self.mode = RunMode::Idle;

        let summary = self.summary(options)?;
        log::info!(
            "run stopped: {} samples, {:.2} km in {}",
            self.samples.len(),
            summary.distance_km,
            summary.duration
        );
        Ok(summary)
    }

    pub fn summary(&self, options: &MetricsOptions) -> Result<RunSummary, SessionError> {
        Ok(summarize_with(options, &self.samples, self.duration_seconds)?)
    }

    pub fn status(&self, options: &MetricsOptions) -> Result<RunStatus, SessionError> {
        Ok(RunStatus {
            mode: self.mode.clone(),
            last_sample: self.samples.last().copied(),
            samples: self.samples.clone(),
            duration_seconds: self.duration_seconds,
            summary: self.summary(options)?,
        })
    }
}
