use serde::Deserialize;
use std::path::Path;

use super::error::TrackError;
use crate::metrics::{summarize_with, GeoSample, MetricsOptions, RunSummary};

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    duration_seconds: Option<u64>,
    #[serde(default)]
    duration: Option<String>,
    samples: Vec<GeoSample>,
}

/// A recorded run loaded from a YAML or JSON file.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: Option<String>,
    pub samples: Vec<GeoSample>,
    duration_seconds: u64,
}

impl Track {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded track file {}", path.as_ref().display());
        Self::from_str(&content)
    }

    pub fn from_str(text: &str) -> Result<Self, TrackError> {
        let raw: RawTrack = serde_yaml::from_str(text)?;

        for (i, sample) in raw.samples.iter().enumerate() {
            if !sample.is_valid() {
                return Err(TrackError::Sample(i, "coordinates out of range".into()));
            }
        }
        for (i, pair) in raw.samples.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(TrackError::Sample(
                    i + 1,
                    "timestamp earlier than the previous sample".into(),
                ));
            }
        }

        let duration_seconds = match (raw.duration_seconds, raw.duration.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(TrackError::Validation(
                    "give either 'duration_seconds' or 'duration', not both".into(),
                ))
            }
            (Some(seconds), None) => seconds,
            (None, Some(text)) => parse_duration(text)?,
            (None, None) => span_seconds(&raw.samples),
        };

        Ok(Track {
            name: raw.name,
            samples: raw.samples,
            duration_seconds,
        })
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn summary(&self, options: &MetricsOptions) -> Result<RunSummary, TrackError> {
        Ok(summarize_with(options, &self.samples, self.duration_seconds)?)
    }
}

fn parse_duration(text: &str) -> Result<u64, TrackError> {
    humantime::parse_duration(text.trim())
        .map(|d| d.as_secs())
        .map_err(|e| TrackError::Validation(format!("duration '{}': {}", text, e)))
}

/// Whole seconds between the first and last sample.
fn span_seconds(samples: &[GeoSample]) -> u64 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => {
            u64::try_from(last.timestamp.saturating_sub(first.timestamp) / 1000).unwrap_or(0)
        }
        _ => 0,
    }
}
