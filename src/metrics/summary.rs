use serde::{Deserialize, Serialize};

use super::distance::total_distance_filtered;
use super::error::MetricsError;
use super::format::{calculate_pace_with_floor, format_duration};
use super::sample::GeoSample;

/// Optional noise handling. The defaults disable both thresholds, which
/// reproduces the plain distance sum and pace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MetricsOptions {
    /// Segments shorter than this are ignored by the distance sum.
    #[serde(default)]
    pub min_segment_km: f64,
    /// Below this distance the pace shows the placeholder.
    #[serde(default)]
    pub min_pace_distance_km: f64,
}

/// Display-ready values for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RunSummary {
    pub distance_km: f64,
    pub duration_seconds: u64,
    pub duration: String,
    pub pace: String,
}

pub fn summarize(samples: &[GeoSample], duration_seconds: u64) -> Result<RunSummary, MetricsError> {
    summarize_with(&MetricsOptions::default(), samples, duration_seconds)
}

pub fn summarize_with(
    options: &MetricsOptions,
    samples: &[GeoSample],
    duration_seconds: u64,
) -> Result<RunSummary, MetricsError> {
    let seconds = i64::try_from(duration_seconds).map_err(|_| {
        MetricsError::InvalidArgument(format!("duration too large: {duration_seconds}s"))
    })?;

    let distance_km = total_distance_filtered(samples, options.min_segment_km);
    let duration = format_duration(seconds)?;
    let pace = calculate_pace_with_floor(
        distance_km,
        duration_seconds,
        options.min_pace_distance_km,
    );

    Ok(RunSummary {
        distance_km,
        duration_seconds,
        duration,
        pace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{total_distance, PACE_PLACEHOLDER};

    #[test]
    fn empty_run() {
        let summary = summarize(&[], 0).unwrap();
        assert_eq!(summary.distance_km, 0.0);
        assert_eq!(summary.duration, "0:00");
        assert_eq!(summary.pace, PACE_PLACEHOLDER);
    }

    #[test]
    fn equator_run() {
        let samples = [GeoSample::new(0.0, 0.0, 0), GeoSample::new(0.0, 1.0, 3_661_000)];
        let summary = summarize(&samples, 3661).unwrap();
        assert_eq!(summary.distance_km, total_distance(&samples));
        assert_eq!(summary.duration, "1:01:01");
        assert_eq!(summary.duration_seconds, 3661);
        // 61.0167 min over 111.19 km
        assert_eq!(summary.pace, "0:32");
    }

    #[test]
    fn options_apply_thresholds() {
        let samples = [GeoSample::new(0.0, 0.0, 0), GeoSample::new(0.0, 0.00001, 1_000)];
        let options = MetricsOptions {
            min_segment_km: 0.005,
            min_pace_distance_km: 0.0,
        };
        let summary = summarize_with(&options, &samples, 10).unwrap();
        assert_eq!(summary.distance_km, 0.0);
        assert_eq!(summary.pace, PACE_PLACEHOLDER);
    }

    #[test]
    fn oversized_duration_is_rejected() {
        assert!(summarize(&[], u64::MAX).is_err());
    }
}
