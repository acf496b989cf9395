use super::error::MetricsError;

/// Shown instead of a pace when no distance has been covered.
pub const PACE_PLACEHOLDER: &str = "--:--";

/// Formats elapsed seconds as `H:MM:SS`, or `M:SS` under an hour.
pub fn format_duration(total_seconds: i64) -> Result<String, MetricsError> {
    if total_seconds < 0 {
        return Err(MetricsError::InvalidArgument(format!(
            "duration must not be negative, got {total_seconds}s"
        )));
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        Ok(format!("{hours}:{minutes:02}:{seconds:02}"))
    } else {
        Ok(format!("{minutes}:{seconds:02}"))
    }
}

/// Average pace as `M:SS` per kilometre.
pub fn calculate_pace(distance_km: f64, duration_seconds: u64) -> String {
    // Negative or non-finite distances never come out of the distance sum;
    // they get the placeholder rather than a nonsense pace.
    if distance_km == 0.0 || !distance_km.is_finite() || distance_km < 0.0 {
        return PACE_PLACEHOLDER.to_string();
    }

    let minutes_per_km = (duration_seconds as f64 / 60.0) / distance_km;
    let minutes = minutes_per_km.floor();
    let seconds = ((minutes_per_km - minutes) * 60.0).floor();

    format!("{}:{:02}", minutes as u64, seconds as u64)
}

/// [`calculate_pace`] that also shows the placeholder while the distance is
/// below `min_distance_km`, so a few metres of GPS jitter don't produce a
/// pace of hundreds of minutes.
pub fn calculate_pace_with_floor(
    distance_km: f64,
    duration_seconds: u64,
    min_distance_km: f64,
) -> String {
    if distance_km < min_distance_km {
        return PACE_PLACEHOLDER.to_string();
    }
    calculate_pace(distance_km, duration_seconds)
}
