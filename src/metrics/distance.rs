use super::sample::GeoSample;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two samples in kilometres.
pub fn haversine_km(from: &GeoSample, to: &GeoSample) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat_rad().cos() * to.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of the haversine distances between consecutive samples, in order.
///
/// Every pair contributes, including GPS jitter. Fewer than two samples
/// covers no distance.
pub fn total_distance(samples: &[GeoSample]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    samples
        .windows(2)
        .map(|pair| haversine_km(&pair[0], &pair[1]))
        .fold(0.0, |total, segment| total + segment)
}

/// Like [`total_distance`], but segments shorter than `min_segment_km` are
/// dropped. A threshold of zero (or below) counts every segment.
pub fn total_distance_filtered(samples: &[GeoSample], min_segment_km: f64) -> f64 {
    if min_segment_km <= 0.0 {
        return total_distance(samples);
    }
    if samples.len() < 2 {
        return 0.0;
    }

    samples
        .windows(2)
        .map(|pair| haversine_km(&pair[0], &pair[1]))
        .filter(|segment| *segment >= min_segment_km)
        .fold(0.0, |total, segment| total + segment)
}
