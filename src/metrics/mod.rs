//! Run metrics: distance, duration and pace derived from a GPS trace.
//!
//! Everything here is a pure function over data the caller already holds.

mod distance;
mod error;
mod format;
mod sample;
mod summary;

pub use distance::{haversine_km, total_distance, total_distance_filtered, EARTH_RADIUS_KM};
pub use error::MetricsError;
pub use format::{calculate_pace, calculate_pace_with_floor, format_duration, PACE_PLACEHOLDER};
pub use sample::GeoSample;
pub use summary::{summarize, summarize_with, MetricsOptions, RunSummary};
