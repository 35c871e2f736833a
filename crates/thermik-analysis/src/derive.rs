//! Per-flight derived metrics
//!
//! Every field here is a pure function of one flight's record and raw stats.
//! Nothing depends on other flights.

use chrono::Timelike as _;
use serde::{Deserialize, Serialize};
use thermik_stats::rounding::{round_half_even, round_to_integer};

use crate::flight::{FlightRecord, RawStats};

const METERS_PER_SECOND_TO_KMH: f64 = 3.6;

/// Derived statistics attached to each flight.
///
/// Speeds are in km/h, climb rates in m/s rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// `|left_turns - right_turns|`
    pub turn_excess: u32,
    /// Flight duration in seconds.
    pub duration: i64,
    pub max_altitude: f64,
    /// Seconds since midnight of the takeoff time.
    pub start_time_seconds: u32,
    /// Number of distinct sectors visited.
    pub sector_count: usize,
    pub pretty_duration: String,
    pub xc_score: i64,
    pub max_speed: i64,
    pub avg_speed: i64,
    pub max_climb: f64,
    pub min_climb: f64,
    /// Composite outlier score, set once the population is scored.
    pub score: Option<f64>,
}

impl DerivedStats {
    #[must_use]
    pub fn derive(record: &FlightRecord, raw: &RawStats) -> Self {
        Self {
            turn_excess: raw.left_turns.abs_diff(raw.right_turns),
            duration: record.duration_seconds,
            max_altitude: record.max_altitude,
            start_time_seconds: record.start_time.time().num_seconds_from_midnight(),
            sector_count: count_distinct(&raw.sectors),
            pretty_duration: pretty_duration(record.duration_seconds),
            xc_score: round_to_integer(record.task_points),
            max_speed: to_kmh(record.max_speed),
            avg_speed: to_kmh(record.task_speed),
            max_climb: round_half_even(record.max_climb, 1),
            min_climb: round_half_even(record.min_climb, 1),
            score: None,
        }
    }
}

fn to_kmh(meters_per_second: f64) -> i64 {
    round_to_integer(meters_per_second * METERS_PER_SECOND_TO_KMH)
}

fn count_distinct(sectors: &[String]) -> usize {
    let mut sorted = sectors.iter().collect::<Vec<_>>();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

/// Formats a duration for display.
///
/// Below a minute as seconds, below an hour as whole minutes, otherwise as
/// hours and minutes.
///
/// ```
/// use thermik_analysis::derive::pretty_duration;
///
/// assert_eq!(pretty_duration(42), "42s");
/// assert_eq!(pretty_duration(119), "1 min");
/// assert_eq!(pretty_duration(3 * 3600 + 5 * 60 + 59), "3 h 5 min");
/// ```
#[must_use]
pub fn pretty_duration(seconds: i64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 60 * 60 {
        format!("{} min", seconds / 60)
    } else {
        format!("{} h {} min", seconds / 3600, (seconds % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::test_util;

    #[test]
    fn test_pretty_duration_boundaries() {
        assert_eq!(pretty_duration(0), "0s");
        assert_eq!(pretty_duration(59), "59s");
        assert_eq!(pretty_duration(60), "1 min");
        assert_eq!(pretty_duration(3599), "59 min");
        assert_eq!(pretty_duration(3600), "1 h 0 min");
        assert_eq!(pretty_duration(7322), "2 h 2 min");
    }

    #[test]
    fn test_derive_from_record() {
        let mut record = test_util::record("1", "p", "2024-06-01 11:02:03");
        record.duration_seconds = 5400;
        record.max_speed = 12.5;
        record.task_speed = 6.0;
        record.max_climb = 3.14;
        record.min_climb = -2.66;
        record.task_points = 41.5;
        let raw = test_util::stats(50, 30, &["B2", "A1", "B2"]);

        let derived = DerivedStats::derive(&record, &raw);
        assert_eq!(derived.turn_excess, 20);
        assert_eq!(derived.duration, 5400);
        assert_eq!(derived.start_time_seconds, 11 * 3600 + 2 * 60 + 3);
        assert_eq!(derived.sector_count, 2);
        assert_eq!(derived.pretty_duration, "1 h 30 min");
        assert_eq!(derived.max_speed, 45);
        assert_eq!(derived.avg_speed, 22);
        assert_eq!(derived.max_climb, 3.1);
        assert_eq!(derived.min_climb, -2.7);
        assert_eq!(derived.xc_score, 42);
        assert_eq!(derived.score, None);
    }

    #[test]
    fn test_climb_rounding_follows_decimal_value() {
        let mut record = test_util::record("1", "p", "2024-06-01 11:00:00");
        record.max_climb = 1.15;
        record.min_climb = -0.35;
        let derived = DerivedStats::derive(&record, &test_util::stats(0, 0, &[]));
        assert_eq!(derived.max_climb, 1.1);
        assert_eq!(derived.min_climb, -0.3);
    }

    #[test]
    fn test_turn_excess_is_symmetric() {
        let record = test_util::record("1", "p", "2024-06-01 11:00:00");
        let left = DerivedStats::derive(&record, &test_util::stats(10, 4, &[]));
        let right = DerivedStats::derive(&record, &test_util::stats(4, 10, &[]));
        assert_eq!(left.turn_excess, 6);
        assert_eq!(right.turn_excess, 6);
    }
}
