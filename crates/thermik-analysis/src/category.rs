use serde::{Deserialize, Serialize};

use crate::derive::DerivedStats;

/// A statistic the population ranking model tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    #[display("duration")]
    Duration,
    #[display("turn_excess")]
    TurnExcess,
    #[display("sector_count")]
    SectorCount,
    #[display("max_altitude")]
    MaxAltitude,
    #[display("xc_score")]
    XcScore,
    #[display("max_speed")]
    MaxSpeed,
    #[display("avg_speed")]
    AvgSpeed,
    #[display("max_climb")]
    MaxClimb,
    #[display("min_climb")]
    MinClimb,
}

impl StatCategory {
    pub const ALL: [StatCategory; 9] = [
        StatCategory::Duration,
        StatCategory::TurnExcess,
        StatCategory::SectorCount,
        StatCategory::MaxAltitude,
        StatCategory::XcScore,
        StatCategory::MaxSpeed,
        StatCategory::AvgSpeed,
        StatCategory::MaxClimb,
        StatCategory::MinClimb,
    ];

    /// Reads this category's value from a flight's derived stats.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn value(self, stats: &DerivedStats) -> f64 {
        match self {
            StatCategory::Duration => stats.duration as f64,
            StatCategory::TurnExcess => f64::from(stats.turn_excess),
            StatCategory::SectorCount => stats.sector_count as f64,
            StatCategory::MaxAltitude => stats.max_altitude,
            StatCategory::XcScore => stats.xc_score as f64,
            StatCategory::MaxSpeed => stats.max_speed as f64,
            StatCategory::AvgSpeed => stats.avg_speed as f64,
            StatCategory::MaxClimb => stats.max_climb,
            StatCategory::MinClimb => stats.min_climb,
        }
    }
}
