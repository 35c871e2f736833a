//! Finalized data handed to renderers and exporters
//!
//! ```text
//! Report
//! ├─ pilots: Vec<PilotBundle>     one page per pilot
//! ├─ index: IndexBundle           the aggregate page
//! └─ flight_rows: Vec<FlightRow>  flat table, one row per flight
//! ```

use serde::Serialize;

use crate::{
    coverage::SectorCoverage,
    leaderboard::{CrossPilotStats, RankedPilot},
    pilot::FlightRow,
    ranking::MedianStats,
};

/// Everything a single pilot page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PilotBundle {
    #[serde(flatten)]
    pub pilot: RankedPilot,
    /// The pilot's flights in chronological order.
    pub flights: Vec<FlightRow>,
    pub generated_at: String,
    pub latest_flight: String,
    pub flight_count: usize,
}

/// Everything the index page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexBundle {
    /// All pilots in leaderboard order.
    pub pilots: Vec<RankedPilot>,
    pub generated_at: String,
    pub latest_flight: String,
    pub flight_count: usize,
    /// `None` when no pilot has enough turns.
    pub turn_stats: Option<CrossPilotStats>,
    /// `None` when no flight was loaded.
    pub median_stats: Option<MedianStats>,
    pub sectors: Vec<SectorCoverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Pilot bundles in the order pilots first appear in the input.
    pub pilots: Vec<PilotBundle>,
    pub index: IndexBundle,
    /// Rows grouped by pilot, chronological within a pilot.
    pub flight_rows: Vec<FlightRow>,
}

impl Report {
    #[must_use]
    pub fn leaderboard(&self) -> &[RankedPilot] {
        &self.index.pilots
    }
}
