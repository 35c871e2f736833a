//! Run configuration
//!
//! Everything the pipeline would otherwise read from ambient state is passed
//! in explicitly: the ranking categories, site names, per-pilot bonus table
//! and the run timestamp.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{category::StatCategory, flight::PilotId};

/// Tunable parameters of one pipeline run.
///
/// Every field has a default, so an empty configuration file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Categories the population ranking model tracks.
    pub categories: Vec<StatCategory>,
    /// Takeoff sites whose flights are counted per pilot.
    pub tracked_sites: Vec<String>,
    /// The only takeoff eligible for hike-and-fly detection.
    pub hike_site: String,
    /// Word the hike-and-fly classifier looks for in the pilot's comments.
    pub hike_keyword: String,
    /// Manual score adjustments, pilot id to bonus.
    pub score_adjustments: BTreeMap<PilotId, i32>,
    /// Pilots need strictly more combined turns than this to enter the
    /// cross-pilot turn statistics.
    pub min_turns_for_bias_stats: u32,
    /// Prefix of the public flight URL; the flight id is appended.
    pub flight_url_base: String,
    /// Shown as latest flight when no flight was loaded.
    pub no_flight_placeholder: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            categories: StatCategory::ALL.to_vec(),
            tracked_sites: vec!["Schauinsland".to_owned(), "Lindenberg".to_owned()],
            hike_site: "Schauinsland".to_owned(),
            hike_keyword: "hike".to_owned(),
            score_adjustments: BTreeMap::new(),
            min_turns_for_bias_stats: 100,
            flight_url_base: "https://de.dhv-xc.de/flight/".to_owned(),
            no_flight_placeholder: "(noch keinen gesehen)".to_owned(),
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn bonus_for(&self, pilot_id: &PilotId) -> i32 {
        self.score_adjustments.get(pilot_id).copied().unwrap_or(0)
    }
}

/// Values fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub generated_at: NaiveDateTime,
}

impl RunContext {
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    #[must_use]
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self { generated_at }
    }

    #[must_use]
    pub fn generated_at_display(&self) -> String {
        self.generated_at
            .format(Self::TIMESTAMP_FORMAT)
            .to_string()
    }
}
