//! Per-pilot aggregation
//!
//! A pilot's flights are folded in chronological order into lifetime
//! counters. Along the way each flight gets a presentation row
//! ([`FlightRow`]) that records which sectors it covered for the first time.
//!
//! ```text
//! flights (sorted by start time)
//!     ↓  mark best flight (minimal composite score, first wins)
//!     ↓  fold: covered sectors, site counts, turns, hikes, photos
//!     ↓  finalize: turn bias from final totals
//! PilotAggregate { summary, rows, covered sectors }
//! ```

use std::collections::BTreeSet;

use serde::Serialize;
use thermik_stats::descriptive::first_min_by;

use crate::{
    AnalysisError,
    config::RunConfig,
    derive::pretty_duration,
    flight::{Flight, FlightId, FlightRecord, PilotId},
    hike::{CommentSource, HikeClassifier, is_hike_and_fly},
};

/// Net turn direction over a pilot's flight history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum TurnBias {
    #[display("left-biased")]
    Left,
    #[display("right-biased")]
    Right,
    #[display("neutral")]
    Neutral,
}

impl TurnBias {
    #[must_use]
    pub fn from_turns(left: u32, right: u32) -> Self {
        match left.cmp(&right) {
            std::cmp::Ordering::Greater => TurnBias::Left,
            std::cmp::Ordering::Less => TurnBias::Right,
            std::cmp::Ordering::Equal => TurnBias::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCount {
    pub site: String,
    pub flights: u32,
}

/// Lifetime counters of one pilot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PilotStats {
    pub flight_time_seconds: i64,
    pub pretty_flight_time: String,
    pub site_flights: Vec<SiteCount>,
    pub hikes: u32,
    pub photo_flights: u32,
    /// Distinct sectors covered over all flights.
    pub sectors: usize,
    pub turn_bias: TurnBias,
    pub turn_excess: u32,
    pub left_turns: u32,
    pub right_turns: u32,
    pub bonus: i32,
}

/// Presentation record of one flight; also one row of the flat export.
///
/// Field order is the export's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRow {
    pub pilot_id: PilotId,
    pub name: String,
    /// 1-based position in the pilot's chronological sequence.
    pub n: usize,
    pub id: FlightId,
    /// `dd.mm.`
    pub date: String,
    pub site: String,
    pub duration_seconds: i64,
    /// Sectors covered for the first time, sorted and space-separated.
    pub new_sectors: String,
    pub new_sector_count: usize,
    pub photos: bool,
    pub hike: bool,
    pub left_turns: u32,
    pub right_turns: u32,
    pub sectors: String,
    pub landing_distance: Option<f64>,
    pub turn_excess: u32,
    pub duration: i64,
    pub max_altitude: f64,
    pub start_time_seconds: u32,
    pub sector_count: usize,
    pub pretty_duration: String,
    pub xc_score: i64,
    pub max_speed: i64,
    pub avg_speed: i64,
    pub max_climb: f64,
    pub min_climb: f64,
    pub score: f64,
    pub is_best: bool,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PilotSummary {
    pub pilot_id: PilotId,
    pub name: String,
    pub stats: PilotStats,
    /// The pilot's most typical flight.
    pub best_flight: FlightRow,
}

impl PilotSummary {
    #[must_use]
    pub fn best_score(&self) -> f64 {
        self.best_flight.score
    }
}

/// Result of folding one pilot's flights.
#[derive(Debug, Clone)]
pub struct PilotAggregate {
    pub summary: PilotSummary,
    pub rows: Vec<FlightRow>,
    pub covered_sectors: BTreeSet<String>,
}

#[derive(Debug)]
struct PilotFold<'a> {
    config: &'a RunConfig,
    pilot_id: PilotId,
    name: String,
    covered: BTreeSet<String>,
    flight_time_seconds: i64,
    site_flights: Vec<SiteCount>,
    hikes: u32,
    photo_flights: u32,
    left_turns: u32,
    right_turns: u32,
    rows: Vec<FlightRow>,
}

impl<'a> PilotFold<'a> {
    fn new(config: &'a RunConfig, pilot_id: PilotId, name: String) -> Self {
        let site_flights = config
            .tracked_sites
            .iter()
            .map(|site| SiteCount {
                site: site.clone(),
                flights: 0,
            })
            .collect();
        Self {
            config,
            pilot_id,
            name,
            covered: BTreeSet::new(),
            flight_time_seconds: 0,
            site_flights,
            hikes: 0,
            photo_flights: 0,
            left_turns: 0,
            right_turns: 0,
            rows: vec![],
        }
    }

    fn push(&mut self, flight: &Flight, hike: bool) -> Result<(), AnalysisError> {
        let record = &flight.record;
        let score = flight
            .derived
            .score
            .ok_or_else(|| AnalysisError::malformed(&record.id, "score", "flight was not scored"))?;

        self.left_turns = add_turns(self.left_turns, flight.raw.left_turns, record, "left_turns")?;
        self.right_turns =
            add_turns(self.right_turns, flight.raw.right_turns, record, "right_turns")?;

        let new_sectors = flight
            .raw
            .sectors
            .iter()
            .filter(|s| !self.covered.contains(*s))
            .cloned()
            .collect::<BTreeSet<_>>();
        self.covered.extend(new_sectors.iter().cloned());

        self.flight_time_seconds += record.duration_seconds;
        for count in &mut self.site_flights {
            if count.site == record.takeoff {
                count.flights += 1;
            }
        }
        if hike {
            self.hikes += 1;
        }
        let photos = record.has_photos();
        if photos {
            self.photo_flights += 1;
        }

        let derived = &flight.derived;
        self.rows.push(FlightRow {
            pilot_id: self.pilot_id.clone(),
            name: self.name.clone(),
            n: self.rows.len() + 1,
            id: record.id.clone(),
            date: record.date.format("%d.%m.").to_string(),
            site: record.takeoff.clone(),
            duration_seconds: record.duration_seconds,
            new_sector_count: new_sectors.len(),
            new_sectors: join_sorted(&new_sectors),
            photos,
            hike,
            left_turns: flight.raw.left_turns,
            right_turns: flight.raw.right_turns,
            sectors: flight.raw.sectors.join(" "),
            landing_distance: flight.raw.landing_distance,
            turn_excess: derived.turn_excess,
            duration: derived.duration,
            max_altitude: derived.max_altitude,
            start_time_seconds: derived.start_time_seconds,
            sector_count: derived.sector_count,
            pretty_duration: derived.pretty_duration.clone(),
            xc_score: derived.xc_score,
            max_speed: derived.max_speed,
            avg_speed: derived.avg_speed,
            max_climb: derived.max_climb,
            min_climb: derived.min_climb,
            score,
            is_best: flight.is_best,
            url: format!("{}{}", self.config.flight_url_base, record.id),
        });
        Ok(())
    }

    fn finish(self, best_index: usize) -> PilotAggregate {
        let turn_bias = TurnBias::from_turns(self.left_turns, self.right_turns);
        let stats = PilotStats {
            flight_time_seconds: self.flight_time_seconds,
            pretty_flight_time: pretty_duration(self.flight_time_seconds),
            site_flights: self.site_flights,
            hikes: self.hikes,
            photo_flights: self.photo_flights,
            sectors: self.covered.len(),
            turn_bias,
            turn_excess: self.left_turns.abs_diff(self.right_turns),
            left_turns: self.left_turns,
            right_turns: self.right_turns,
            bonus: self.config.bonus_for(&self.pilot_id),
        };
        let summary = PilotSummary {
            best_flight: self.rows[best_index].clone(),
            pilot_id: self.pilot_id,
            name: self.name,
            stats,
        };
        PilotAggregate {
            summary,
            rows: self.rows,
            covered_sectors: self.covered,
        }
    }
}

fn add_turns(
    total: u32,
    turns: u32,
    record: &FlightRecord,
    field: &str,
) -> Result<u32, AnalysisError> {
    total.checked_add(turns).ok_or_else(|| {
        AnalysisError::malformed(&record.id, field, "lifetime turn count overflows")
    })
}

fn join_sorted(sectors: &BTreeSet<String>) -> String {
    sectors
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Folds one pilot's scored flights into a [`PilotAggregate`].
///
/// `flights` is sorted chronologically in place and the best flight is
/// marked. Returns `None` if `flights` is empty.
pub fn aggregate_pilot(
    flights: &mut [Flight],
    config: &RunConfig,
    comments: &dyn CommentSource,
    classifier: &dyn HikeClassifier,
) -> Result<Option<PilotAggregate>, AnalysisError> {
    flights.sort_by_key(|f| f.record.start_time);
    let Some(first) = flights.first() else {
        return Ok(None);
    };
    let pilot_id = first.record.pilot_id.clone();
    let name = first.record.pilot_name();

    let best_index = first_min_by(flights.iter().enumerate(), |(_, a), (_, b)| {
        let a = a.derived.score.unwrap_or(f64::INFINITY);
        let b = b.derived.score.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    })
    .map_or(0, |(i, _)| i);
    flights[best_index].is_best = true;

    let mut fold = PilotFold::new(config, pilot_id, name);
    for flight in flights.iter() {
        let hike = is_hike_and_fly(flight, &config.hike_site, comments, classifier)?;
        fold.push(flight, hike)?;
    }
    let aggregate = fold.finish(best_index);

    tracing::debug!(
        pilot = %aggregate.summary.pilot_id,
        flights = aggregate.rows.len(),
        best_score = aggregate.summary.best_score(),
        "aggregated pilot"
    );
    Ok(Some(aggregate))
}
