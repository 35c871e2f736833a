//! End-to-end batch run
//!
//! ```text
//! FlightInput ─→ derive ─→ PopulationModel ─→ score
//!                                               ↓
//!              Report ←─ leaderboard ←─ aggregate per pilot
//! ```
//!
//! Every stage completes before the next starts. Any error aborts the run.

use std::collections::HashMap;

use crate::{
    AnalysisError,
    config::{RunConfig, RunContext},
    coverage::SectorCoverageMap,
    flight::{Flight, FlightRecord, PilotId, RawStats},
    hike::{CommentSource, HikeClassifier},
    leaderboard::{CrossPilotStats, RankedPilot, rank_pilots},
    pilot::{PilotAggregate, aggregate_pilot},
    ranking::PopulationModel,
    report::{IndexBundle, PilotBundle, Report},
    score::score_flights,
};

/// A loaded flight and its raw track statistics.
#[derive(Debug, Clone)]
pub struct FlightInput {
    pub record: FlightRecord,
    pub stats: RawStats,
}

/// Runs all stages over `inputs`.
///
/// An empty input produces a report with no pilots, the configured
/// placeholder as latest flight and no medians or turn statistics.
pub fn run_pipeline(
    inputs: Vec<FlightInput>,
    comments: &dyn CommentSource,
    classifier: &dyn HikeClassifier,
    config: &RunConfig,
    context: &RunContext,
) -> Result<Report, AnalysisError> {
    let mut flights = inputs
        .into_iter()
        .map(|input| Flight::new(input.record, input.stats))
        .collect::<Vec<_>>();
    tracing::info!(flights = flights.len(), "derived flight metrics");

    let flight_count = flights.len();
    let latest_flight = flights
        .iter()
        .map(|f| f.record.start_time)
        .max()
        .map_or_else(
            || config.no_flight_placeholder.clone(),
            |t| t.format(RunContext::TIMESTAMP_FORMAT).to_string(),
        );

    let median_stats = if flights.is_empty() {
        tracing::warn!("no flights loaded, skipping ranking");
        None
    } else {
        let model = PopulationModel::build(&flights, &config.categories)?;
        score_flights(&model, &mut flights)?;
        Some(model.medians())
    };

    let mut coverage = SectorCoverageMap::default();
    let mut aggregates = Vec::new();
    for mut group in group_by_pilot(flights) {
        for flight in &group {
            coverage.record_flight(&flight.raw.sectors);
        }
        if let Some(aggregate) = aggregate_pilot(&mut group, config, comments, classifier)? {
            coverage.record_pilot(&aggregate.covered_sectors);
            aggregates.push(aggregate);
        }
    }
    tracing::info!(pilots = aggregates.len(), "aggregated pilots");

    let ranked = rank_pilots(aggregates.iter().map(|a| a.summary.clone()).collect());
    let turn_stats = CrossPilotStats::from_pilots(
        ranked.iter().map(|p| &p.summary),
        config.min_turns_for_bias_stats,
    );
    if turn_stats.is_none() && !ranked.is_empty() {
        tracing::info!(
            min_turns = config.min_turns_for_bias_stats,
            "no pilot has enough turns for turn statistics"
        );
    }

    let generated_at = context.generated_at_display();
    let flight_rows = aggregates
        .iter()
        .flat_map(|a| a.rows.iter().cloned())
        .collect();
    let pilots = pilot_bundles(aggregates, &ranked, &generated_at, &latest_flight, flight_count);

    Ok(Report {
        pilots,
        index: IndexBundle {
            pilots: ranked,
            generated_at,
            latest_flight,
            flight_count,
            turn_stats,
            median_stats,
            sectors: coverage.into_rows(),
        },
        flight_rows,
    })
}

/// Groups flights by pilot, in order of each pilot's first appearance.
fn group_by_pilot(flights: Vec<Flight>) -> Vec<Vec<Flight>> {
    let mut index = HashMap::<PilotId, usize>::new();
    let mut groups = Vec::<Vec<Flight>>::new();
    for flight in flights {
        let slot = *index
            .entry(flight.record.pilot_id.clone())
            .or_insert_with(|| {
                groups.push(vec![]);
                groups.len() - 1
            });
        groups[slot].push(flight);
    }
    groups
}

fn pilot_bundles(
    aggregates: Vec<PilotAggregate>,
    ranked: &[RankedPilot],
    generated_at: &str,
    latest_flight: &str,
    flight_count: usize,
) -> Vec<PilotBundle> {
    let ranks = ranked
        .iter()
        .map(|p| (p.summary.pilot_id.clone(), p.rank))
        .collect::<HashMap<_, _>>();
    aggregates
        .into_iter()
        .map(|aggregate| {
            let rank = ranks
                .get(&aggregate.summary.pilot_id)
                .copied()
                .unwrap_or_default();
            PilotBundle {
                pilot: RankedPilot {
                    rank,
                    summary: aggregate.summary,
                },
                flights: aggregate.rows,
                generated_at: generated_at.to_owned(),
                latest_flight: latest_flight.to_owned(),
                flight_count,
            }
        })
        .collect()
}
