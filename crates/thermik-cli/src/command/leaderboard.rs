//! Leaderboard command
//!
//! Prints the pilot ranking, the population medians and the cross-pilot
//! turn records as plain text tables.

use std::{collections::HashMap, path::PathBuf};

use clap::Args;
use thermik_analysis::{
    config::RunConfig,
    leaderboard::{CrossPilotStats, RankedPilot, TurnRecord},
    ranking::MedianStats,
    report::Report,
};

use crate::{input::InputArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct LeaderboardArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Write the ranked pilots as JSON to this path (`-` for stdout) instead of the table
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub(crate) fn run(arg: &LeaderboardArg) -> anyhow::Result<()> {
    let (config, report) = arg.input.run_analysis()?;

    if let Some(path) = &arg.json {
        Output::save_json(&report.leaderboard(), path)?;
        return Ok(());
    }

    println!(
        "Leaderboard ({} flights, latest {}, generated {})",
        report.index.flight_count, report.index.latest_flight, report.index.generated_at
    );
    println!("==========================================\n");

    print_ranking(&report);
    println!();

    match &report.index.median_stats {
        Some(medians) => print_medians(medians),
        None => println!("Medians: no flights"),
    }
    println!();

    print_turn_stats(report.index.turn_stats.as_ref(), &config);
    Ok(())
}

fn print_ranking(report: &Report) {
    let flight_counts = report
        .pilots
        .iter()
        .map(|b| (&b.pilot.summary.pilot_id, b.flights.len()))
        .collect::<HashMap<_, _>>();

    println!(
        "  {:>4} {:<24} {:>7} {:>8} {:<14} {:>7} {:>14} {:>7} {:>5} {:<12}",
        "Rank", "Pilot", "Score", "Best", "Site", "Flights", "Flight time", "Sectors", "Hikes", "Turns",
    );
    println!("  {}", "-".repeat(111));
    for pilot in report.leaderboard() {
        print_ranking_row(pilot, flight_counts.get(&pilot.summary.pilot_id).copied());
    }
}

fn print_ranking_row(pilot: &RankedPilot, flights: Option<usize>) {
    let summary = &pilot.summary;
    let stats = &summary.stats;
    let flights = flights.map_or("N/A".to_string(), |n| n.to_string());
    println!(
        "  {:>4} {:<24} {:>7.1} {:>8} {:<14} {:>7} {:>14} {:>7} {:>5} {:<12}",
        pilot.rank,
        summary.name,
        summary.best_score(),
        summary.best_flight.id.as_str(),
        summary.best_flight.site,
        flights,
        stats.pretty_flight_time,
        stats.sectors,
        stats.hikes,
        stats.turn_bias.to_string(),
    );
}

fn print_medians(medians: &MedianStats) {
    println!("Population medians");
    println!("  {:<16} {:>10}", "Category", "Median");
    println!("  {}", "-".repeat(27));
    for median in &medians.categories {
        println!("  {:<16} {:>10.1}", median.category.to_string(), median.value);
    }
    if let Some(duration) = &medians.pretty_duration {
        println!("  Typical duration: {duration}");
    }
}

fn print_turn_stats(stats: Option<&CrossPilotStats>, config: &RunConfig) {
    println!(
        "Turn statistics (pilots with more than {} turns)",
        config.min_turns_for_bias_stats
    );
    let Some(stats) = stats else {
        println!("  No pilot qualifies");
        return;
    };
    print_turn_record("Least imbalance", &stats.least_relative_imbalance, "%");
    print_turn_record("Most left (rel.)", &stats.max_relative_left, "%");
    print_turn_record("Most left (abs.)", &stats.max_absolute_left, " turns");
    print_turn_record("Most right (rel.)", &stats.max_relative_right, "%");
    print_turn_record("Most right (abs.)", &stats.max_absolute_right, " turns");
}

fn print_turn_record<T>(label: &str, record: &TurnRecord<T>, unit: &str)
where
    T: std::fmt::Display,
{
    println!("  {label:<20} {:<24} {:.1}{unit}", record.name, record.value);
}
