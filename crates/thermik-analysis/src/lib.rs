//! Flight-log analysis for a local paragliding community
//!
//! This crate turns a batch of exported flight records into a report: every
//! flight is compared against the whole population, pilots are ranked by
//! their most typical flight, and lifetime counters are collected per pilot.
//!
//! # Overview
//!
//! 1. **Load and validate** ([`flight::RawFlightRecord`]): loose export values
//!    become a typed [`flight::FlightRecord`]
//! 2. **Derive metrics** ([`derive::DerivedStats`]): speeds, climbs, turn
//!    excess and display strings per flight
//! 3. **Population model** ([`ranking::PopulationModel`]): one sorted
//!    distribution per [`category::StatCategory`]
//! 4. **Score** ([`score::composite_score`]): RMS of per-category rank
//!    deviations from the median, 0 is perfectly typical
//! 5. **Aggregate pilots** ([`pilot::aggregate_pilot`]): chronological fold,
//!    best flight, new sectors, hike-and-fly detection ([`hike`])
//! 6. **Leaderboard** ([`leaderboard`]): pilot ranking and cross-pilot turn
//!    records
//! 7. **Report** ([`report::Report`]): bundles for renderers and a flat row
//!    export
//!
//! [`pipeline::run_pipeline`] runs all stages in order. Collaborators that
//! touch the outside world (comment lookup, the hike classifier, the clock)
//! are passed in by the caller.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//!
//! use thermik_analysis::{
//!     config::{RunConfig, RunContext},
//!     flight::{Comment, FlightId},
//!     hike::KeywordClassifier,
//!     pipeline::run_pipeline,
//! };
//! # fn main() -> Result<(), thermik_analysis::AnalysisError> {
//!
//! let config = RunConfig::default();
//! let context = RunContext::new(chrono::NaiveDateTime::default());
//! let comments = HashMap::<FlightId, Vec<Comment>>::new();
//! let classifier = KeywordClassifier::new(&config.hike_keyword)?;
//!
//! let report = run_pipeline(vec![], &comments, &classifier, &config, &context)?;
//! assert!(report.leaderboard().is_empty());
//! assert_eq!(report.index.latest_flight, config.no_flight_placeholder);
//! # Ok(())
//! # }
//! ```

pub use self::error::AnalysisError;

pub mod category;
pub mod config;
pub mod coverage;
pub mod derive;
mod error;
pub mod flight;
pub mod hike;
pub mod leaderboard;
pub mod pilot;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod score;
