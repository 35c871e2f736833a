//! Loading a flight-log snapshot from disk
//!
//! ```text
//! <flights.json>                      [RawFlightRecord, ...]
//! <stats-dir>/<id>.stats.json         RawStats, required for every flight
//! <comments-dir>/<id>.comments.json   CommentThread, read on demand
//! ```

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use clap::Args;
use thermik_analysis::{
    AnalysisError,
    config::{RunConfig, RunContext},
    flight::{Comment, CommentThread, FlightId, RawFlightRecord, RawStats},
    hike::{CommentSource, KeywordClassifier},
    pipeline::{FlightInput, run_pipeline},
    report::Report,
};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Path to the flight-log export JSON file
    pub flights: PathBuf,

    /// Directory with one `<flight-id>.stats.json` per flight
    #[arg(long)]
    pub stats_dir: PathBuf,

    /// Directory with `<flight-id>.comments.json` comment threads
    #[arg(long)]
    pub comments_dir: PathBuf,

    /// Run configuration TOML file; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl InputArg {
    pub(crate) fn load_config(&self) -> anyhow::Result<RunConfig> {
        match &self.config {
            Some(path) => util::read_toml_file("config", path),
            None => Ok(RunConfig::default()),
        }
    }

    pub(crate) fn load_flights(&self) -> anyhow::Result<Vec<FlightInput>> {
        let raw: Vec<RawFlightRecord> = util::read_json_file("flights", &self.flights)?;
        tracing::info!(records = raw.len(), path = %self.flights.display(), "loaded flight records");

        let mut inputs = Vec::with_capacity(raw.len());
        for (index, raw) in raw.iter().enumerate() {
            let record = raw.validate(index)?;
            let stats = read_stats(&self.stats_dir, &record.id)?;
            inputs.push(FlightInput { record, stats });
        }
        Ok(inputs)
    }

    /// Loads the snapshot and runs the whole analysis.
    pub(crate) fn run_analysis(&self) -> anyhow::Result<(RunConfig, Report)> {
        let config = self.load_config()?;
        let inputs = self.load_flights()?;
        let comments = CommentDir::new(&self.comments_dir);
        let classifier = KeywordClassifier::new(&config.hike_keyword)?;
        let context = RunContext::new(chrono::Local::now().naive_local());
        let report = run_pipeline(inputs, &comments, &classifier, &config, &context)?;
        Ok((config, report))
    }
}

fn read_stats(dir: &Path, flight_id: &FlightId) -> anyhow::Result<RawStats> {
    let path = dir.join(format!("{flight_id}.stats.json"));
    if !path.is_file() {
        return Err(AnalysisError::MissingInput {
            flight_id: flight_id.clone(),
            resource: "stats",
        }
        .into());
    }
    util::read_json_file("stats", path)
}

/// Comment threads stored as one JSON file per flight.
#[derive(Debug, Clone)]
pub(crate) struct CommentDir {
    dir: PathBuf,
}

impl CommentDir {
    pub(crate) fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_owned(),
        }
    }
}

impl CommentSource for CommentDir {
    fn comments(&self, flight_id: &FlightId) -> Result<Vec<Comment>, AnalysisError> {
        let path = self.dir.join(format!("{flight_id}.comments.json"));
        let file = File::open(&path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "cannot open comment thread");
            AnalysisError::MissingInput {
                flight_id: flight_id.clone(),
                resource: "comments",
            }
        })?;
        let thread: CommentThread =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                AnalysisError::MalformedValue {
                    flight_id: flight_id.clone(),
                    field: "comments".to_owned(),
                    detail: e.to_string(),
                }
            })?;
        Ok(thread.into_comments())
    }
}
