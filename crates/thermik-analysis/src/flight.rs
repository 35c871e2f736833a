//! Flight records as loaded from the flight-log export
//!
//! The export is loosely typed: numbers arrive either as JSON numbers or as
//! numeric strings, and fields may be missing entirely. Records are read into
//! [`RawFlightRecord`] first and then validated into a [`FlightRecord`] with
//! fixed, typed fields. Validation failures are reported as
//! [`AnalysisError::MalformedValue`] naming the flight and the field.
//!
//! # Data Structure
//!
//! ```text
//! flights.json: [RawFlightRecord, ...]   --validate-->  FlightRecord
//! <id>.stats.json: RawStats
//! <id>.comments.json: CommentThread      --into_comments-->  [Comment]
//! ```
//!
//! A validated record, its [`RawStats`] and the [`DerivedStats`] computed
//! from both form a [`Flight`], the unit every later stage works on.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, derive::DerivedStats};

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of a single flight.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct FlightId(String);

/// Identifier of a pilot.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct PilotId(String);

macro_rules! impl_id_conversions {
    ($ty:ident) => {
        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl $ty {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_id_conversions!(FlightId);
impl_id_conversions!(PilotId);

/// A scalar as it appears in the export: number, numeric string or flag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl LooseValue {
    /// Interprets the value as a number, parsing numeric strings.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseValue::Integer(i) => Some(*i as f64),
            LooseValue::Float(f) => Some(*f),
            LooseValue::Text(s) => s.trim().parse().ok(),
            LooseValue::Flag(_) => None,
        }
    }

    /// Interprets the value as an integer. Floats must be integral.
    #[expect(clippy::cast_possible_truncation, clippy::float_cmp)]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LooseValue::Integer(i) => Some(*i),
            LooseValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            LooseValue::Text(s) => s.trim().parse().ok(),
            LooseValue::Float(_) | LooseValue::Flag(_) => None,
        }
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            LooseValue::Integer(i) => i.to_string(),
            LooseValue::Float(f) => f.to_string(),
            LooseValue::Text(s) => s.clone(),
            LooseValue::Flag(b) => b.to_string(),
        }
    }
}

/// One flight entry of the export, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlightRecord {
    #[serde(rename = "IDFlight")]
    pub id: Option<LooseValue>,
    #[serde(rename = "FKPilot")]
    pub pilot_id: Option<LooseValue>,
    #[serde(rename = "FirstName")]
    pub first_name: Option<LooseValue>,
    #[serde(rename = "LastName")]
    pub last_name: Option<LooseValue>,
    #[serde(rename = "FlightDate")]
    pub date: Option<LooseValue>,
    #[serde(rename = "FlightStartTime")]
    pub start_time: Option<LooseValue>,
    #[serde(rename = "FlightDuration")]
    pub duration: Option<LooseValue>,
    #[serde(rename = "TakeoffWaypointName")]
    pub takeoff: Option<LooseValue>,
    #[serde(rename = "MaxAltitude")]
    pub max_altitude: Option<LooseValue>,
    #[serde(rename = "MaxSpeed")]
    pub max_speed: Option<LooseValue>,
    #[serde(rename = "BestTaskSpeed")]
    pub task_speed: Option<LooseValue>,
    #[serde(rename = "MaxClimb")]
    pub max_climb: Option<LooseValue>,
    #[serde(rename = "MinClimb")]
    pub min_climb: Option<LooseValue>,
    #[serde(rename = "BestTaskPoints")]
    pub task_points: Option<LooseValue>,
    #[serde(rename = "CountComments")]
    pub comment_count: Option<LooseValue>,
    #[serde(rename = "HasPhotos")]
    pub photo_count: Option<LooseValue>,
}

/// A validated flight entry.
///
/// Speeds are in m/s and climb rates in m/s, as exported.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub id: FlightId,
    pub pilot_id: PilotId,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub duration_seconds: i64,
    pub takeoff: String,
    pub max_altitude: f64,
    pub max_speed: f64,
    pub task_speed: f64,
    pub max_climb: f64,
    pub min_climb: f64,
    pub task_points: f64,
    pub comment_count: i64,
    pub photo_count: i64,
}

struct FieldReader<'a> {
    flight_id: &'a FlightId,
}

impl FieldReader<'_> {
    fn require<'v>(
        &self,
        field: &str,
        value: Option<&'v LooseValue>,
    ) -> Result<&'v LooseValue, AnalysisError> {
        value.ok_or_else(|| AnalysisError::malformed(self.flight_id, field, "missing"))
    }

    fn text(&self, field: &str, value: Option<&LooseValue>) -> Result<String, AnalysisError> {
        Ok(self.require(field, value)?.to_text())
    }

    fn number(&self, field: &str, value: Option<&LooseValue>) -> Result<f64, AnalysisError> {
        let value = self.require(field, value)?;
        value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                AnalysisError::malformed(
                    self.flight_id,
                    field,
                    format!("expected a number, found {}", value.to_text()),
                )
            })
    }

    fn integer(&self, field: &str, value: Option<&LooseValue>) -> Result<i64, AnalysisError> {
        let value = self.require(field, value)?;
        value.as_i64().ok_or_else(|| {
            AnalysisError::malformed(
                self.flight_id,
                field,
                format!("expected an integer, found {}", value.to_text()),
            )
        })
    }
}

impl RawFlightRecord {
    /// Validates every required field.
    ///
    /// `index` is the record's position in the export, used to label the
    /// error when the flight identifier itself is missing.
    pub fn validate(&self, index: usize) -> Result<FlightRecord, AnalysisError> {
        let id = match &self.id {
            Some(value) => FlightId::from(value.to_text()),
            None => {
                return Err(AnalysisError::malformed(
                    &FlightId::from(format!("#{index}")),
                    "IDFlight",
                    "missing",
                ));
            }
        };
        let r = FieldReader { flight_id: &id };

        let start_time = r.text("FlightStartTime", self.start_time.as_ref())?;
        let start_time = NaiveDateTime::parse_from_str(&start_time, START_TIME_FORMAT)
            .map_err(|e| AnalysisError::malformed(&id, "FlightStartTime", e.to_string()))?;
        let date = r.text("FlightDate", self.date.as_ref())?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| AnalysisError::malformed(&id, "FlightDate", e.to_string()))?;

        Ok(FlightRecord {
            pilot_id: PilotId::from(r.text("FKPilot", self.pilot_id.as_ref())?),
            first_name: r.text("FirstName", self.first_name.as_ref())?,
            last_name: r.text("LastName", self.last_name.as_ref())?,
            date,
            start_time,
            duration_seconds: r.integer("FlightDuration", self.duration.as_ref())?,
            takeoff: r.text("TakeoffWaypointName", self.takeoff.as_ref())?,
            max_altitude: r.number("MaxAltitude", self.max_altitude.as_ref())?,
            max_speed: r.number("MaxSpeed", self.max_speed.as_ref())?,
            task_speed: r.number("BestTaskSpeed", self.task_speed.as_ref())?,
            max_climb: r.number("MaxClimb", self.max_climb.as_ref())?,
            min_climb: r.number("MinClimb", self.min_climb.as_ref())?,
            task_points: r.number("BestTaskPoints", self.task_points.as_ref())?,
            comment_count: r.integer("CountComments", self.comment_count.as_ref())?,
            photo_count: r.integer("HasPhotos", self.photo_count.as_ref())?,
            id,
        })
    }
}

impl FlightRecord {
    #[must_use]
    pub fn pilot_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub fn has_photos(&self) -> bool {
        self.photo_count > 0
    }
}

/// Per-flight track statistics computed by the track analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStats {
    pub left_turns: u32,
    pub right_turns: u32,
    /// Map sectors the track passed through.
    #[serde(rename = "sektoren")]
    pub sectors: Vec<String>,
    /// Distance from the landing point to the target, in meters.
    #[serde(rename = "landepunktabstand", default)]
    pub landing_distance: Option<f64>,
}

/// Comment file as exported, `{"data": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentThread {
    pub data: Vec<RawComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    #[serde(rename = "FKAuthor")]
    pub author: LooseValue,
    #[serde(rename = "CommentText")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub author_id: PilotId,
    pub text: String,
}

impl CommentThread {
    #[must_use]
    pub fn into_comments(self) -> Vec<Comment> {
        self.data
            .into_iter()
            .map(|c| Comment {
                author_id: PilotId::from(c.author.to_text()),
                text: c.text,
            })
            .collect()
    }
}

/// A flight enriched with derived statistics.
#[derive(Debug, Clone)]
pub struct Flight {
    pub record: FlightRecord,
    pub raw: RawStats,
    pub derived: DerivedStats,
    /// Set during pilot aggregation on the pilot's most typical flight.
    pub is_best: bool,
}

impl Flight {
    #[must_use]
    pub fn new(record: FlightRecord, raw: RawStats) -> Self {
        let derived = DerivedStats::derive(&record, &raw);
        Self {
            record,
            raw,
            derived,
            is_best: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &FlightId {
        &self.record.id
    }
}
