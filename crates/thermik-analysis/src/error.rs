use crate::flight::FlightId;

/// Fatal pipeline failures.
///
/// There is no per-flight recovery: any of these aborts the whole run.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum AnalysisError {
    /// A per-flight resource (stats block, comment thread) could not be found.
    #[display("Missing {resource} for flight {flight_id}")]
    MissingInput {
        flight_id: FlightId,
        resource: &'static str,
    },
    /// A value is absent, non-numeric or otherwise unusable.
    #[display("Malformed value for '{field}' in flight {flight_id}: {detail}")]
    MalformedValue {
        flight_id: FlightId,
        field: String,
        detail: String,
    },
    /// A stage that needs at least one flight was run on an empty population.
    #[display("No flights in population")]
    EmptyPopulation,
    /// The run configuration cannot drive the pipeline.
    #[display("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

impl AnalysisError {
    pub(crate) fn malformed(
        flight_id: &FlightId,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            flight_id: flight_id.clone(),
            field: field.into(),
            detail: detail.into(),
        }
    }
}
