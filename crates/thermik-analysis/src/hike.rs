//! Hike-and-fly detection
//!
//! A flight counts as hike-and-fly when it took off at the configured site,
//! has comments, and one of the pilot's own comments mentions the keyword as
//! a whole word. This is a text heuristic, not a guaranteed detector.
//!
//! Comments are only fetched for flights that pass the site and comment-count
//! checks.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::{
    AnalysisError,
    flight::{Comment, Flight, FlightId},
};

/// Decides whether a comment text announces a hike-and-fly.
pub trait HikeClassifier {
    fn mentions_hike(&self, text: &str) -> bool;
}

/// Provides the comment thread of a flight.
pub trait CommentSource {
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingInput`] if the thread does not exist.
    fn comments(&self, flight_id: &FlightId) -> Result<Vec<Comment>, AnalysisError>;
}

impl CommentSource for HashMap<FlightId, Vec<Comment>> {
    fn comments(&self, flight_id: &FlightId) -> Result<Vec<Comment>, AnalysisError> {
        self.get(flight_id)
            .cloned()
            .ok_or_else(|| AnalysisError::MissingInput {
                flight_id: flight_id.clone(),
                resource: "comments",
            })
    }
}

/// Case-insensitive whole-word keyword match.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    pattern: Regex,
}

impl KeywordClassifier {
    pub fn new(keyword: &str) -> Result<Self, AnalysisError> {
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
            .case_insensitive(true)
            .build()
            .map_err(|e| AnalysisError::InvalidConfig {
                detail: format!("hike keyword '{keyword}': {e}"),
            })?;
        Ok(Self { pattern })
    }
}

impl HikeClassifier for KeywordClassifier {
    fn mentions_hike(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Runs the hike-and-fly check for one flight.
pub fn is_hike_and_fly(
    flight: &Flight,
    hike_site: &str,
    comments: &dyn CommentSource,
    classifier: &dyn HikeClassifier,
) -> Result<bool, AnalysisError> {
    let record = &flight.record;
    if record.takeoff != hike_site || record.comment_count <= 0 {
        return Ok(false);
    }
    let thread = comments.comments(&record.id)?;
    Ok(thread
        .iter()
        .any(|c| c.author_id == record.pilot_id && classifier.mentions_hike(&c.text)))
}
