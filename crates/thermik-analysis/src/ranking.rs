//! Population ranking model
//!
//! For each tracked [`StatCategory`] the model holds one [`SortedDistribution`]
//! with every flight's value, duplicates retained. It is built once per run
//! and only read afterwards.

use serde::Serialize;
use thermik_stats::distribution::SortedDistribution;

use crate::{AnalysisError, category::StatCategory, derive::pretty_duration, flight::Flight};

#[derive(Debug, Clone)]
pub struct PopulationModel {
    distributions: Vec<(StatCategory, SortedDistribution)>,
}

/// Positional median of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMedian {
    pub category: StatCategory,
    pub value: f64,
}

/// Medians of all tracked categories, as shown on the index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedianStats {
    pub categories: Vec<CategoryMedian>,
    /// The median duration, formatted. `None` if duration is not tracked.
    pub pretty_duration: Option<String>,
}

impl PopulationModel {
    /// Builds one sorted distribution per category over all flights.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyPopulation`] if `flights` is empty and
    /// [`AnalysisError::InvalidConfig`] if no category is given.
    pub fn build(flights: &[Flight], categories: &[StatCategory]) -> Result<Self, AnalysisError> {
        if flights.is_empty() {
            return Err(AnalysisError::EmptyPopulation);
        }
        if categories.is_empty() {
            return Err(AnalysisError::InvalidConfig {
                detail: "at least one ranking category is required".to_owned(),
            });
        }

        let distributions = categories
            .iter()
            .map(|&category| {
                let values = flights.iter().map(|f| category.value(&f.derived));
                (category, SortedDistribution::new(values))
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            categories = distributions.len(),
            flights = flights.len(),
            "built population distributions"
        );
        Ok(Self { distributions })
    }

    /// Number of flights each distribution holds.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.distributions
            .first()
            .map_or(0, |(_, dist)| dist.len())
    }

    pub fn categories(&self) -> impl Iterator<Item = StatCategory> + '_ {
        self.distributions.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatCategory, &SortedDistribution)> + '_ {
        self.distributions.iter().map(|(c, d)| (*c, d))
    }

    #[must_use]
    pub fn distribution(&self, category: StatCategory) -> Option<&SortedDistribution> {
        self.distributions
            .iter()
            .find_map(|(c, dist)| (*c == category).then_some(dist))
    }

    /// Positional medians of every category.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn medians(&self) -> MedianStats {
        let categories = self
            .distributions
            .iter()
            .filter_map(|(category, dist)| {
                dist.median().map(|value| CategoryMedian {
                    category: *category,
                    value,
                })
            })
            .collect::<Vec<_>>();
        let pretty_duration = categories
            .iter()
            .find(|m| m.category == StatCategory::Duration)
            .map(|m| pretty_duration(m.value as i64));
        MedianStats {
            categories,
            pretty_duration,
        }
    }
}
