//! Composite outlier score
//!
//! Each category contributes the percentage distance between the population
//! midpoint and the nearer edge of the flight's tie block, or zero when the
//! midpoint falls inside the block. The composite score is the root mean
//! square of those deviations, rounded to one decimal. Lower means more
//! typical.

use thermik_stats::{
    descriptive::root_mean_square,
    distribution::{RankRange, SortedDistribution},
    rounding::round_half_even,
};

use crate::{AnalysisError, category::StatCategory, flight::Flight, ranking::PopulationModel};

/// Percentage deviation of a tie block from the midpoint of a population.
#[must_use]
pub fn category_deviation(range: RankRange, midpoint: f64) -> f64 {
    if range.contains(midpoint) {
        0.0
    } else {
        range.distance_to(midpoint) / midpoint * 100.0
    }
}

fn deviation_in(
    category: StatCategory,
    values: &SortedDistribution,
    flight: &Flight,
) -> Result<f64, AnalysisError> {
    let value = category.value(&flight.derived);
    let range = values.rank_range(value).ok_or_else(|| {
        AnalysisError::malformed(
            flight.id(),
            category.to_string(),
            format!("value {value} is not part of the population"),
        )
    })?;
    Ok(category_deviation(range, values.midpoint()))
}

/// Computes the composite score of one flight against the model.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedValue`] if one of the flight's values
/// does not occur in the corresponding distribution, which happens when the
/// flight was not part of the population or a value is NaN.
pub fn composite_score(model: &PopulationModel, flight: &Flight) -> Result<f64, AnalysisError> {
    let deviations = model
        .iter()
        .map(|(category, values)| deviation_in(category, values, flight))
        .collect::<Result<Vec<_>, _>>()?;
    let rms = root_mean_square(deviations).ok_or_else(|| AnalysisError::InvalidConfig {
        detail: "population model tracks no categories".to_owned(),
    })?;
    Ok(round_half_even(rms, 1))
}

/// Scores every flight in place.
pub fn score_flights(model: &PopulationModel, flights: &mut [Flight]) -> Result<(), AnalysisError> {
    for flight in flights.iter_mut() {
        let score = composite_score(model, flight)?;
        flight.derived.score = Some(score);
    }
    tracing::info!(flights = flights.len(), "scored flights");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::test_util;

    fn flight(id: &str, duration: i64, max_speed: f64) -> Flight {
        let mut record = test_util::record(id, "p", "2024-06-01 10:00:00");
        record.duration_seconds = duration;
        record.max_speed = max_speed;
        Flight::new(record, test_util::stats(0, 0, &[]))
    }

    #[test]
    fn test_three_flight_example() {
        let flights = [flight("a", 100, 10.0), flight("b", 200, 10.0), flight("c", 300, 10.0)];
        let model = PopulationModel::build(&flights, &[StatCategory::Duration]).unwrap();
        let dist = model.distribution(StatCategory::Duration).unwrap();
        assert_eq!(dist.median(), Some(200.0));

        let range = dist.rank_range(100.0).unwrap();
        assert_eq!((range.first, range.last), (1, 1));
        let deviation = category_deviation(range, dist.midpoint());
        assert!((deviation - 100.0 / 3.0).abs() < 1e-9);

        assert_eq!(composite_score(&model, &flights[0]).unwrap(), 33.3);
        assert_eq!(composite_score(&model, &flights[1]).unwrap(), 33.3);
        assert_eq!(composite_score(&model, &flights[2]).unwrap(), 100.0);
    }

    #[test]
    fn test_tie_block_spanning_midpoint_is_typical() {
        let range = RankRange { first: 2, last: 5 };
        assert_eq!(category_deviation(range, 3.0), 0.0);
        assert_eq!(category_deviation(range, 2.0), 0.0);
        assert_eq!(category_deviation(range, 5.0), 0.0);
    }

    #[test]
    fn test_all_equal_values_score_zero() {
        let flights = [flight("a", 60, 10.0), flight("b", 60, 10.0)];
        let model = PopulationModel::build(&flights, &StatCategory::ALL).unwrap();
        for f in &flights {
            assert_eq!(composite_score(&model, f).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_score_ignores_category_order() {
        let flights = [
            flight("a", 100, 10.0),
            flight("b", 200, 12.0),
            flight("c", 300, 14.0),
            flight("d", 400, 9.0),
        ];
        let forward =
            PopulationModel::build(&flights, &[StatCategory::Duration, StatCategory::MaxSpeed])
                .unwrap();
        let backward =
            PopulationModel::build(&flights, &[StatCategory::MaxSpeed, StatCategory::Duration])
                .unwrap();
        let only_duration = PopulationModel::build(&flights, &[StatCategory::Duration]).unwrap();
        for f in &flights {
            assert_eq!(
                composite_score(&forward, f).unwrap(),
                composite_score(&backward, f).unwrap()
            );
        }
        assert_ne!(
            composite_score(&forward, &flights[3]).unwrap(),
            composite_score(&only_duration, &flights[3]).unwrap()
        );
    }

    #[test]
    fn test_foreign_flight_is_rejected() {
        let flights = [flight("a", 100, 10.0)];
        let model = PopulationModel::build(&flights, &[StatCategory::Duration]).unwrap();
        let err = composite_score(&model, &flight("x", 999, 10.0)).unwrap_err();
        assert!(err.is_malformed_value());
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_score_flights_sets_scores() {
        let mut flights = vec![flight("a", 100, 10.0), flight("b", 200, 10.0)];
        let model = PopulationModel::build(&flights, &StatCategory::ALL).unwrap();
        score_flights(&model, &mut flights).unwrap();
        assert!(flights.iter().all(|f| f.derived.score.is_some()));
    }
}
