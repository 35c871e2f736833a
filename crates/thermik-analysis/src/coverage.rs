use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// How often a sector was flown, and by how many pilots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorCoverage {
    pub sector: String,
    pub flights: u32,
    pub pilots: u32,
}

/// Accumulates sector visits over all flights and pilots.
#[derive(Debug, Clone, Default)]
pub struct SectorCoverageMap {
    map: BTreeMap<String, (u32, u32)>,
}

impl SectorCoverageMap {
    /// Counts one flight for each distinct sector it visited.
    pub fn record_flight(&mut self, sectors: &[String]) {
        let distinct = sectors.iter().collect::<BTreeSet<_>>();
        for sector in distinct {
            self.map.entry(sector.clone()).or_default().0 += 1;
        }
    }

    /// Counts one pilot for each sector in their lifetime coverage.
    pub fn record_pilot(&mut self, covered: &BTreeSet<String>) {
        for sector in covered {
            self.map.entry(sector.clone()).or_default().1 += 1;
        }
    }

    /// Sectors ordered by name.
    #[must_use]
    pub fn into_rows(self) -> Vec<SectorCoverage> {
        self.map
            .into_iter()
            .map(|(sector, (flights, pilots))| SectorCoverage {
                sector,
                flights,
                pilots,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(sectors: &[&str]) -> Vec<String> {
        sectors.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_flights_and_pilots_are_counted_separately() {
        let mut map = SectorCoverageMap::default();
        map.record_flight(&owned(&["B", "A"]));
        map.record_flight(&owned(&["A", "A"]));
        map.record_pilot(&owned(&["A", "B"]).into_iter().collect());

        map.record_flight(&owned(&["A"]));
        map.record_pilot(&owned(&["A"]).into_iter().collect());

        assert_eq!(
            map.into_rows(),
            vec![
                SectorCoverage {
                    sector: "A".to_owned(),
                    flights: 3,
                    pilots: 2
                },
                SectorCoverage {
                    sector: "B".to_owned(),
                    flights: 1,
                    pilots: 1
                },
            ]
        );
    }
}
