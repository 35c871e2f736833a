//! Pilot ranking and cross-pilot turn statistics

use std::cmp::Ordering;

use serde::Serialize;
use thermik_stats::descriptive::{first_max_by, first_min_by};

use crate::{flight::PilotId, pilot::PilotSummary};

/// A pilot summary with its leaderboard position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPilot {
    /// 1-based; rank 1 has the most typical best flight.
    pub rank: usize,
    #[serde(flatten)]
    pub summary: PilotSummary,
}

/// Orders pilots by their best flight's score, ascending.
///
/// The sort is stable: pilots with equal scores keep their input order.
#[must_use]
pub fn rank_pilots(mut pilots: Vec<PilotSummary>) -> Vec<RankedPilot> {
    pilots.sort_by(|a, b| a.best_score().total_cmp(&b.best_score()));
    pilots
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedPilot {
            rank: i + 1,
            summary,
        })
        .collect()
}

/// The pilot holding an extremal turn statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRecord<T> {
    pub pilot_id: PilotId,
    pub name: String,
    pub value: T,
}

/// Turn imbalance records across pilots with enough turns to be meaningful.
///
/// Relative values are percentages of the pilot's combined turns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossPilotStats {
    pub least_relative_imbalance: TurnRecord<f64>,
    pub max_relative_left: TurnRecord<f64>,
    pub max_absolute_left: TurnRecord<i64>,
    pub max_relative_right: TurnRecord<f64>,
    pub max_absolute_right: TurnRecord<i64>,
}

#[derive(Debug, Clone, Copy)]
struct Turns<'a> {
    summary: &'a PilotSummary,
    left: i64,
    right: i64,
}

impl Turns<'_> {
    /// `100 * diff / (left + right)`
    #[expect(clippy::cast_precision_loss)]
    fn relative(&self, diff: i64) -> f64 {
        100.0 * diff as f64 / (self.left + self.right) as f64
    }

    fn record<T>(&self, value: T) -> TurnRecord<T> {
        TurnRecord {
            pilot_id: self.summary.pilot_id.clone(),
            name: self.summary.name.clone(),
            value,
        }
    }
}

impl CrossPilotStats {
    /// Computes the records over pilots whose combined turn count exceeds
    /// `min_turns`. On ties the first pilot in `pilots` order wins.
    ///
    /// Returns `None` if no pilot qualifies.
    pub fn from_pilots<'a, I>(pilots: I, min_turns: u32) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PilotSummary>,
    {
        let eligible = pilots
            .into_iter()
            .map(|summary| Turns {
                summary,
                left: i64::from(summary.stats.left_turns),
                right: i64::from(summary.stats.right_turns),
            })
            .filter(|t| t.left + t.right > i64::from(min_turns))
            .collect::<Vec<_>>();

        Some(Self {
            least_relative_imbalance: pick(&eligible, Extreme::Min, |t| {
                t.relative((t.left - t.right).abs())
            })?,
            max_relative_left: pick(&eligible, Extreme::Max, |t| t.relative(t.left - t.right))?,
            max_absolute_left: pick(&eligible, Extreme::Max, |t| t.left - t.right)?,
            max_relative_right: pick(&eligible, Extreme::Max, |t| t.relative(t.right - t.left))?,
            max_absolute_right: pick(&eligible, Extreme::Max, |t| t.right - t.left)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

fn pick<'a, T, F>(eligible: &[Turns<'a>], extreme: Extreme, value: F) -> Option<TurnRecord<T>>
where
    T: Copy + PartialOrd,
    F: Fn(&Turns<'a>) -> T,
{
    let values = eligible.iter().map(|t| (t, value(t)));
    let found = match extreme {
        Extreme::Min => first_min_by(values, |a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)),
        Extreme::Max => first_max_by(values, |a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)),
    };
    found.map(|(t, v)| t.record(v))
}
