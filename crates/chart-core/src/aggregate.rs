// File: crates/chart-core/src/aggregate.rs
// Summary: Group-by-date counting of raw records into a sorted aggregate view.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{RawRecord, SurveyTime};

/// Number of records observed for one survey date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AggregatePoint {
    pub date: SurveyTime,
    pub count: u64,
}

/// Count records per distinct `survey` value.
/// Output dates are unique and strictly increasing.
pub fn aggregate(records: &[RawRecord]) -> Vec<AggregatePoint> {
    let mut groups: BTreeMap<SurveyTime, u64> = BTreeMap::new();
    for r in records {
        *groups.entry(r.survey).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(date, count)| AggregatePoint { date, count })
        .collect()
}

/// `(min date, max date)` of a sorted aggregate sequence.
pub fn date_extent(points: &[AggregatePoint]) -> Option<(SurveyTime, SurveyTime)> {
    Some((points.first()?.date, points.last()?.date))
}

/// Largest count, `None` for an empty sequence.
pub fn max_count(points: &[AggregatePoint]) -> Option<u64> {
    points.iter().map(|p| p.count).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ms: i64) -> RawRecord {
        RawRecord::new(SurveyTime::from_millis(ms))
    }

    #[test]
    fn counts_and_sorts_unordered_input() {
        let data = vec![rec(30), rec(10), rec(30), rec(20), rec(10), rec(30)];
        let out = aggregate(&data);
        let pairs: Vec<(i64, u64)> = out.iter().map(|p| (p.date.as_millis(), p.count)).collect();
        assert_eq!(pairs, vec![(10, 2), (20, 1), (30, 3)]);
    }

    #[test]
    fn extent_and_max_on_empty() {
        assert_eq!(date_extent(&[]), None);
        assert_eq!(max_count(&[]), None);
    }

    #[test]
    fn extent_spans_first_to_last() {
        let out = aggregate(&[rec(-5), rec(7), rec(7)]);
        assert_eq!(date_extent(&out), Some((SurveyTime::from_millis(-5), SurveyTime::from_millis(7))));
        assert_eq!(max_count(&out), Some(2));
    }
}
