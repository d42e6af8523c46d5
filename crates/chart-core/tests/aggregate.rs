// File: crates/chart-core/tests/aggregate.rs
// Purpose: Group-by-date counting properties over varied inputs.

use std::collections::HashMap;

use chart_core::{aggregate, RawRecord, SurveyTime};

fn day(d: u32) -> SurveyTime {
    SurveyTime::from_ymd(2024, 1, d).unwrap()
}

fn records(days: &[u32]) -> Vec<RawRecord> {
    days.iter().map(|&d| RawRecord::new(day(d))).collect()
}

#[test]
fn two_on_first_day_one_on_second() {
    let out = aggregate(&records(&[1, 1, 2]));
    let got: Vec<(SurveyTime, u64)> = out.iter().map(|p| (p.date, p.count)).collect();
    assert_eq!(got, vec![(day(1), 2), (day(2), 1)]);
}

#[test]
fn single_date_repeated() {
    let out = aggregate(&records(&[9; 17]));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].date, day(9));
    assert_eq!(out[0].count, 17);
}

#[test]
fn empty_input_gives_empty_view() {
    assert!(aggregate(&[]).is_empty());
}

#[test]
fn one_entry_per_distinct_date_with_group_sizes() {
    // Deterministic scramble of 1..=28 with repeats.
    let days: Vec<u32> = (0..500u32).map(|i| (i * 7919 + 13) % 28 + 1).collect();
    let mut expected: HashMap<SurveyTime, u64> = HashMap::new();
    for &d in &days {
        *expected.entry(day(d)).or_default() += 1;
    }

    let out = aggregate(&records(&days));
    assert_eq!(out.len(), expected.len());
    for p in &out {
        assert_eq!(expected.get(&p.date), Some(&p.count), "count for {}", p.date);
    }
    assert_eq!(out.iter().map(|p| p.count).sum::<u64>(), days.len() as u64);
}

#[test]
fn sorted_strictly_and_idempotent() {
    let data = records(&[5, 3, 3, 28, 1, 5, 14]);
    let first = aggregate(&data);
    assert!(first.windows(2).all(|w| w[0].date < w[1].date));

    let mut resorted = first.clone();
    resorted.sort_by_key(|p| p.date);
    assert_eq!(resorted, first);
    assert_eq!(aggregate(&data), first);
}

#[test]
fn order_of_input_does_not_matter() {
    let a = aggregate(&records(&[1, 2, 3, 2, 1]));
    let b = aggregate(&records(&[3, 2, 1, 1, 2]));
    assert_eq!(a, b);
}

#[test]
fn extra_fields_are_ignored_for_grouping() {
    let data = vec![
        RawRecord::new(day(4)).with_field("region", "north"),
        RawRecord::new(day(4)).with_field("region", "south"),
    ];
    assert_eq!(aggregate(&data)[0].count, 2);
}
