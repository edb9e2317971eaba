//! Per-day completion history.
//!
//! Append-only: one increment per completed work phase, never decremented.
//! Keys are local calendar dates, serialized as `YYYY-MM-DD` strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyHistory(BTreeMap<NaiveDate, u32>);

impl DailyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completion on `date`.
    pub fn record(&mut self, date: NaiveDate) {
        *self.0.entry(date).or_insert(0) += 1;
    }

    pub fn count(&self, date: NaiveDate) -> u32 {
        self.0.get(&date).copied().unwrap_or(0)
    }

    /// Sum of counts over `start..=end`. Missing dates contribute 0.
    pub fn sum_inclusive(&self, start: NaiveDate, end: NaiveDate) -> u64 {
        if start > end {
            return 0;
        }
        self.0.range(start..=end).map(|(_, c)| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &u32)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn record_increments_per_date() {
        let mut h = DailyHistory::new();
        h.record(d(2026, 1, 5));
        h.record(d(2026, 1, 5));
        h.record(d(2026, 1, 6));
        assert_eq!(h.count(d(2026, 1, 5)), 2);
        assert_eq!(h.count(d(2026, 1, 6)), 1);
        assert_eq!(h.count(d(2026, 1, 7)), 0);
    }

    #[test]
    fn sum_skips_missing_dates() {
        let mut h = DailyHistory::new();
        h.record(d(2026, 1, 5));
        h.record(d(2026, 1, 9));
        h.record(d(2026, 1, 9));
        assert_eq!(h.sum_inclusive(d(2026, 1, 1), d(2026, 1, 31)), 3);
        assert_eq!(h.sum_inclusive(d(2026, 1, 6), d(2026, 1, 8)), 0);
        assert_eq!(h.sum_inclusive(d(2026, 1, 9), d(2026, 1, 9)), 2);
    }

    #[test]
    fn inverted_range_sums_to_zero() {
        let mut h = DailyHistory::new();
        h.record(d(2026, 1, 5));
        assert_eq!(h.sum_inclusive(d(2026, 1, 9), d(2026, 1, 1)), 0);
    }

    #[test]
    fn dates_serialize_as_iso_keys() {
        let mut h = DailyHistory::new();
        h.record(d(2026, 1, 5));
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"2026-01-05":1}"#);
        let back: DailyHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count(d(2026, 1, 5)), 1);
    }
}
