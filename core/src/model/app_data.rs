use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::month::YearMonth;

pub const DEFAULT_DAILY_GOAL: u32 = 190;
pub const MAX_DAILY_GOAL: u32 = 999;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Snapshot of everything the user has recorded.
///
/// Keys stay as raw strings: a malformed key is carried through load/save
/// untouched but never matches a real date when statistics are derived.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    /// Key: "YYYY-MM-DD"
    #[serde(default)]
    pub daily_counts: BTreeMap<String, u32>,
    /// Key: "YYYY-MM"
    #[serde(default)]
    pub monthly_goals: BTreeMap<String, u32>,
    /// Dates whose default holiday status is flipped. Sorted ascending.
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl AppData {
    pub fn count_on(&self, date: NaiveDate) -> Option<u32> {
        self.daily_counts.get(&date_key(date)).copied()
    }

    /// A zero count removes the entry so absent and zero never coexist.
    pub fn set_count(&mut self, date: NaiveDate, count: u32) {
        let key = date_key(date);
        if count > 0 {
            self.daily_counts.insert(key, count);
        } else {
            self.daily_counts.remove(&key);
        }
    }

    pub fn goal_for(&self, month: YearMonth) -> u32 {
        self.monthly_goals
            .get(&month.key())
            .copied()
            .unwrap_or(DEFAULT_DAILY_GOAL)
    }

    pub fn set_goal(&mut self, month: YearMonth, goal: u32) -> u32 {
        let goal = goal.min(MAX_DAILY_GOAL);
        self.monthly_goals.insert(month.key(), goal);
        goal
    }

    /// Returns true when the date is now present in the override list.
    pub fn toggle_holiday(&mut self, date: NaiveDate) -> bool {
        let key = date_key(date);
        let added = if self.holidays.contains(&key) {
            self.holidays.retain(|h| *h != key);
            false
        } else {
            self.holidays.push(key);
            true
        };
        self.normalize();
        added
    }

    pub fn normalize(&mut self) {
        self.holidays.sort();
        self.holidays.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_count_deletes_entry() {
        let mut data = AppData::default();
        data.set_count(date(2024, 2, 1), 200);
        assert_eq!(data.count_on(date(2024, 2, 1)), Some(200));

        data.set_count(date(2024, 2, 1), 0);
        assert_eq!(data.count_on(date(2024, 2, 1)), None);
        assert!(data.daily_counts.is_empty());
    }

    #[test]
    fn test_goal_defaults_and_clamps() {
        let mut data = AppData::default();
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(data.goal_for(feb), DEFAULT_DAILY_GOAL);

        assert_eq!(data.set_goal(feb, 5000), MAX_DAILY_GOAL);
        assert_eq!(data.goal_for(feb), 999);

        data.set_goal(feb, 0);
        assert_eq!(data.goal_for(feb), 0);
    }

    #[test]
    fn test_toggle_keeps_sorted() {
        let mut data = AppData::default();
        assert!(data.toggle_holiday(date(2024, 2, 20)));
        assert!(data.toggle_holiday(date(2024, 2, 4)));
        assert!(data.toggle_holiday(date(2023, 12, 31)));
        assert_eq!(data.holidays, vec!["2023-12-31", "2024-02-04", "2024-02-20"]);

        assert!(!data.toggle_holiday(date(2024, 2, 4)));
        assert_eq!(data.holidays, vec!["2023-12-31", "2024-02-20"]);
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = r#"{"dailyCounts":{"2024-02-01":200},"monthlyGoals":{"2024-02":150},"holidays":["2024-02-04"]}"#;
        let data: AppData = serde_json::from_str(json).unwrap();
        assert_eq!(data.count_on(date(2024, 2, 1)), Some(200));
        assert_eq!(data.goal_for(YearMonth::new(2024, 2).unwrap()), 150);
        assert_eq!(data.holidays, vec!["2024-02-04"]);

        let partial: AppData = serde_json::from_str(r#"{"holidays":[]}"#).unwrap();
        assert_eq!(partial, AppData::default());
    }
}
