use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::model::app_data::{date_key, DATE_FORMAT};

/// The override list, parsed. Unparseable entries are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    toggled: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let toggled = keys
            .iter()
            .filter_map(|key| {
                let key = key.as_ref();
                match NaiveDate::parse_from_str(key, DATE_FORMAT) {
                    // Only canonical keys can match a date elsewhere.
                    Ok(date) if date_key(date) == key => Some(date),
                    _ => {
                        debug!(key, "ignoring malformed holiday key");
                        None
                    }
                }
            })
            .collect();
        Self { toggled }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.toggled.contains(&date)
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.toggled.insert(date)
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.toggled.remove(&date)
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            toggled: iter.into_iter().collect(),
        }
    }
}

/// Sundays and Mondays are days off unless toggled.
pub fn is_default_holiday(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sun | Weekday::Mon)
}

/// Membership in `holidays` flips the default status.
pub fn is_holiday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    is_default_holiday(date) != holidays.contains(date)
}
