use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// A calendar month, stored as its first day so it is always valid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(YearMonth)
            .ok_or_else(|| CalendarError::InvalidMonth(format!("{:04}-{:02}", year, month)))
    }

    pub fn of(date: NaiveDate) -> Self {
        // Day 1 exists for every month chrono can represent.
        YearMonth(date - chrono::Duration::days(i64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days().last().unwrap_or(self.0)
    }

    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    /// Every date of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.0.month();
        self.0.iter_days().take_while(move |d| d.month() == month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(YearMonth)
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(YearMonth)
    }

    /// Shift by a signed number of months.
    pub fn offset(&self, months: i32) -> Option<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map(YearMonth)
    }

    /// Key used by the monthly goals map.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_february() {
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.num_days(), 29);
        assert_eq!(feb.days().count(), 29);
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let feb = YearMonth::new(2023, 2).unwrap();
        assert_eq!(feb.num_days(), 28);
    }

    #[test]
    fn test_navigation_across_years() {
        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.succ(), Some(YearMonth::new(2025, 1).unwrap()));
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.pred(), Some(dec));
        assert_eq!(jan.offset(-13), Some(YearMonth::new(2023, 12).unwrap()));
        assert_eq!(jan.offset(0), Some(jan));
    }

    #[test]
    fn test_parse_and_display() {
        let m: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(m.to_string(), "2024-02");
        assert_eq!(m.key(), "2024-02");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-2".parse::<YearMonth>().is_err());
        assert!("garbage".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_of_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let m = YearMonth::of(d);
        assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(m.contains(d));
        assert!(!m.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_serde_as_string() {
        let m = YearMonth::new(2025, 7).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2025-07\"");
        let back: YearMonth = serde_json::from_str("\"2025-07\"").unwrap();
        assert_eq!(back, m);
    }
}
