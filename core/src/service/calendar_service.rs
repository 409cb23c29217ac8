use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::error::CalendarError;
use crate::model::app_data::AppData;
use crate::model::month::YearMonth;
use crate::repository::AppDataRepository;
use crate::service::holiday::{is_holiday, HolidaySet};

/// Caller-side edits. Each call loads the snapshot, applies one change and
/// writes it back.
pub struct CalendarService<R: AppDataRepository> {
    repo: R,
}

impl<R: AppDataRepository> CalendarService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn snapshot(&self) -> Result<AppData> {
        self.repo.load()
    }

    pub fn record_count(&self, date: NaiveDate, count: u32) -> Result<()> {
        let mut data = self.repo.load()?;
        let holidays = HolidaySet::from_keys(&data.holidays);
        // Clearing is always allowed so stray holiday entries can be removed.
        if count > 0 && is_holiday(date, &holidays) {
            return Err(CalendarError::HolidayEntry(date).into());
        }
        data.set_count(date, count);
        debug!(%date, count, "recorded count");
        self.repo.save(&data)
    }

    /// Returns the goal actually stored after clamping.
    pub fn set_goal(&self, month: YearMonth, goal: u32) -> Result<u32> {
        let mut data = self.repo.load()?;
        let stored = data.set_goal(month, goal);
        self.repo.save(&data)?;
        Ok(stored)
    }

    /// Returns whether the date is a holiday after the toggle.
    pub fn toggle_holiday(&self, date: NaiveDate) -> Result<bool> {
        let mut data = self.repo.load()?;
        data.toggle_holiday(date);
        self.repo.save(&data)?;
        Ok(is_holiday(date, &HolidaySet::from_keys(&data.holidays)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryRepo {
        data: RefCell<AppData>,
    }

    impl AppDataRepository for MemoryRepo {
        fn load(&self) -> Result<AppData> {
            Ok(self.data.borrow().clone())
        }
        fn save(&self, data: &AppData) -> Result<()> {
            *self.data.borrow_mut() = data.clone();
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_and_clear() {
        let repo = MemoryRepo::default();
        let service = CalendarService::new(&repo);

        service.record_count(date(2024, 2, 1), 200).unwrap();
        assert_eq!(repo.data.borrow().count_on(date(2024, 2, 1)), Some(200));

        service.record_count(date(2024, 2, 1), 0).unwrap();
        assert!(repo.data.borrow().daily_counts.is_empty());
    }

    #[test]
    fn test_holiday_entry_refused() {
        let repo = MemoryRepo::default();
        let service = CalendarService::new(&repo);

        let err = service.record_count(date(2024, 2, 4), 120).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CalendarError>(),
            Some(&CalendarError::HolidayEntry(date(2024, 2, 4)))
        );

        // Toggle the Sunday into a working day, then it is accepted.
        assert!(!service.toggle_holiday(date(2024, 2, 4)).unwrap());
        service.record_count(date(2024, 2, 4), 120).unwrap();
        assert_eq!(repo.data.borrow().count_on(date(2024, 2, 4)), Some(120));
    }

    #[test]
    fn test_toggle_reports_resolved_status() {
        let repo = MemoryRepo::default();
        let service = CalendarService::new(&repo);

        assert!(service.toggle_holiday(date(2024, 2, 6)).unwrap());
        assert_eq!(repo.data.borrow().holidays, vec!["2024-02-06"]);
        assert!(!service.toggle_holiday(date(2024, 2, 6)).unwrap());
        assert!(repo.data.borrow().holidays.is_empty());
    }

    #[test]
    fn test_goal_clamped() {
        let repo = MemoryRepo::default();
        let service = CalendarService::new(&repo);
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(service.set_goal(feb, 1200).unwrap(), 999);
        assert_eq!(service.snapshot().unwrap().goal_for(feb), 999);
    }
}
