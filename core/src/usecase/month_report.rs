use anyhow::Result;
use chrono::NaiveDate;

use crate::model::app_data::AppData;
use crate::model::month::YearMonth;
use crate::repository::AppDataRepository;
use crate::service::dto::MonthReport;
use crate::service::holiday::{is_holiday, HolidaySet};
use crate::service::stats_service::{classify_days, leading_blanks, monthly_stats, weekly_stats};

/// Build the report from an in-memory snapshot.
pub fn build_report(data: &AppData, month: YearMonth, today: NaiveDate) -> MonthReport {
    let holidays = HolidaySet::from_keys(&data.holidays);
    let daily_goal = data.goal_for(month);
    let counts = &data.daily_counts;

    MonthReport {
        month,
        daily_goal,
        leading_blanks: leading_blanks(month),
        days: classify_days(month, counts, &holidays, daily_goal, today),
        monthly: monthly_stats(month, counts, &holidays, daily_goal),
        weeks: weekly_stats(month, counts, &holidays, daily_goal, today),
    }
}

pub struct MonthReportUseCase<'a, R: AppDataRepository> {
    repo: &'a R,
}

impl<'a, R: AppDataRepository> MonthReportUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn report(&self, month: YearMonth, today: NaiveDate) -> Result<MonthReport> {
        let data = self.repo.load()?;
        Ok(build_report(&data, month, today))
    }

    /// Resolved holidays of the month, in date order.
    pub fn holidays_in(&self, month: YearMonth) -> Result<Vec<NaiveDate>> {
        let data = self.repo.load()?;
        let holidays = HolidaySet::from_keys(&data.holidays);
        Ok(month.days().filter(|d| is_holiday(*d, &holidays)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::app_data::DEFAULT_DAILY_GOAL;

    struct FixedRepo(AppData);

    impl AppDataRepository for FixedRepo {
        fn load(&self) -> Result<AppData> {
            Ok(self.0.clone())
        }
        fn save(&self, _data: &AppData) -> Result<()> {
            unimplemented!()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_report_uses_month_goal() {
        let mut data = AppData::default();
        let feb = YearMonth::new(2024, 2).unwrap();
        let mar = YearMonth::new(2024, 3).unwrap();
        data.set_goal(feb, 100);
        data.set_count(date(2024, 2, 1), 150);

        let report = build_report(&data, feb, date(2024, 2, 20));
        assert_eq!(report.daily_goal, 100);
        assert_eq!(report.leading_blanks, 4);
        assert_eq!(report.days.len(), 29);
        assert_eq!(report.monthly.monthly_total_goal, 2100);
        assert!(report.days[0].goal_met);

        let report = build_report(&data, mar, date(2024, 2, 20));
        assert_eq!(report.daily_goal, DEFAULT_DAILY_GOAL);
        assert_eq!(report.monthly.current_total_achieved, 0);
    }

    #[test]
    fn test_holidays_in_month() {
        let mut data = AppData::default();
        data.toggle_holiday(date(2024, 2, 4));
        data.toggle_holiday(date(2024, 2, 14));
        let repo = FixedRepo(data);
        let usecase = MonthReportUseCase::new(&repo);

        let holidays = usecase.holidays_in(YearMonth::new(2024, 2).unwrap()).unwrap();
        assert_eq!(holidays.len(), 8);
        assert!(!holidays.contains(&date(2024, 2, 4)));
        assert!(holidays.contains(&date(2024, 2, 5)));
        assert!(holidays.contains(&date(2024, 2, 14)));
    }

    #[test]
    fn test_report_is_stable() {
        let mut data = AppData::default();
        data.set_count(date(2024, 2, 1), 200);
        let repo = FixedRepo(data);
        let usecase = MonthReportUseCase::new(&repo);
        let feb = YearMonth::new(2024, 2).unwrap();

        let a = serde_json::to_string(&usecase.report(feb, date(2024, 2, 9)).unwrap()).unwrap();
        let b = serde_json::to_string(&usecase.report(feb, date(2024, 2, 9)).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
