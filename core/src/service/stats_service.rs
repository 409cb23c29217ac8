//! Derived views over one month: per-day cells, monthly totals and the
//! week-by-week breakdown. All functions are pure.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::app_data::date_key;
use crate::model::month::YearMonth;
use crate::model::stats::{DayCell, MonthlyStats, WeeklyStats};
use crate::service::holiday::{is_holiday, HolidaySet};

pub type DailyCounts = BTreeMap<String, u32>;

fn count_on(counts: &DailyCounts, date: NaiveDate) -> Option<u32> {
    counts.get(&date_key(date)).copied()
}

/// Rounded percentage, 0 when there is no goal.
fn percentage(achieved: u64, goal: u64) -> u32 {
    if goal == 0 {
        return 0;
    }
    (achieved as f64 / goal as f64 * 100.0).round() as u32
}

/// Blank cells before the 1st in a Sunday-first grid.
pub fn leading_blanks(month: YearMonth) -> usize {
    month.first_day().weekday().num_days_from_sunday() as usize
}

pub fn classify_days(
    month: YearMonth,
    counts: &DailyCounts,
    holidays: &HolidaySet,
    daily_goal: u32,
    today: NaiveDate,
) -> Vec<DayCell> {
    month
        .days()
        .map(|date| {
            let count = count_on(counts, date);
            let goal_met = daily_goal > 0 && count.is_some_and(|c| c > 0 && c >= daily_goal);
            DayCell {
                date,
                weekday: date.weekday(),
                is_holiday: is_holiday(date, holidays),
                count,
                is_today: date == today,
                goal_met,
            }
        })
        .collect()
}

pub fn monthly_stats(
    month: YearMonth,
    counts: &DailyCounts,
    holidays: &HolidaySet,
    daily_goal: u32,
) -> MonthlyStats {
    let mut total_working_days = 0u32;
    let mut current_total_achieved = 0u64;

    for date in month.days() {
        if !is_holiday(date, holidays) {
            total_working_days += 1;
        }
        // Deliveries on holidays still count toward the total.
        if let Some(count) = count_on(counts, date) {
            current_total_achieved += u64::from(count);
        }
    }

    let monthly_total_goal = u64::from(daily_goal) * u64::from(total_working_days);

    MonthlyStats {
        total_working_days,
        monthly_total_goal,
        current_total_achieved,
        progress_percentage: percentage(current_total_achieved, monthly_total_goal),
        remaining_count: monthly_total_goal as i64 - current_total_achieved as i64,
    }
}

/// Weeks end on Saturday or on the last day of the month. Weeks without a
/// working day are skipped but still advance the week number.
pub fn weekly_stats(
    month: YearMonth,
    counts: &DailyCounts,
    holidays: &HolidaySet,
    daily_goal: u32,
    today: NaiveDate,
) -> Vec<WeeklyStats> {
    let last_day = month.last_day();
    let mut weeks = Vec::new();

    let mut week_number = 1u32;
    let mut week_start = month.first_day();
    let mut weekly_total = 0u64;
    let mut weekly_working_days = 0u32;

    for date in month.days() {
        if !is_holiday(date, holidays) {
            weekly_working_days += 1;
            weekly_total += u64::from(count_on(counts, date).unwrap_or(0));
        }

        if date.weekday() == Weekday::Sat || date == last_day {
            if weekly_working_days > 0 {
                let goal = u64::from(daily_goal) * u64::from(weekly_working_days);
                weeks.push(WeeklyStats {
                    week_number,
                    start: week_start,
                    end: date,
                    working_days: weekly_working_days,
                    total: weekly_total,
                    goal,
                    achievement: percentage(weekly_total, goal),
                    is_past: date < today,
                });
            }
            week_number += 1;
            weekly_total = 0;
            weekly_working_days = 0;
            if let Some(next) = date.succ_opt() {
                week_start = next;
            }
        }
    }

    weeks
}
