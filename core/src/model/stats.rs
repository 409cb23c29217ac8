use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One real day of a month grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_holiday: bool,
    pub count: Option<u32>,
    pub is_today: bool,
    pub goal_met: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthlyStats {
    pub total_working_days: u32,
    pub monthly_total_goal: u64,
    pub current_total_achieved: u64,
    pub progress_percentage: u32,
    /// Negative means the goal was exceeded by that many.
    pub remaining_count: i64,
}

impl MonthlyStats {
    pub fn is_goal_reached(&self) -> bool {
        self.remaining_count <= 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WeeklyStats {
    /// Calendar position within the month, starting at 1.
    pub week_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub working_days: u32,
    pub total: u64,
    pub goal: u64,
    pub achievement: u32,
    pub is_past: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStatus {
    OnTarget,
    Surplus(u64),
    Shortfall(u64),
}

impl WeeklyStats {
    pub fn difference(&self) -> i64 {
        self.total as i64 - self.goal as i64
    }

    pub fn status(&self) -> WeekStatus {
        match self.difference() {
            0 => WeekStatus::OnTarget,
            d if d > 0 => WeekStatus::Surplus(d.unsigned_abs()),
            d => WeekStatus::Shortfall(d.unsigned_abs()),
        }
    }
}
