use serde::{Deserialize, Serialize};

use crate::model::month::YearMonth;
use crate::model::stats::{DayCell, MonthlyStats, WeeklyStats};

/// Everything a presentation layer needs to draw one month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthReport {
    pub month: YearMonth,
    pub daily_goal: u32,
    /// Sunday-first offset of the 1st.
    pub leading_blanks: usize,
    pub days: Vec<DayCell>,
    pub monthly: MonthlyStats,
    pub weeks: Vec<WeeklyStats>,
}
