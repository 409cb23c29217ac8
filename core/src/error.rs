use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Could not parse date: {0}")]
    InvalidDate(String),

    #[error("Could not parse month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid relative expression: {0}")]
    InvalidRelative(String),

    /// Counts can only be entered on days that resolve as working days.
    #[error("{0} is a holiday; toggle it to a working day before recording a count")]
    HolidayEntry(NaiveDate),

    #[error("Month is outside the supported calendar range")]
    OutOfRange,
}
