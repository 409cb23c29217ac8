use chrono::{Duration, Local, NaiveDate};

use crate::error::CalendarError;
use crate::model::app_data::DATE_FORMAT;
use crate::model::month::YearMonth;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nd)
    if let Some(count) = parse_relative(input, 'd')? {
        let delta = Duration::try_days(count)
            .ok_or_else(|| CalendarError::InvalidRelative(input.to_string()))?;
        return today
            .checked_add_signed(delta)
            .ok_or_else(|| CalendarError::InvalidRelative(input.to_string()));
    }

    // 3. YYYY-MM-DD
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(input.to_string()))
}

pub fn parse_month(input: &str, today: NaiveDate) -> Result<YearMonth, CalendarError> {
    let input = input.trim();
    let current = YearMonth::of(today);

    let shifted = match input.to_lowercase().as_str() {
        "this" | "now" => Some(0),
        "next" => Some(1),
        "prev" | "last" => Some(-1),
        _ => parse_relative(input, 'm')?,
    };

    match shifted {
        Some(months) => {
            let months = i32::try_from(months)
                .map_err(|_| CalendarError::InvalidRelative(input.to_string()))?;
            current.offset(months).ok_or(CalendarError::OutOfRange)
        }
        None => input.parse(),
    }
}

/// `+3d` / `-2m` style tokens. `Ok(None)` when the input is not relative.
fn parse_relative(input: &str, unit: char) -> Result<Option<i64>, CalendarError> {
    let sign = match input.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(None),
    };
    let body = &input[1..];
    let Some(num_str) = body.strip_suffix(unit) else {
        return Err(CalendarError::InvalidRelative(input.to_string()));
    };
    let num: i64 = num_str
        .parse()
        .map_err(|_| CalendarError::InvalidRelative(input.to_string()))?;
    Ok(Some(sign * num))
}
