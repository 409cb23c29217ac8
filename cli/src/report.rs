use chrono::{Datelike, Month, NaiveDate};
use parcelcal_core::{DayCell, MonthReport, WeekStatus, WeeklyStats, YearMonth};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

const CELL_WIDTH: usize = 9;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Week")]
    week: String,
    #[tabled(rename = "Dates")]
    dates: String,
    #[tabled(rename = "Days")]
    days: u32,
    #[tabled(rename = "Total / Goal")]
    progress: String,
    #[tabled(rename = "Achv")]
    achievement: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn print_report(report: &MonthReport, show_weekly: bool) {
    println!(
        "\n\x1b[1;36m{} {}\x1b[0m  (goal {}/day)\n",
        month_name(report.month),
        report.month.year(),
        report.daily_goal
    );
    for line in grid_lines(report) {
        println!("{}", line);
    }

    if show_weekly && !report.weeks.is_empty() {
        println!("\n\x1b[1mWeekly summary\x1b[0m");
        let rows: Vec<WeekRow> = report.weeks.iter().map(week_row).collect();
        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        println!("{}", table);
    }

    let monthly = &report.monthly;
    println!("\n\x1b[1mMonthly progress\x1b[0m");
    println!("  Working days:  {}", monthly.total_working_days);
    println!(
        "  Monthly goal:  {} ({}/day)",
        thousands(monthly.monthly_total_goal as i64),
        report.daily_goal
    );
    println!(
        "  Achieved:      {} / {} ({}%)",
        thousands(monthly.current_total_achieved as i64),
        thousands(monthly.monthly_total_goal as i64),
        monthly.progress_percentage
    );
    if monthly.is_goal_reached() {
        println!(
            "  Monthly goal reached! ({} over)",
            thousands(monthly.remaining_count.abs())
        );
    } else {
        println!("  Remaining:     {}", thousands(monthly.remaining_count));
    }
}

pub fn print_holidays(month: YearMonth, holidays: &[NaiveDate]) {
    if holidays.is_empty() {
        println!("No holidays in {}.", month);
        return;
    }
    println!("Holidays in {} ({}):", month, holidays.len());
    for date in holidays {
        println!("  {} {}", date, date.format("%a"));
    }
}

/// Sunday-first grid, one line per calendar week.
pub fn grid_lines(report: &MonthReport) -> Vec<String> {
    let mut lines = vec![WEEKDAYS
        .iter()
        .map(|d| format!("{:<width$}", d, width = CELL_WIDTH))
        .collect::<String>()
        .trim_end()
        .to_string()];

    let mut line = " ".repeat(CELL_WIDTH * report.leading_blanks);
    for (i, day) in report.days.iter().enumerate() {
        line.push_str(&format!("{:<width$}", cell_text(day), width = CELL_WIDTH));
        if (report.leading_blanks + i + 1) % 7 == 0 {
            lines.push(line.trim_end().to_string());
            line.clear();
        }
    }
    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn cell_text(day: &DayCell) -> String {
    let n = day.date.day();
    if day.is_holiday {
        return format!("{:>2} off", n);
    }
    match day.count {
        Some(count) if count > 0 => {
            format!("{:>2} {}{}", n, count, if day.goal_met { "*" } else { "" })
        }
        _ if day.is_today => format!("[{:>2}]", n),
        _ => format!("{:>2}", n),
    }
}

fn week_row(week: &WeeklyStats) -> WeekRow {
    let status = match (week.is_past, week.status()) {
        (true, WeekStatus::OnTarget) => "done: on target".to_string(),
        (true, WeekStatus::Surplus(n)) => format!("done: +{}", thousands(n as i64)),
        (true, WeekStatus::Shortfall(n)) => format!("done: -{}", thousands(n as i64)),
        (false, _) if week.total == 0 => String::new(),
        (false, WeekStatus::OnTarget) => String::new(),
        (false, WeekStatus::Surplus(n)) => format!("+{}", thousands(n as i64)),
        (false, WeekStatus::Shortfall(n)) => format!("-{}", thousands(n as i64)),
    };
    WeekRow {
        week: format!("W{}", week.week_number),
        dates: format!("{}..{}", week.start.format("%m-%d"), week.end.format("%m-%d")),
        days: week.working_days,
        progress: format!("{} / {}", thousands(week.total as i64), thousands(week.goal as i64)),
        achievement: format!("{}%", week.achievement),
        status,
    }
}

fn month_name(month: YearMonth) -> &'static str {
    u8::try_from(month.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("", |m| m.name())
}

pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}
