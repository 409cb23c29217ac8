pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::Config;
pub use error::CalendarError;
pub use model::app_data::{AppData, DEFAULT_DAILY_GOAL, MAX_DAILY_GOAL};
pub use model::month::YearMonth;
pub use model::stats::{DayCell, MonthlyStats, WeekStatus, WeeklyStats};
pub use repository::{AppDataRepository, FileAppDataRepository};
pub use service::calendar_service::CalendarService;
pub use service::dto::MonthReport;
pub use service::holiday::{is_default_holiday, is_holiday, HolidaySet};
pub use service::stats_service::{classify_days, leading_blanks, monthly_stats, weekly_stats};
pub use time::{local_today, parse_human_date, parse_month};
pub use usecase::month_report::{build_report, MonthReportUseCase};
