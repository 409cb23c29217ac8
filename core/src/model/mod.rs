pub mod app_data;
pub mod month;
pub mod stats;
