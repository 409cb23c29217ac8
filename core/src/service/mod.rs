pub mod calendar_service;
pub mod dto;
pub mod holiday;
pub mod stats_service;
