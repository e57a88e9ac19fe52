pub mod backup;
pub mod calculator;
pub mod config;
pub mod job;
pub mod log;
pub mod scenario;
pub mod schedule;
pub mod settings;
pub mod targets;
pub mod time_entry;
pub mod validate;
