pub mod job;
pub mod job_status;
pub mod profit_flag;
pub mod scenario;
pub mod settings;
pub mod target;
pub mod time_entry;
