use serde::{Deserialize, Serialize};

/// Pipeline stage of a job. Jobs move forward through these states and
/// are never deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Lead,
    GotTheJob,
    Scheduled,
    Completed,
}

impl JobStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            JobStatus::Lead => "lead",
            JobStatus::GotTheJob => "got_the_job",
            JobStatus::Scheduled => "scheduled",
            JobStatus::Completed => "completed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "lead" => Some(JobStatus::Lead),
            "got_the_job" => Some(JobStatus::GotTheJob),
            "scheduled" => Some(JobStatus::Scheduled),
            "completed" => Some(JobStatus::Completed),
            _ => None,
        }
    }

    /// Lenient parser for CLI input ("Got-The-Job", "SCHEDULED", ...)
    pub fn from_code(code: &str) -> Option<Self> {
        JobStatus::from_db_str(&code.trim().to_lowercase().replace('-', "_"))
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Lead => "Lead",
            JobStatus::GotTheJob => "Got the job",
            JobStatus::Scheduled => "Scheduled",
            JobStatus::Completed => "Completed",
        }
    }
}
