use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business — an independent scheduling domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A job booked for a business, occupying `[scheduled_start, scheduled_end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub business_id: String,
    pub title: String,
    pub status: JobStatus,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Length of the job's booked interval.
    pub fn duration(&self) -> chrono::Duration {
        self.scheduled_end - self.scheduled_start
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Booked but not yet executed. A `Scheduled` job whose day has passed
    /// is "incomplete" and is picked up by the rescheduling sweep.
    Scheduled,
    /// Relocated to a new slot by the rescheduler.
    Rescheduled,
    /// Work finished.
    Completed,
    /// Booking cancelled.
    Cancelled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Scheduled => "scheduled",
            JobStatus::Rescheduled => "rescheduled",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(JobStatus::Scheduled),
            "rescheduled" => Ok(JobStatus::Rescheduled),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" => Ok(JobStatus::Cancelled),
            other => Err(format!("unknown job status: {other}")),
        }
    }
}

/// The only mutation the rescheduler issues: new slot bounds plus status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPatch {
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub status: JobStatus,
}
