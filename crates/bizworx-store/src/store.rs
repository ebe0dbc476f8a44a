use std::sync::Mutex;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use rusqlite::Connection;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::types::{Business, Job, JobPatch, JobStatus};

const JOB_COLUMNS: &str = "id, business_id, title, status,
                           scheduled_start, scheduled_end, created_at, updated_at";

/// Thread-safe store for businesses and their jobs.
///
/// Wraps a single SQLite connection in a `Mutex`. A mutex is sufficient for
/// the single-node deployment target; swap in a pool if that changes.
pub struct JobStore {
    db: Mutex<Connection>,
}

impl JobStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Create a business record.
    pub fn insert_business(&self, name: &str) -> Result<Business> {
        let business = Business {
            id: Uuid::now_v7().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO businesses (id, name, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![business.id, business.name, business.created_at.to_rfc3339()],
        )?;
        Ok(business)
    }

    /// Book a job for a business. The business must already exist.
    pub fn insert_job(
        &self,
        business_id: &str,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Job> {
        let now = Utc::now();
        let job = Job {
            id: Uuid::now_v7().to_string(),
            business_id: business_id.to_string(),
            title: title.to_string(),
            status: JobStatus::Scheduled,
            scheduled_start: start,
            scheduled_end: end,
            created_at: now,
            updated_at: now,
        };
        let db = self.db.lock().unwrap();
        let exists: bool = db.query_row(
            "SELECT EXISTS(SELECT 1 FROM businesses WHERE id = ?1)",
            [business_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::BusinessNotFound {
                id: business_id.to_string(),
            });
        }
        db.execute(
            "INSERT INTO jobs
             (id, business_id, title, status, scheduled_start, scheduled_end,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                job.id,
                job.business_id,
                job.title,
                job.status.to_string(),
                job.scheduled_start.to_rfc3339(),
                job.scheduled_end.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        Ok(job)
    }

    /// Return all businesses ordered by creation time.
    pub fn list_businesses(&self) -> Result<Vec<Business>> {
        let db = self.db.lock().unwrap();
        let mut stmt =
            db.prepare("SELECT id, name, created_at FROM businesses ORDER BY created_at")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        Ok(rows
            .filter_map(|r| {
                let (id, name, created_at) = r.ok()?;
                Some(Business {
                    id,
                    name,
                    created_at: parse_ts(&created_at)?,
                })
            })
            .collect())
    }

    /// Jobs for `business_id` starting on calendar day `day` (UTC) that are
    /// still `Scheduled` — i.e. booked but never executed.
    #[instrument(skip(self), fields(business_id, %day))]
    pub fn list_incomplete_jobs_on(&self, business_id: &str, day: NaiveDate) -> Result<Vec<Job>> {
        let (lo, hi) = day_bounds(day);
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare_cached(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs
             WHERE business_id = ?1 AND status = 'scheduled'
               AND scheduled_start >= ?2 AND scheduled_start < ?3
             ORDER BY scheduled_start"
        ))?;
        let jobs = collect_jobs(stmt.query_map(rusqlite::params![business_id, lo, hi], job_row)?);
        debug!(count = jobs.len(), "incomplete jobs fetched");
        Ok(jobs)
    }

    /// All non-cancelled jobs for `business_id` starting on calendar day
    /// `day` (UTC). This is the conflict set for slot search — a cancelled
    /// booking no longer occupies its slot.
    #[instrument(skip(self), fields(business_id, %day))]
    pub fn list_jobs_on(&self, business_id: &str, day: NaiveDate) -> Result<Vec<Job>> {
        let (lo, hi) = day_bounds(day);
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare_cached(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs
             WHERE business_id = ?1 AND status != 'cancelled'
               AND scheduled_start >= ?2 AND scheduled_start < ?3
             ORDER BY scheduled_start"
        ))?;
        let jobs = collect_jobs(stmt.query_map(rusqlite::params![business_id, lo, hi], job_row)?);
        Ok(jobs)
    }

    /// Apply a reschedule patch to a job and return the updated record.
    ///
    /// Bumps `updated_at`; errors with `JobNotFound` when no row matches.
    #[instrument(skip(self, patch), fields(job_id))]
    pub fn update_job(&self, job_id: &str, patch: &JobPatch) -> Result<Job> {
        let now = Utc::now().to_rfc3339();
        let db = self.db.lock().unwrap();
        let rows_changed = db.execute(
            "UPDATE jobs
             SET scheduled_start = ?1, scheduled_end = ?2, status = ?3, updated_at = ?4
             WHERE id = ?5",
            rusqlite::params![
                patch.scheduled_start.to_rfc3339(),
                patch.scheduled_end.to_rfc3339(),
                patch.status.to_string(),
                now,
                job_id,
            ],
        )?;
        if rows_changed == 0 {
            return Err(StoreError::JobNotFound {
                id: job_id.to_string(),
            });
        }
        let job = db.query_row(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"),
            [job_id],
            job_row,
        )?;
        row_to_job(job).ok_or_else(|| StoreError::JobNotFound {
            id: job_id.to_string(),
        })
    }

    /// Fetch a single job by ID, `None` when it does not exist.
    pub fn get_job(&self, job_id: &str) -> Result<Option<Job>> {
        let db = self.db.lock().unwrap();
        match db.query_row(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"),
            [job_id],
            job_row,
        ) {
            Ok(raw) => Ok(row_to_job(raw)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e)),
        }
    }
}

/// Raw TEXT columns of a job row, in `JOB_COLUMNS` order.
type RawJob = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn job_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawJob> {
    Ok((
        row.get(0)?, // id
        row.get(1)?, // business_id
        row.get(2)?, // title
        row.get(3)?, // status
        row.get(4)?, // scheduled_start
        row.get(5)?, // scheduled_end
        row.get(6)?, // created_at
        row.get(7)?, // updated_at
    ))
}

/// Decode a raw row, dropping it (with a warning) when a column is malformed
/// rather than failing the whole listing.
fn row_to_job(raw: RawJob) -> Option<Job> {
    let (id, business_id, title, status_str, start, end, created_at, updated_at) = raw;
    let status: JobStatus = match status_str.parse() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(job_id = %id, "dropping job row: {e}");
            return None;
        }
    };
    Some(Job {
        id,
        business_id,
        title,
        status,
        scheduled_start: parse_ts(&start)?,
        scheduled_end: parse_ts(&end)?,
        created_at: parse_ts(&created_at)?,
        updated_at: parse_ts(&updated_at)?,
    })
}

fn collect_jobs(rows: impl Iterator<Item = rusqlite::Result<RawJob>>) -> Vec<Job> {
    rows.filter_map(|r| r.ok()).filter_map(row_to_job).collect()
}

fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(value = %s, "bad timestamp in store: {e}");
            None
        }
    }
}

/// RFC 3339 bounds `[00:00 of day, 00:00 of day+1)` for TEXT comparison.
fn day_bounds(day: NaiveDate) -> (String, String) {
    let lo = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
    let hi = Utc.from_utc_datetime(&(day + Days::new(1)).and_time(NaiveTime::MIN));
    (lo.to_rfc3339(), hi.to_rfc3339())
}
