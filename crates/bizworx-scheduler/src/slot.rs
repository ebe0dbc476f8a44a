use chrono::{Datelike, Days, Duration, NaiveDate, TimeZone, Timelike, Utc};

use bizworx_core::config::SchedulerConfig;
use bizworx_store::{Job, JobStore};

use crate::error::Result;
use crate::types::TimeSlot;

/// Find the earliest conflict-free slot of length `duration` for
/// `business_id`, scanning `from_day` through `from_day + horizon_days - 1`.
///
/// Candidate starts are whole hours from `open_hour` up to (not including)
/// `close_hour`; the day's booked jobs are fetched once per day scanned.
/// Scan order is strictly day-ascending then hour-ascending and the first
/// fit wins — no load balancing across jobs placed in the same sweep.
///
/// Returns `Ok(None)` when the whole grid is exhausted.
pub fn find_next_available_slot(
    store: &JobStore,
    business_id: &str,
    duration: Duration,
    from_day: NaiveDate,
    config: &SchedulerConfig,
) -> Result<Option<TimeSlot>> {
    for offset in 0..config.horizon_days {
        let day = from_day + Days::new(u64::from(offset));
        let booked = store.list_jobs_on(business_id, day)?;

        for hour in config.open_hour..config.close_hour {
            let start = match Utc
                .with_ymd_and_hms(day.year(), day.month(), day.day(), hour, 0, 0)
                .single()
            {
                Some(dt) => dt,
                None => continue,
            };
            let slot = TimeSlot {
                start,
                end: start + duration,
            };
            if !fits_window(&slot, day, config.close_hour) {
                continue;
            }
            if booked.iter().any(|job| overlaps(&slot, job)) {
                continue;
            }
            return Ok(Some(slot));
        }
    }
    Ok(None)
}

/// End-of-day rule: the slot must finish on the same calendar day, and its
/// end is checked on the clock hour only — an end of 18:30 still passes the
/// `<= 18` cutoff.
fn fits_window(slot: &TimeSlot, day: NaiveDate, close_hour: u32) -> bool {
    slot.end.date_naive() == day && slot.end.hour() <= close_hour
}

/// Half-open interval overlap: `[a, b)` conflicts with `[c, d)` iff
/// `a < d && b > c`. Back-to-back slots do not conflict.
fn overlaps(slot: &TimeSlot, job: &Job) -> bool {
    slot.start < job.scheduled_end && slot.end > job.scheduled_start
}
