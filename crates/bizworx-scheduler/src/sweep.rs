use chrono::{DateTime, Days, Utc};
use tracing::info;

use bizworx_core::config::SchedulerConfig;
use bizworx_store::{JobPatch, JobStatus, JobStore};

use crate::error::Result;
use crate::slot::find_next_available_slot;
use crate::types::SweepStats;

/// Run one full rescheduling pass against the wall clock.
pub fn run_sweep(store: &JobStore, config: &SchedulerConfig) -> Result<SweepStats> {
    sweep_at(store, config, Utc::now())
}

/// Run one full pass as if the current time were `now`.
///
/// For every business, fetches yesterday's jobs that are still `Scheduled`
/// and relocates each to the next open slot starting today. A job with no
/// slot in the horizon is left untouched — it stays incomplete and is
/// retried on the next sweep.
///
/// A store error aborts the pass; updates already applied are not rolled
/// back (at-least-once, best-effort).
pub fn sweep_at(
    store: &JobStore,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> Result<SweepStats> {
    let today = now.date_naive();
    let yesterday = today - Days::new(1);
    let mut stats = SweepStats::default();

    let businesses = store.list_businesses()?;
    stats.businesses = businesses.len();

    for business in &businesses {
        let leftover = store.list_incomplete_jobs_on(&business.id, yesterday)?;
        for job in leftover {
            stats.examined += 1;
            match find_next_available_slot(store, &business.id, job.duration(), today, config)? {
                Some(slot) => {
                    store.update_job(
                        &job.id,
                        &JobPatch {
                            scheduled_start: slot.start,
                            scheduled_end: slot.end,
                            status: JobStatus::Rescheduled,
                        },
                    )?;
                    info!(
                        job_id = %job.id,
                        business_id = %business.id,
                        old_start = %job.scheduled_start,
                        new_start = %slot.start,
                        "job rescheduled"
                    );
                    stats.rescheduled += 1;
                }
                // No slot within the horizon: skip, count for operators.
                None => stats.unplaced += 1,
            }
        }
    }

    info!(
        businesses = stats.businesses,
        examined = stats.examined,
        rescheduled = stats.rescheduled,
        unplaced = stats.unplaced,
        "reschedule sweep complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizworx_store::db::init_db;
    use chrono::{NaiveDate, TimeZone};
    use rusqlite::Connection;

    fn mem_store() -> JobStore {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        JobStore::new(conn)
    }

    // Sweep runs as if it were 06:00 on 2026-03-10; "yesterday" is 03-09.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap()
    }

    fn at(d: NaiveDate, hour: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&d.and_hms_opt(hour, 0, 0).unwrap())
    }

    fn yesterday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn leftover_job_moves_to_today_with_same_duration() {
        let store = mem_store();
        let biz = store.insert_business("Acme").unwrap();
        let job = store
            .insert_job(&biz.id, "missed visit", at(yesterday(), 13), at(yesterday(), 15))
            .unwrap();

        let stats = sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();
        assert_eq!(stats.examined, 1);
        assert_eq!(stats.rescheduled, 1);
        assert_eq!(stats.unplaced, 0);

        let moved = store.get_job(&job.id).unwrap().unwrap();
        assert_eq!(moved.status, JobStatus::Rescheduled);
        assert_eq!(moved.scheduled_start, at(today(), 8));
        assert_eq!(moved.scheduled_end, at(today(), 10));
    }

    #[test]
    fn completed_and_future_jobs_are_untouched() {
        let store = mem_store();
        let biz = store.insert_business("Acme").unwrap();

        let done = store
            .insert_job(&biz.id, "done", at(yesterday(), 8), at(yesterday(), 10))
            .unwrap();
        store
            .update_job(
                &done.id,
                &JobPatch {
                    scheduled_start: done.scheduled_start,
                    scheduled_end: done.scheduled_end,
                    status: JobStatus::Completed,
                },
            )
            .unwrap();
        let future = store
            .insert_job(&biz.id, "future", at(today(), 11), at(today(), 13))
            .unwrap();

        let stats = sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();
        assert_eq!(stats.examined, 0);

        let done_after = store.get_job(&done.id).unwrap().unwrap();
        assert_eq!(done_after.status, JobStatus::Completed);
        assert_eq!(done_after.scheduled_start, done.scheduled_start);
        let future_after = store.get_job(&future.id).unwrap().unwrap();
        assert_eq!(future_after, future);
    }

    #[test]
    fn unplaced_job_is_counted_but_unchanged() {
        let store = mem_store();
        let biz = store.insert_business("Acme").unwrap();
        // block the entire 7-day horizon
        for offset in 0..7 {
            let d = today() + Days::new(offset);
            store
                .insert_job(&biz.id, "blocked", at(d, 8), at(d, 18))
                .unwrap();
        }
        let stuck = store
            .insert_job(&biz.id, "stuck", at(yesterday(), 9), at(yesterday(), 11))
            .unwrap();

        let stats = sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();
        assert_eq!(stats.examined, 1);
        assert_eq!(stats.rescheduled, 0);
        assert_eq!(stats.unplaced, 1);

        let after = store.get_job(&stuck.id).unwrap().unwrap();
        assert_eq!(after, stuck);
    }

    #[test]
    fn businesses_are_isolated() {
        let store = mem_store();
        let acme = store.insert_business("Acme").unwrap();
        let zenith = store.insert_business("Zenith").unwrap();

        // Zenith's whole day is booked; Acme's is free. Acme's leftover job
        // must land at 08:00 today regardless.
        store
            .insert_job(&zenith.id, "busy day", at(today(), 8), at(today(), 18))
            .unwrap();
        let acme_job = store
            .insert_job(&acme.id, "leftover", at(yesterday(), 10), at(yesterday(), 12))
            .unwrap();
        let zenith_job = store
            .insert_job(&zenith.id, "leftover", at(yesterday(), 10), at(yesterday(), 12))
            .unwrap();

        let stats = sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();
        assert_eq!(stats.businesses, 2);
        assert_eq!(stats.rescheduled, 2);

        let acme_after = store.get_job(&acme_job.id).unwrap().unwrap();
        assert_eq!(acme_after.scheduled_start, at(today(), 8));
        // Zenith's job had to spill past its fully-booked today
        let zenith_after = store.get_job(&zenith_job.id).unwrap().unwrap();
        assert_eq!(
            zenith_after.scheduled_start,
            at(today().succ_opt().unwrap(), 8)
        );
    }

    #[test]
    fn jobs_placed_in_one_pass_see_each_other() {
        let store = mem_store();
        let biz = store.insert_business("Acme").unwrap();
        let a = store
            .insert_job(&biz.id, "first", at(yesterday(), 8), at(yesterday(), 10))
            .unwrap();
        let b = store
            .insert_job(&biz.id, "second", at(yesterday(), 13), at(yesterday(), 15))
            .unwrap();

        sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();

        // The second search re-reads the store, so it sees the first
        // placement and takes the next slot instead of double-booking.
        let a_after = store.get_job(&a.id).unwrap().unwrap();
        let b_after = store.get_job(&b.id).unwrap().unwrap();
        assert_eq!(a_after.scheduled_start, at(today(), 8));
        assert_eq!(b_after.scheduled_start, at(today(), 10));
    }

    #[test]
    fn rescheduled_jobs_are_not_swept_twice() {
        let store = mem_store();
        let biz = store.insert_business("Acme").unwrap();
        store
            .insert_job(&biz.id, "leftover", at(yesterday(), 8), at(yesterday(), 10))
            .unwrap();

        sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();
        // Second pass the same day: the job is now Rescheduled, not
        // Scheduled, so it no longer matches the incomplete filter.
        let stats = sweep_at(&store, &SchedulerConfig::default(), now()).unwrap();
        assert_eq!(stats.examined, 0);
    }
}
