// End-to-end behaviour of the engine loop against a real (in-memory) store:
// one sweep fires immediately at startup, no second sweep runs before the
// interval elapses, and the shutdown channel stops the task.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveTime, TimeZone, Utc};
use rusqlite::Connection;

use bizworx_core::config::SchedulerConfig;
use bizworx_scheduler::SchedulerEngine;
use bizworx_store::{db::init_db, JobStatus, JobStore};

fn mem_store() -> Arc<JobStore> {
    let conn = Connection::open_in_memory().unwrap();
    init_db(&conn).unwrap();
    Arc::new(JobStore::new(conn))
}

#[tokio::test]
async fn startup_sweep_runs_once_then_waits_for_interval() {
    let store = mem_store();
    let biz = store.insert_business("Acme").unwrap();

    let yesterday = Utc::now().date_naive() - Days::new(1);
    let start = Utc.from_utc_datetime(&yesterday.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
    let job = store
        .insert_job(&biz.id, "missed visit", start, start + chrono::Duration::hours(2))
        .unwrap();

    // Interval far longer than the test so only the immediate tick fires.
    let config = SchedulerConfig {
        sweep_interval_secs: 3600,
        ..SchedulerConfig::default()
    };
    let engine = SchedulerEngine::new(Arc::clone(&store), config);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(engine.run(shutdown_rx));

    // Give the immediate first tick time to run its sweep.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let moved = store.get_job(&job.id).unwrap().unwrap();
    assert_eq!(moved.status, JobStatus::Rescheduled);
    assert!(moved.scheduled_start > job.scheduled_start);
    assert_eq!(moved.duration(), chrono::Duration::hours(2));

    // A job left over from yesterday but inserted after the startup sweep
    // must NOT be touched until the next interval tick (an hour away).
    let late = store
        .insert_job(&biz.id, "also missed", start, start + chrono::Duration::hours(1))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let late_after = store.get_job(&late.id).unwrap().unwrap();
    assert_eq!(late_after.status, JobStatus::Scheduled);
    assert_eq!(late_after.scheduled_start, late.scheduled_start);

    // Shutdown stops the loop cleanly.
    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("engine did not stop after shutdown signal")
        .unwrap();
}
