use chrono::{DateTime, Utc};
use serde::Serialize;

/// A candidate placement `[start, end)`. Ephemeral — computed fresh per job
/// and never persisted directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Outcome counters for one full rescheduling pass, logged after every
/// sweep. `unplaced` is the number of jobs for which the whole horizon held
/// no conflict-free slot — those jobs stay as they are and are retried on
/// the next sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    pub businesses: usize,
    pub examined: usize,
    pub rescheduled: usize,
    pub unplaced: usize,
}
